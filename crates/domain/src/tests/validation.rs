// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, validate_customer_name, validate_discount, validate_mileage, validate_title,
    validate_vehicle_reg,
};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_validate_vehicle_reg_accepts_plate() {
    let result: Result<(), DomainError> = validate_vehicle_reg("AB26 CDE");
    assert!(result.is_ok());
}

#[test]
fn test_validate_vehicle_reg_rejects_empty() {
    let result: Result<(), DomainError> = validate_vehicle_reg("");
    assert!(matches!(result, Err(DomainError::InvalidVehicleReg(_))));

    let result: Result<(), DomainError> = validate_vehicle_reg("   ");
    assert!(matches!(result, Err(DomainError::InvalidVehicleReg(_))));
}

#[test]
fn test_validate_vehicle_reg_rejects_overlong() {
    let result: Result<(), DomainError> = validate_vehicle_reg("ABCDEFGHIJKLMNOPQ");
    assert!(matches!(result, Err(DomainError::InvalidVehicleReg(_))));
}

#[test]
fn test_validate_customer_name() {
    assert!(validate_customer_name("Jo Customer").is_ok());
    assert!(matches!(
        validate_customer_name(""),
        Err(DomainError::InvalidCustomerName(_))
    ));
}

#[test]
fn test_validate_title() {
    assert!(validate_title("Front brake pads").is_ok());
    assert!(matches!(
        validate_title("  "),
        Err(DomainError::InvalidTitle(_))
    ));
}

#[test]
fn test_validate_discount_bounds() {
    assert!(validate_discount(Decimal::ZERO).is_ok());
    assert!(validate_discount(Decimal::from_str("10").unwrap()).is_ok());
    assert!(validate_discount(Decimal::ONE_HUNDRED).is_ok());

    let result: Result<(), DomainError> =
        validate_discount(Decimal::from_str("-0.01").unwrap());
    assert!(matches!(result, Err(DomainError::InvalidDiscount { .. })));

    let result: Result<(), DomainError> =
        validate_discount(Decimal::from_str("100.01").unwrap());
    assert!(matches!(result, Err(DomainError::InvalidDiscount { .. })));
}

#[test]
fn test_validate_mileage() {
    assert!(validate_mileage(0).is_ok());
    assert!(validate_mileage(123_456).is_ok());
    assert!(matches!(
        validate_mileage(-1),
        Err(DomainError::InvalidMileage { mileage: -1 })
    ));
}
