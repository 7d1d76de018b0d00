// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;

/// Validates a vehicle registration plate.
///
/// This function checks that the plate is present and plausibly sized.
/// It does NOT validate against any national plate format.
///
/// # Arguments
///
/// * `vehicle_reg` - The registration to validate
///
/// # Returns
///
/// * `Ok(())` if the registration is valid
/// * `Err(DomainError)` if it is empty or too long
///
/// # Errors
///
/// Returns an error if the registration is empty or longer than 16
/// characters.
pub fn validate_vehicle_reg(vehicle_reg: &str) -> Result<(), DomainError> {
    if vehicle_reg.trim().is_empty() {
        return Err(DomainError::InvalidVehicleReg(String::from(
            "Vehicle registration cannot be empty",
        )));
    }
    if vehicle_reg.len() > 16 {
        return Err(DomainError::InvalidVehicleReg(String::from(
            "Vehicle registration cannot exceed 16 characters",
        )));
    }
    Ok(())
}

/// Validates a customer display name.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn validate_customer_name(customer_name: &str) -> Result<(), DomainError> {
    if customer_name.trim().is_empty() {
        return Err(DomainError::InvalidCustomerName(String::from(
            "Customer name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a repair item or child title.
///
/// # Errors
///
/// Returns an error if the title is empty.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a discount percentage.
///
/// # Arguments
///
/// * `discount_percent` - The percentage to validate
///
/// # Errors
///
/// Returns an error if the percentage is outside 0 to 100.
pub fn validate_discount(discount_percent: Decimal) -> Result<(), DomainError> {
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return Err(DomainError::InvalidDiscount {
            discount: discount_percent,
        });
    }
    Ok(())
}

/// Validates a recorded mileage.
///
/// # Errors
///
/// Returns an error if the mileage is negative.
pub const fn validate_mileage(mileage: i64) -> Result<(), DomainError> {
    if mileage < 0 {
        return Err(DomainError::InvalidMileage { mileage });
    }
    Ok(())
}
