// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Labour and parts pricing lines.
//!
//! Line totals are kept un-rounded; rounding to currency precision
//! happens only when lines are summed into item costs or report totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of labour on a repair item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabourEntry {
    /// Menu or operation code.
    pub code: String,
    /// What the labour covers.
    pub description: String,
    /// Hours of labour.
    pub hours: Decimal,
    /// Hourly rate.
    pub rate: Decimal,
    /// Percentage discount, 0 to 100.
    pub discount_percent: Decimal,
}

impl LabourEntry {
    /// Creates a new labour line.
    #[must_use]
    pub const fn new(
        code: String,
        description: String,
        hours: Decimal,
        rate: Decimal,
        discount_percent: Decimal,
    ) -> Self {
        Self {
            code,
            description,
            hours,
            rate,
            discount_percent,
        }
    }

    /// Returns the un-rounded line total: hours x rate, less the discount.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.hours * self.rate * discount_multiplier(self.discount_percent)
    }
}

/// One line of parts on a repair item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartsEntry {
    /// Part number or stock code.
    pub code: String,
    /// What the part is.
    pub description: String,
    /// Quantity of the part.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Percentage discount, 0 to 100.
    pub discount_percent: Decimal,
}

impl PartsEntry {
    /// Creates a new parts line.
    #[must_use]
    pub const fn new(
        code: String,
        description: String,
        quantity: Decimal,
        unit_price: Decimal,
        discount_percent: Decimal,
    ) -> Self {
        Self {
            code,
            description,
            quantity,
            unit_price,
            discount_percent,
        }
    }

    /// Returns the un-rounded line total: quantity x unit price, less the discount.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price * discount_multiplier(self.discount_percent)
    }
}

/// Converts a percentage discount into a multiplier, e.g. 10 -> 0.9.
fn discount_multiplier(discount_percent: Decimal) -> Decimal {
    Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED
}

/// Sums labour lines without rounding.
#[must_use]
pub fn sum_labour_lines(entries: &[LabourEntry]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |acc, entry| acc + entry.line_total())
}

/// Sums parts lines without rounding.
#[must_use]
pub fn sum_parts_lines(entries: &[PartsEntry]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |acc, entry| acc + entry.line_total())
}
