//! Pricing
//!
//! Cart totals are always derived from the lines on demand; nothing here is cached.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An amount did not fit in the minor-unit range.
    #[error("amount overflowed while pricing the cart")]
    Overflow,
}

/// Fees and taxes applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    /// Subtotal at or above which delivery is free.
    pub free_delivery_threshold: u64,

    /// Delivery fee charged below the threshold.
    pub delivery_fee: u64,

    /// Tax applied to the subtotal.
    pub tax_rate: Percentage,
}

impl PricingPolicy {
    /// Free delivery from 200.00, otherwise 30.00, with 5% tax.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            free_delivery_threshold: 200_00,
            delivery_fee: 30_00,
            tax_rate: Percentage::from(0.05),
        }
    }

    /// Delivery fee owed for a given subtotal.
    #[must_use]
    pub fn delivery_fee_for(&self, subtotal: u64) -> u64 {
        if subtotal >= self.free_delivery_threshold {
            0
        } else {
            self.delivery_fee
        }
    }

    /// Tax owed for a given subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the result cannot be represented.
    pub fn tax_for(&self, subtotal: u64) -> Result<u64, PricingError> {
        percent_of_minor(&self.tax_rate, subtotal)
    }

    /// Price a set of cart lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any intermediate amount overflows.
    pub fn totals(&self, lines: &[CartLine]) -> Result<Totals, PricingError> {
        let subtotal = lines.iter().try_fold(0_u64, |acc, line| {
            line.line_total()
                .and_then(|line_total| acc.checked_add(line_total))
                .ok_or(PricingError::Overflow)
        })?;

        let delivery_fee = self.delivery_fee_for(subtotal);
        let tax = self.tax_for(subtotal)?;

        let total = subtotal
            .checked_add(delivery_fee)
            .and_then(|sum| sum.checked_add(tax))
            .ok_or(PricingError::Overflow)?;

        Ok(Totals {
            subtotal,
            delivery_fee,
            tax,
            total,
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Derived amounts for a cart or an order, in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax: u64,
    pub total: u64,
}

/// Apply a percentage to a minor-unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the calculation cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: u64) -> Result<u64, PricingError> {
    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(Decimal::from(minor))
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::{Customizations, MenuItem},
        meals::MealType,
    };

    fn line(price: u64, quantity: u32) -> CartLine {
        let item = MenuItem {
            id: format!("item-{price}"),
            name: "Item".to_string(),
            price,
            restaurant_id: "r1".to_string(),
            restaurant_name: "Annapurna".to_string(),
            meal_type: MealType::Dinner,
        };

        CartLine::new(&item, quantity, Customizations::new())
    }

    #[test]
    fn below_threshold_charges_delivery() -> TestResult {
        let totals = PricingPolicy::standard().totals(&[line(90_00, 2)])?;

        assert_eq!(
            totals,
            Totals {
                subtotal: 180_00,
                delivery_fee: 30_00,
                tax: 9_00,
                total: 219_00,
            }
        );

        Ok(())
    }

    #[test]
    fn threshold_waives_delivery() -> TestResult {
        let totals = PricingPolicy::standard().totals(&[line(100_00, 2)])?;

        assert_eq!(totals.delivery_fee, 0);
        assert_eq!(totals.tax, 10_00);
        assert_eq!(totals.total, totals.subtotal + totals.tax);

        Ok(())
    }

    #[test]
    fn empty_cart_still_owes_delivery() -> TestResult {
        let totals = PricingPolicy::standard().totals(&[])?;

        assert_eq!(totals.subtotal, 0);
        assert_eq!(totals.total, 30_00);

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 5% of 0.10 is half a paisa.
        assert_eq!(PricingPolicy::standard().tax_for(10)?, 1);
        assert_eq!(PricingPolicy::standard().tax_for(9)?, 0);

        Ok(())
    }

    #[test]
    fn overflowing_subtotal_is_an_error() {
        let result = PricingPolicy::standard().totals(&[line(u64::MAX, 1), line(1, 1)]);

        assert_eq!(result, Err(PricingError::Overflow));
    }
}
