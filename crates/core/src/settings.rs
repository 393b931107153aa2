//! Settings
//!
//! YAML description of the currency, pricing, meal windows and menu a
//! deployment runs with. Anything left out falls back to the standard values.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::MenuItem,
    meals::{MealSchedule, MealType, MealWindow, ScheduleError},
    pricing::PricingPolicy,
};

/// Settings Errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid YAML for this layout.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price is in a different currency from the settings.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// A meal window is malformed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Currency every amount is expressed in.
    pub currency: &'static Currency,

    /// Fees and taxes.
    pub pricing: PricingPolicy,

    /// Meal windows.
    pub schedule: MealSchedule,

    /// Items that can be added to the cart.
    pub menu: Vec<MenuItem>,
}

impl Settings {
    /// Standard pricing and windows in rupees, with an empty menu.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            currency: iso::INR,
            pricing: PricingPolicy::standard(),
            schedule: MealSchedule::standard(),
            menu: Vec::new(),
        }
    }

    /// Read settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse settings from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML, or if a price,
    /// percentage, currency or meal window in it is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = serde_norway::from_str(yaml)?;
        let mut settings = Self::standard();

        if let Some(code) = file.currency {
            settings.currency = parse_currency(&code)?;
        }

        if let Some(pricing) = file.pricing {
            settings.pricing = PricingPolicy {
                free_delivery_threshold: settings.price(&pricing.free_delivery_threshold)?,
                delivery_fee: settings.price(&pricing.delivery_fee)?,
                tax_rate: parse_percentage(&pricing.tax_rate)?,
            };
        }

        if let Some(meals) = file.meals {
            let windows = meals
                .into_iter()
                .map(|meal| -> Result<MealWindow, ScheduleError> {
                    Ok(MealWindow {
                        meal_type: MealType::from(meal.meal),
                        ordering: meal.ordering.parse()?,
                        delivery: meal.delivery.parse()?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            settings.schedule = MealSchedule::new(windows)?;
        }

        for item in file.menu {
            let price = settings.price(&item.price)?;

            settings.menu.push(MenuItem {
                id: item.id,
                name: item.name,
                price,
                restaurant_id: item.restaurant_id,
                restaurant_name: item.restaurant_name,
                meal_type: MealType::from(item.meal),
            });
        }

        Ok(settings)
    }

    /// Look up a menu item by id.
    #[must_use]
    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|item| item.id == id)
    }

    fn price(&self, s: &str) -> Result<u64, SettingsError> {
        let (minor_units, currency) = parse_price(s)?;

        if currency != self.currency {
            return Err(SettingsError::CurrencyMismatch(
                self.currency.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(minor_units)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    currency: Option<String>,
    pricing: Option<PricingFile>,
    meals: Option<Vec<MealFile>>,
    #[serde(default)]
    menu: Vec<MenuItemFile>,
}

#[derive(Debug, Deserialize)]
struct PricingFile {
    free_delivery_threshold: String,
    delivery_fee: String,
    tax_rate: String,
}

#[derive(Debug, Deserialize)]
struct MealFile {
    meal: String,
    ordering: String,
    delivery: String,
}

#[derive(Debug, Deserialize)]
struct MenuItemFile {
    id: String,
    name: String,
    price: String,
    restaurant_id: String,
    restaurant_name: String,
    meal: String,
}

fn parse_currency(code: &str) -> Result<&'static Currency, SettingsError> {
    match code.trim() {
        "INR" => Ok(iso::INR),
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        other => Err(SettingsError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g. "30 INR" or "2.50 GBP") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount is negative or unparseable, or if the currency is not recognised.
pub fn parse_price(s: &str) -> Result<(u64, &'static Currency), SettingsError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SettingsError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| SettingsError::InvalidPrice(s.to_string()))?
        .checked_mul(Decimal::ONE_HUNDRED)
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_u64())
        .ok_or_else(|| SettingsError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(code)?))
}

/// Parse a rate written as `"5%"` or as a fraction such as `"0.05"`.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidPercentage`] unless the rate is a number
/// between 0% and 100% inclusive.
pub fn parse_percentage(s: &str) -> Result<Percentage, SettingsError> {
    let invalid = || SettingsError::InvalidPercentage(s.to_string());
    let trimmed = s.trim();

    let fraction = match trimmed.strip_suffix('%') {
        Some(percent) => percent
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| invalid())?
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(invalid)?,
        None => trimmed.parse::<Decimal>().map_err(|_err| invalid())?,
    };

    if fraction.is_sign_negative() || fraction > Decimal::ONE {
        return Err(invalid());
    }

    fraction.to_f64().map(Percentage::from).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::meals::{Countdown, MinuteOfDay, TimeSpan};

    #[test]
    fn parse_price_reads_whole_and_fractional_amounts() -> TestResult {
        assert_eq!(parse_price("30 INR")?, (30_00, iso::INR));
        assert_eq!(parse_price("2.50 GBP")?, (250, iso::GBP));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        assert!(matches!(parse_price("30INR"), Err(SettingsError::InvalidPrice(_))));
        assert!(matches!(parse_price("-5 INR"), Err(SettingsError::InvalidPrice(_))));
        assert!(matches!(parse_price("5 INR extra"), Err(SettingsError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_fractions_of_a_minor_unit() -> TestResult {
        assert!(matches!(parse_price("2.505 INR"), Err(SettingsError::InvalidPrice(_))));
        assert_eq!(parse_price("2.500 INR")?, (250, iso::INR));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(SettingsError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_percentage_accepts_both_formats() -> TestResult {
        assert_eq!(parse_percentage("5%")?, Percentage::from(0.05));
        assert_eq!(parse_percentage("0.05")?, Percentage::from(0.05));
        assert!(parse_percentage("five").is_err());

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_rates_outside_zero_to_one_hundred() -> TestResult {
        assert!(matches!(parse_percentage("-5%"), Err(SettingsError::InvalidPercentage(_))));
        assert!(matches!(parse_percentage("-0.05"), Err(SettingsError::InvalidPercentage(_))));
        assert!(matches!(parse_percentage("150%"), Err(SettingsError::InvalidPercentage(_))));
        assert_eq!(parse_percentage("0%")?, Percentage::from(0.0));
        assert_eq!(parse_percentage("100%")?, Percentage::from(1.0));

        Ok(())
    }

    #[test]
    fn negative_tax_rate_is_refused_at_load() {
        let yaml = r#"
pricing:
  free_delivery_threshold: "200 INR"
  delivery_fee: "30 INR"
  tax_rate: "-5%"
"#;

        assert!(matches!(
            Settings::from_yaml(yaml),
            Err(SettingsError::InvalidPercentage(rate)) if rate == "-5%"
        ));
    }

    #[test]
    fn empty_document_keeps_the_standard_settings() -> TestResult {
        let settings = Settings::from_yaml("{}")?;

        assert_eq!(settings.currency, iso::INR);
        assert_eq!(settings.pricing, PricingPolicy::standard());
        assert_eq!(settings.schedule, MealSchedule::standard());
        assert!(settings.menu.is_empty());

        Ok(())
    }

    #[test]
    fn full_document_replaces_every_section() -> TestResult {
        let yaml = r#"
currency: INR
pricing:
  free_delivery_threshold: "300 INR"
  delivery_fee: "40 INR"
  tax_rate: "18%"
meals:
  - meal: high tea
    ordering: "14:00-16:30"
    delivery: "17:00-18:00"
menu:
  - id: samosa
    name: Samosa
    price: "25 INR"
    restaurant_id: r1
    restaurant_name: Chaiwala
    meal: HIGH TEA
"#;

        let settings = Settings::from_yaml(yaml)?;
        let high_tea = MealType::from("High Tea");

        assert_eq!(settings.pricing.free_delivery_threshold, 300_00);
        assert_eq!(settings.pricing.delivery_fee, 40_00);
        assert_eq!(settings.pricing.tax_for(100_00)?, 18_00);
        assert_eq!(settings.schedule.windows().len(), 1);
        assert_eq!(
            settings.schedule.time_remaining(&high_tea, "15:00".parse::<MinuteOfDay>()?),
            Some(Countdown { hours: 1, minutes: 30 })
        );
        assert_eq!(
            settings.schedule.delivery_window(&high_tea),
            Some("17:00-18:00".parse::<TimeSpan>()?)
        );
        assert_eq!(settings.menu_item("samosa").map(|item| item.price), Some(25_00));
        assert_eq!(
            settings.menu_item("samosa").map(|item| &item.meal_type),
            Some(&high_tea)
        );

        Ok(())
    }

    #[test]
    fn prices_must_match_the_settings_currency() {
        let yaml = r#"
currency: INR
pricing:
  free_delivery_threshold: "200 GBP"
  delivery_fee: "30 INR"
  tax_rate: "5%"
"#;

        assert!(matches!(
            Settings::from_yaml(yaml),
            Err(SettingsError::CurrencyMismatch(expected, found)) if expected == "INR" && found == "GBP"
        ));
    }

    #[test]
    fn malformed_windows_are_rejected() {
        let yaml = r#"
meals:
  - meal: LUNCH
    ordering: "10:00-10:00"
    delivery: "13:00-14:00"
"#;

        assert!(matches!(
            Settings::from_yaml(yaml),
            Err(SettingsError::Schedule(ScheduleError::EmptyWindow(_)))
        ));
    }
}
