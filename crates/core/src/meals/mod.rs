//! Meals
//!
//! Meal categories and the clock windows during which each of them can be ordered.

use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod clock;
pub mod schedule;

pub use clock::{Countdown, MinuteOfDay, TimeSpan};
pub use schedule::{MealSchedule, MealWindow, WindowStatus};

/// Errors raised while building meal windows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A clock value could not be parsed or is out of range.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    /// A window opens and closes at the same minute.
    #[error("window starting at {0} has no length")]
    EmptyWindow(MinuteOfDay),

    /// More than one window was declared for the same meal.
    #[error("meal {0} has more than one window")]
    DuplicateMeal(MealType),
}

/// Ordering category with its own window.
///
/// Names are matched case-insensitively; anything unrecognised is kept as
/// [`MealType::Custom`] so new categories can be configured without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    /// Breakfast
    Breakfast,

    /// Lunch
    Lunch,

    /// Dinner
    Dinner,

    /// Cake
    Cake,

    /// Any other configured category, stored upper-cased.
    Custom(String),
}

impl MealType {
    /// Canonical upper-case name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Breakfast => "BREAKFAST",
            Self::Lunch => "LUNCH",
            Self::Dinner => "DINNER",
            Self::Cake => "CAKE",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for MealType {
    fn from(value: &str) -> Self {
        let name = value.trim().to_ascii_uppercase();

        match name.as_str() {
            "BREAKFAST" => Self::Breakfast,
            "LUNCH" => Self::Lunch,
            "DINNER" => Self::Dinner,
            "CAKE" => Self::Cake,
            _ => Self::Custom(name),
        }
    }
}

impl From<String> for MealType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<MealType> for String {
    fn from(value: MealType) -> Self {
        match value {
            MealType::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for MealType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for MealType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
