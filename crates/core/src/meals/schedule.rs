//! Meal Schedule
//!
//! The single table of ordering windows. Every window query is answered from
//! here so the boundaries for a meal are declared exactly once.

use jiff::civil;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::meals::{
    MealType, ScheduleError,
    clock::{Countdown, MinuteOfDay, TimeSpan},
};

/// Ordering and delivery windows for one meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealWindow {
    /// Meal this window belongs to.
    pub meal_type: MealType,

    /// When orders are accepted.
    pub ordering: TimeSpan,

    /// When the meal is delivered. Informational only.
    pub delivery: TimeSpan,
}

/// Combined answer for a meal at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    /// Accepting orders; closes after the countdown.
    Open {
        /// Time left in the current window.
        closes_in: Countdown,
    },

    /// Not accepting orders; reopens after the countdown.
    Closed {
        /// Time until the next window opens.
        opens_in: Countdown,
    },

    /// The meal has no configured window.
    Unavailable,
}

/// Table of meal windows keyed by meal type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealSchedule {
    windows: Vec<MealWindow>,
}

impl MealSchedule {
    /// Build a schedule from a list of windows.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DuplicateMeal`] if a meal type appears twice.
    pub fn new(windows: impl IntoIterator<Item = MealWindow>) -> Result<Self, ScheduleError> {
        let windows: Vec<MealWindow> = windows.into_iter().collect();
        let mut seen = FxHashSet::default();

        for window in &windows {
            if !seen.insert(&window.meal_type) {
                return Err(ScheduleError::DuplicateMeal(window.meal_type.clone()));
            }
        }

        Ok(Self { windows })
    }

    /// The built-in windows for breakfast, lunch, dinner and cake.
    #[must_use]
    pub fn standard() -> Self {
        let span = |from: (u16, u16), to: (u16, u16)| {
            TimeSpan::from_parts(MinuteOfDay::hm(from.0, from.1), MinuteOfDay::hm(to.0, to.1))
        };

        Self {
            windows: vec![
                MealWindow {
                    meal_type: MealType::Breakfast,
                    ordering: span((19, 0), (6, 0)),
                    delivery: span((10, 0), (11, 0)),
                },
                MealWindow {
                    meal_type: MealType::Lunch,
                    ordering: span((6, 0), (10, 0)),
                    delivery: span((13, 15), (14, 0)),
                },
                MealWindow {
                    meal_type: MealType::Dinner,
                    ordering: span((12, 0), (18, 45)),
                    delivery: span((19, 30), (20, 15)),
                },
                MealWindow {
                    meal_type: MealType::Cake,
                    ordering: span((9, 0), (21, 0)),
                    delivery: span((17, 0), (21, 30)),
                },
            ],
        }
    }

    /// All configured windows, in declaration order.
    #[must_use]
    pub fn windows(&self) -> &[MealWindow] {
        &self.windows
    }

    /// Look up the window for a meal.
    #[must_use]
    pub fn window(&self, meal: &MealType) -> Option<&MealWindow> {
        self.windows.iter().find(|window| &window.meal_type == meal)
    }

    /// Whether orders for `meal` are accepted at `now`.
    ///
    /// Unconfigured meals are never open.
    pub fn is_ordering_open(&self, meal: &MealType, now: impl Into<MinuteOfDay>) -> bool {
        self.window(meal)
            .is_some_and(|window| window.ordering.contains(now.into()))
    }

    /// Time left before the current window for `meal` closes.
    ///
    /// Returns `None` when the window is closed or the meal is unconfigured.
    pub fn time_remaining(&self, meal: &MealType, now: impl Into<MinuteOfDay>) -> Option<Countdown> {
        let now = now.into();

        self.window(meal)
            .and_then(|window| window.ordering.minutes_until_end(now))
            .map(Countdown::from_minutes)
    }

    /// Time until the next window for `meal` opens.
    ///
    /// Returns `None` while the window is open or when the meal is unconfigured.
    pub fn time_until_next_window(
        &self,
        meal: &MealType,
        now: impl Into<MinuteOfDay>,
    ) -> Option<Countdown> {
        let now = now.into();

        self.window(meal)
            .and_then(|window| window.ordering.minutes_until_start(now))
            .map(Countdown::from_minutes)
    }

    /// Open/closed state of `meal` with the matching countdown.
    pub fn status(&self, meal: &MealType, now: impl Into<MinuteOfDay>) -> WindowStatus {
        let now = now.into();

        if let Some(closes_in) = self.time_remaining(meal, now) {
            WindowStatus::Open { closes_in }
        } else if let Some(opens_in) = self.time_until_next_window(meal, now) {
            WindowStatus::Closed { opens_in }
        } else {
            WindowStatus::Unavailable
        }
    }

    /// Windows accepting orders at `now`.
    pub fn open_windows(&self, now: impl Into<MinuteOfDay>) -> impl Iterator<Item = &MealWindow> {
        let now = now.into();

        self.windows
            .iter()
            .filter(move |window| window.ordering.contains(now))
    }

    /// Calendar moment at which the relevant ordering window for `meal` opens.
    ///
    /// While the window is open this is the opening of the current window,
    /// which is yesterday for the after-midnight part of a wrapping window.
    /// Otherwise it is the next opening, today or tomorrow.
    pub fn next_opening(&self, meal: &MealType, now: civil::DateTime) -> Option<civil::DateTime> {
        let span = self.window(meal)?.ordering;
        let minute = MinuteOfDay::from(now);
        let today = now.date();

        let date = if span.contains(minute) {
            if span.wraps() && minute < span.end() {
                today.yesterday().ok()?
            } else {
                today
            }
        } else if span.start() > minute {
            today
        } else {
            today.tomorrow().ok()?
        };

        Some(date.to_datetime(span.start().to_civil()))
    }

    /// Delivery interval for `meal`.
    #[must_use]
    pub fn delivery_window(&self, meal: &MealType) -> Option<TimeSpan> {
        self.window(meal).map(|window| window.delivery)
    }
}

impl Default for MealSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
