//! Integration tests for the meal ordering windows.

use jiff::civil::{date, time};
use testresult::TestResult;

use tiffin::prelude::*;

#[test]
fn breakfast_is_open_late_evening_and_early_morning() {
    let schedule = MealSchedule::standard();

    for (hour, minute, open) in [
        (23, 59, true),
        (0, 1, true),
        (5, 59, true),
        (6, 0, false),
        (12, 0, false),
        (19, 0, true),
    ] {
        assert_eq!(
            schedule.is_ordering_open(&MealType::Breakfast, time(hour, minute, 0, 0)),
            open,
            "breakfast at {hour:02}:{minute:02}"
        );
    }
}

#[test]
fn dinner_at_ten_to_seven_waits_until_noon() {
    let schedule = MealSchedule::standard();
    let now = time(18, 50, 0, 0);

    assert!(!schedule.is_ordering_open(&MealType::Dinner, now));
    assert_eq!(schedule.time_remaining(&MealType::Dinner, now), None);
    assert_eq!(
        schedule.time_until_next_window(&MealType::Dinner, now),
        Some(Countdown { hours: 17, minutes: 10 })
    );
}

#[test]
fn unrecognised_meal_never_raises() {
    let schedule = MealSchedule::standard();
    let meal = MealType::from("midnight snack");

    assert!(!schedule.is_ordering_open(&meal, time(1, 0, 0, 0)));
    assert_eq!(schedule.time_remaining(&meal, time(1, 0, 0, 0)), None);
    assert_eq!(schedule.time_until_next_window(&meal, time(1, 0, 0, 0)), None);
}

#[test]
fn every_minute_is_either_open_or_waiting() {
    let schedule = MealSchedule::standard();

    for window in schedule.windows() {
        for hour in 0..24 {
            for minute in 0..60 {
                let now = time(hour, minute, 0, 0);
                let open = schedule.is_ordering_open(&window.meal_type, now);
                let remaining = schedule.time_remaining(&window.meal_type, now);
                let next = schedule.time_until_next_window(&window.meal_type, now);

                assert_eq!(open, remaining.is_some(), "{} at {now}", window.meal_type);
                assert_eq!(!open, next.is_some(), "{} at {now}", window.meal_type);
            }
        }
    }
}

#[test]
fn next_opening_is_a_calendar_moment() -> TestResult {
    let schedule = MealSchedule::standard();
    let now = date(2026, 12, 31).at(22, 0, 0, 0);

    assert_eq!(
        schedule.next_opening(&MealType::Lunch, now),
        Some(date(2027, 1, 1).at(6, 0, 0, 0))
    );

    let settings = Settings::from_yaml(
        r#"
meals:
  - meal: LUNCH
    ordering: "11:00-15:00"
    delivery: "12:00-16:00"
"#,
    )?;

    assert_eq!(
        settings.schedule.next_opening(&MealType::Lunch, now),
        Some(date(2027, 1, 1).at(11, 0, 0, 0))
    );
    assert_eq!(settings.schedule.window(&MealType::Dinner), None);

    Ok(())
}
