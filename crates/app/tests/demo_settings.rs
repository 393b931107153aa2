use testresult::TestResult;
use tiffin::prelude::*;

#[test]
fn demo_settings_load() -> TestResult {
    let settings = Settings::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/settings.yaml"))?;

    assert_eq!(settings.schedule, MealSchedule::standard());
    assert_eq!(settings.pricing, PricingPolicy::standard());
    assert_eq!(settings.menu.len(), 6);
    assert_eq!(
        settings.menu_item("veg-thali").map(|item| &item.meal_type),
        Some(&MealType::Lunch)
    );

    Ok(())
}
