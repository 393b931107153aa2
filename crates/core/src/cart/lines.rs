//! Cart Lines

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{meals::MealType, uuids::TypedUuid};

/// Cart line UUID
pub type LineUuid = TypedUuid<CartLine>;

/// Options picked for a single line, in the order they were chosen.
pub type Customizations = SmallVec<[Customization; 2]>;

/// Catalog entry offered by a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Price in minor units.
    pub price: u64,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub meal_type: MealType,
}

/// One selected option on a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub option_name: String,
    pub selected_choice: String,
    /// Surcharge per unit, in minor units.
    #[serde(default)]
    pub additional_price: u64,
}

/// One distinct entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub line_id: LineUuid,
    pub menu_item_id: String,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub customizations: Customizations,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub meal_type: MealType,
}

impl CartLine {
    pub(crate) fn new(item: &MenuItem, quantity: u32, customizations: Customizations) -> Self {
        Self {
            line_id: LineUuid::now_v7(),
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            customizations,
            restaurant_id: item.restaurant_id.clone(),
            restaurant_name: item.restaurant_name.clone(),
            meal_type: item.meal_type.clone(),
        }
    }

    /// Whether this line holds the same item with the same options.
    #[must_use]
    pub fn matches(&self, item: &MenuItem, customizations: &[Customization]) -> bool {
        self.menu_item_id == item.id && self.customizations.as_slice() == customizations
    }

    /// Whether `other` would have been merged into this line had it been added.
    #[must_use]
    pub fn same_entry(&self, other: &CartLine) -> bool {
        self.menu_item_id == other.menu_item_id && self.customizations == other.customizations
    }

    /// Price of a single unit including every surcharge, or `None` on overflow.
    #[must_use]
    pub fn unit_total(&self) -> Option<u64> {
        self.customizations
            .iter()
            .try_fold(self.unit_price, |acc, option| {
                acc.checked_add(option.additional_price)
            })
    }

    /// Price of the whole line, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.unit_total()?.checked_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn thali() -> MenuItem {
        MenuItem {
            id: "thali".to_string(),
            name: "Veg Thali".to_string(),
            price: 120_00,
            restaurant_id: "r1".to_string(),
            restaurant_name: "Annapurna".to_string(),
            meal_type: MealType::Lunch,
        }
    }

    #[test]
    fn line_total_includes_surcharges_per_unit() {
        let extra_roti = Customization {
            option_name: "Roti".to_string(),
            selected_choice: "Extra".to_string(),
            additional_price: 10_00,
        };

        let line = CartLine::new(&thali(), 2, smallvec![extra_roti]);

        assert_eq!(line.unit_total(), Some(130_00));
        assert_eq!(line.line_total(), Some(260_00));
    }

    #[test]
    fn line_total_reports_overflow() {
        let mut item = thali();
        item.price = u64::MAX;

        let line = CartLine::new(&item, 2, Customizations::new());

        assert_eq!(line.line_total(), None);
    }

    #[test]
    fn matching_requires_identical_options() {
        let item = thali();
        let spicy = Customization {
            option_name: "Spice".to_string(),
            selected_choice: "Hot".to_string(),
            additional_price: 0,
        };

        let line = CartLine::new(&item, 1, smallvec![spicy.clone()]);

        assert!(line.matches(&item, &[spicy]));
        assert!(!line.matches(&item, &[]));
    }
}
