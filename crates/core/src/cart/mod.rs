//! Cart
//!
//! A single session's shopping cart. At most [`MAX_CART_ITEMS`] units may be
//! held across all lines, and all lines share one restaurant and one meal.

use serde::{Deserialize, Serialize};

use crate::{
    meals::MealType,
    pricing::{PricingError, PricingPolicy, Totals},
};

pub mod errors;
pub mod lines;

pub use errors::CartError;
pub use lines::{CartLine, Customization, Customizations, LineUuid, MenuItem};

/// Maximum number of units held across every line of a cart.
pub const MAX_CART_ITEMS: u32 = 4;

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, checking every cart rule.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the lines break a cart rule, including
    /// [`CartError::DuplicateLine`] for repeated ids or lines that should have merged.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut cart = Self::new();

        for line in lines {
            if line.quantity == 0 {
                return Err(CartError::InvalidQuantity);
            }

            cart.ensure_within_limit(cart.item_count(), line.quantity)?;
            cart.ensure_compatible(&line.restaurant_id, &line.meal_type)?;

            if cart
                .lines
                .iter()
                .any(|existing| existing.line_id == line.line_id || existing.same_entry(&line))
            {
                return Err(CartError::DuplicateLine(line.line_id));
            }

            cart.lines.push(line);
        }

        Ok(cart)
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, id: LineUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id == id)
    }

    /// Number of units across every line.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Restaurant every line belongs to, as `(id, name)`.
    #[must_use]
    pub fn restaurant(&self) -> Option<(&str, &str)> {
        self.lines
            .first()
            .map(|line| (line.restaurant_id.as_str(), line.restaurant_name.as_str()))
    }

    /// Meal every line belongs to.
    #[must_use]
    pub fn meal_type(&self) -> Option<&MealType> {
        self.lines.first().map(|line| &line.meal_type)
    }

    /// Add `quantity` units of `item` with the given options.
    ///
    /// A line with the same item and options has its quantity increased;
    /// otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::LimitExceeded`]: the cart would hold more than [`MAX_CART_ITEMS`].
    /// - [`CartError::RestaurantMismatch`] / [`CartError::MealMismatch`]: the item
    ///   belongs to a different restaurant or meal than the cart.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        quantity: u32,
        customizations: Customizations,
    ) -> Result<LineUuid, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let current = self.item_count();

        self.ensure_within_limit(current, quantity)?;
        self.ensure_compatible(&item.restaurant_id, &item.meal_type)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item, &customizations))
        {
            let merged = line.quantity.saturating_add(quantity);
            let after = (current - line.quantity).saturating_add(merged);

            if after > MAX_CART_ITEMS {
                return Err(CartError::LimitExceeded {
                    current,
                    requested: quantity,
                    max: MAX_CART_ITEMS,
                });
            }

            line.quantity = merged;

            return Ok(line.line_id);
        }

        let line = CartLine::new(item, quantity, customizations);
        let id = line.line_id;

        self.lines.push(line);

        Ok(id)
    }

    /// Set the quantity of a line. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::LimitExceeded`]: the cart would hold more than [`MAX_CART_ITEMS`].
    /// - [`CartError::LineNotFound`]: no line has the given id.
    pub fn update_quantity(&mut self, id: LineUuid, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_item(id);

            return Ok(());
        }

        let current = self.item_count();

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.line_id == id)
            .ok_or(CartError::LineNotFound(id))?;

        let after = (current - line.quantity).saturating_add(quantity);

        if after > MAX_CART_ITEMS {
            return Err(CartError::LimitExceeded {
                current,
                requested: quantity,
                max: MAX_CART_ITEMS,
            });
        }

        line.quantity = quantity;

        Ok(())
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: LineUuid) {
        self.lines.retain(|line| line.line_id != id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take back the units that were submitted in an order.
    ///
    /// Lines added after the snapshot, and units added to a submitted line
    /// since, stay in the cart.
    pub fn settle(&mut self, submitted: &[CartLine]) {
        for sent in submitted {
            if let Some(line) = self
                .lines
                .iter_mut()
                .find(|line| line.line_id == sent.line_id)
            {
                line.quantity = line.quantity.saturating_sub(sent.quantity);
            }
        }

        self.lines.retain(|line| line.quantity > 0);
    }

    /// Price the cart under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any amount overflows.
    pub fn totals(&self, policy: &PricingPolicy) -> Result<Totals, PricingError> {
        policy.totals(&self.lines)
    }

    fn ensure_within_limit(&self, current: u32, requested: u32) -> Result<(), CartError> {
        if current.saturating_add(requested) > MAX_CART_ITEMS {
            return Err(CartError::LimitExceeded {
                current,
                requested,
                max: MAX_CART_ITEMS,
            });
        }

        Ok(())
    }

    fn ensure_compatible(&self, restaurant_id: &str, meal_type: &MealType) -> Result<(), CartError> {
        let Some(first) = self.lines.first() else {
            return Ok(());
        };

        if first.restaurant_id != restaurant_id {
            return Err(CartError::RestaurantMismatch {
                expected: first.restaurant_id.clone(),
                found: restaurant_id.to_string(),
            });
        }

        if &first.meal_type != meal_type {
            return Err(CartError::MealMismatch {
                expected: first.meal_type.clone(),
                found: meal_type.clone(),
            });
        }

        Ok(())
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
