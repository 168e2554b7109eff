use crate::api::{Extra, Food, NewOrder, Order};
use crate::client::Api;
use crate::errors::{Error, Result};
use crate::format::format_value;

/// Submission progress of the screen
///
/// An order can only be confirmed from `Ready`; this is what keeps a second
/// confirmation from firing while one is in flight or after one went
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Submitting,
    Submitted,
}

/// State behind the food details screen
///
/// Holds the food being displayed, the user's selection (extras and
/// quantity) and the favorite flag. Everything the screen renders derives
/// from here; the total is recomputed on every read so it can never go
/// stale.
pub struct FoodDetails {
    food: Food,
    extras: Vec<Extra>,
    is_favorite: bool,
    food_quantity: u32,
    phase: Phase,
}

impl FoodDetails {
    /// Fetch the food and its favorite status, and build the initial state
    ///
    /// Both fetches complete before any state exists, so the screen never
    /// shows one of them stale. Extras start at quantity 0 with their
    /// display value rendered; the food quantity starts at 1 since an order
    /// has at least one unit. Fetch failures propagate to the caller, the
    /// screen has no degraded mode.
    pub fn load(api: &Api, food_id: u64) -> Result<FoodDetails> {
        let mut food = api.get_food(food_id)?;
        let favorites = api.favorites_matching(food_id)?;

        food.formatted_price = format_value(food.price);
        let extras = food
            .extras
            .iter()
            .map(|extra| Extra {
                quantity: 0,
                formatted_value: format_value(extra.value),
                ..extra.clone()
            })
            .collect();

        Ok(FoodDetails {
            food,
            extras,
            is_favorite: !favorites.is_empty(),
            food_quantity: 1,
            phase: Phase::Ready,
        })
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn extras(&self) -> &[Extra] {
        &self.extras
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn food_quantity(&self) -> u32 {
        self.food_quantity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Add one unit of the given extra. Unknown ids are ignored.
    pub fn increment_extra(&mut self, extra_id: u64) {
        self.extras = self
            .extras
            .iter()
            .map(|extra| {
                if extra.id == extra_id {
                    Extra {
                        quantity: extra.quantity + 1,
                        ..extra.clone()
                    }
                } else {
                    extra.clone()
                }
            })
            .collect();
    }

    /// Remove one unit of the given extra, stopping at 0
    pub fn decrement_extra(&mut self, extra_id: u64) {
        self.extras = self
            .extras
            .iter()
            .map(|extra| {
                if extra.id == extra_id && extra.quantity >= 1 {
                    Extra {
                        quantity: extra.quantity - 1,
                        ..extra.clone()
                    }
                } else {
                    extra.clone()
                }
            })
            .collect();
    }

    /// Add one unit of the food
    pub fn increment_food(&mut self) {
        self.food_quantity += 1;
    }

    /// Remove one unit of the food, stopping at 1
    pub fn decrement_food(&mut self) {
        if self.food_quantity > 1 {
            self.food_quantity -= 1;
        }
    }

    /// Running total for the current selection
    pub fn cart_total(&self) -> f64 {
        let extras_total: f64 = self
            .extras
            .iter()
            .map(|extra| extra.value * f64::from(extra.quantity))
            .sum();

        self.food.price * f64::from(self.food_quantity) + extras_total
    }

    /// Running total rendered for display
    pub fn formatted_total(&self) -> String {
        format_value(self.cart_total())
    }

    /// Flip the favorite flag and persist the change
    ///
    /// The flag flips before the network call and stays flipped even when
    /// the call fails; the failure is only logged, and reloading the screen
    /// is the only way back in sync with the backend. Returns the new flag.
    pub fn toggle_favorite(&mut self, api: &Api) -> bool {
        self.is_favorite = !self.is_favorite;

        let saved = if self.is_favorite {
            api.add_favorite(&self.food)
        } else {
            api.remove_favorite(self.food.id)
        };

        if let Err(err) = saved {
            tracing::warn!(
                "failed to save favorite state for food {}: {}",
                self.food.id,
                err
            );
        }

        self.is_favorite
    }

    /// Submit the current selection as a new order
    ///
    /// Refused unless the screen is `Ready`. On success the phase moves to
    /// `Submitted` and the created order is returned for the caller to
    /// navigate with. On failure the error is logged, the phase goes back
    /// to `Ready` and the selection is left untouched, so the user can try
    /// again.
    pub fn finish_order(&mut self, api: &Api) -> Result<Order> {
        if self.phase != Phase::Ready {
            return Err(Error::OrderInFlight.into());
        }
        self.phase = Phase::Submitting;

        match api.create_order(&self.order_payload()) {
            Ok(order) => {
                self.phase = Phase::Submitted;
                Ok(order)
            }
            Err(err) => {
                tracing::error!("failed to submit order for food {}: {}", self.food.id, err);
                self.phase = Phase::Ready;
                Err(err)
            }
        }
    }

    /// Order request built from the current selection
    ///
    /// Extras the user left at 0 are not part of the payload; the id is
    /// left for the server to assign.
    fn order_payload(&self) -> NewOrder {
        NewOrder {
            food_id: self.food.id,
            name: self.food.name.clone(),
            description: self.food.description.clone(),
            price: self.food.price,
            image_url: self.food.image_url.clone(),
            quantity: self.food_quantity,
            extras: self
                .extras
                .iter()
                .filter(|extra| extra.quantity > 0)
                .cloned()
                .collect(),
            total: self.cart_total(),
        }
    }
}
