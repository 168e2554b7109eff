// This file contains the basic types used to communicate through the API
use serde::{Deserialize, Serialize};

/// An optional add-on attachable to a food order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Extra {
    /// Unique ID within the food it belongs to
    pub id: u64,
    /// Display name
    pub name: String,
    /// Unit value
    pub value: f64,
    /// Quantity chosen by the user. The backend does not store one, so it
    /// defaults to 0 when the extra comes off the wire
    #[serde(default)]
    pub quantity: u32,
    /// Unit value rendered for display, filled in client side
    #[serde(skip)]
    pub formatted_value: String,
}

/// A food item, as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Food {
    /// Unique ID, assigned by the backend
    pub id: u64,
    /// Display name
    pub name: String,
    /// Longer description shown under the name
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Where to fetch the illustration from
    pub image_url: String,
    /// Extras that can be added to an order of this food
    pub extras: Vec<Extra>,
    /// Unit price rendered for display, filled in client side
    #[serde(skip)]
    pub formatted_price: String,
}

/// Body of the order creation request
///
/// Carries a snapshot of the food along with the chosen quantities, so the
/// order is complete even if the food record changes later. Extras left at
/// quantity 0 are not part of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// ID of the food being ordered
    pub food_id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    /// How many units of the food, at least 1
    pub quantity: u32,
    /// Selected extras with their chosen quantities
    pub extras: Vec<Extra>,
    /// Total as computed on screen when the order was confirmed
    pub total: f64,
}

/// A created order, as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    /// Unique ID, given by the server on creation
    pub id: u64,
    pub food_id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub quantity: u32,
    pub extras: Vec<Extra>,
    pub total: f64,
}

impl Order {
    /// Build the order record stored and echoed by the server once an id
    /// has been assigned to the request
    pub fn from_request(id: u64, request: NewOrder) -> Order {
        Order {
            id,
            food_id: request.food_id,
            name: request.name,
            description: request.description,
            price: request.price,
            image_url: request.image_url,
            quantity: request.quantity,
            extras: request.extras,
            total: request.total,
        }
    }
}
