use crate::api::{Food, NewOrder, Order};
use crate::errors::Result;

pub mod sqlite;

/// Trait hiding the storage implementation behind the stub server
///
/// The mock keeps everything in vectors for unit tests, while the server
/// binary uses the SQLite implementation. The trait allows swapping one for
/// the other without touching the handlers.
pub trait Database {
    /// Create a new empty database
    fn new() -> Result<Self>
    where
        Self: Sized;

    /// Load the food catalog, replacing whatever was stored before
    fn seed_foods(&mut self, foods: Vec<Food>) -> Result<()>;

    /// Retrieve the whole food catalog
    fn list_foods(&self) -> Result<Vec<Food>>;

    /// Retrieve the food with the given id
    ///
    /// Should return a NotFound error when no food has this id
    fn get_food(&self, food_id: u64) -> Result<Food>;

    /// Retrieve every favorited food
    fn list_favorites(&self) -> Result<Vec<Food>>;

    /// Retrieve the favorites whose food id matches
    ///
    /// An empty result means the food is not favorited; that is not an error
    fn favorites_matching(&self, food_id: u64) -> Result<Vec<Food>>;

    /// Mark a food as favorited, storing the record as sent by the client
    ///
    /// Favoriting the same food twice replaces the stored record
    fn insert_favorite(&mut self, food: Food) -> Result<()>;

    /// Remove a food from the favorites
    ///
    /// Should return a NotFound error when the food was not favorited
    fn remove_favorite(&mut self, food_id: u64) -> Result<()>;

    /// Store a new order, assigning it a fresh id
    ///
    /// On success, return the stored order as the client will see it
    fn insert_order(&mut self, request: NewOrder) -> Result<Order>;
}

pub mod mock {
    use super::*;
    use crate::errors::Error;

    /// In-memory implementation for unit tests
    pub struct MockDB {
        foods: Vec<Food>,
        favorites: Vec<Food>,
        orders: Vec<Order>,
        next_order_id: u64,
    }

    impl MockDB {
        /// Orders stored so far, in insertion order
        pub fn orders(&self) -> &[Order] {
            &self.orders
        }
    }

    impl Database for MockDB {
        fn new() -> Result<Self> {
            Ok(MockDB {
                foods: Vec::new(),
                favorites: Vec::new(),
                orders: Vec::new(),
                next_order_id: 1,
            })
        }

        fn seed_foods(&mut self, foods: Vec<Food>) -> Result<()> {
            self.foods = foods;
            Ok(())
        }

        fn list_foods(&self) -> Result<Vec<Food>> {
            Ok(self.foods.clone())
        }

        fn get_food(&self, food_id: u64) -> Result<Food> {
            self.foods
                .iter()
                .find(|food| food.id == food_id)
                .cloned()
                .ok_or(Error::NotFound(format!("No food with ID {}", food_id)).into())
        }

        fn list_favorites(&self) -> Result<Vec<Food>> {
            Ok(self.favorites.clone())
        }

        fn favorites_matching(&self, food_id: u64) -> Result<Vec<Food>> {
            Ok(self
                .favorites
                .iter()
                .filter(|food| food.id == food_id)
                .cloned()
                .collect())
        }

        fn insert_favorite(&mut self, food: Food) -> Result<()> {
            self.favorites.retain(|stored| stored.id != food.id);
            self.favorites.push(food);
            Ok(())
        }

        fn remove_favorite(&mut self, food_id: u64) -> Result<()> {
            let old_len = self.favorites.len();
            self.favorites.retain(|food| food.id != food_id);

            if self.favorites.len() == old_len {
                return Err(Error::NotFound(format!("No favorite with ID {}", food_id)).into());
            }
            Ok(())
        }

        fn insert_order(&mut self, request: NewOrder) -> Result<Order> {
            let id = self.next_order_id;
            self.next_order_id += 1;

            let order = Order::from_request(id, request);
            self.orders.push(order.clone());
            Ok(order)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::api::Extra;

        fn sample_food(id: u64, name: &str) -> Food {
            Food {
                id,
                name: name.to_string(),
                description: format!("A very good {}", name),
                price: 10.0,
                image_url: "http://example.com/food.png".to_string(),
                extras: vec![Extra {
                    id: 1,
                    name: "Cheese".to_string(),
                    value: 2.5,
                    quantity: 0,
                    formatted_value: String::new(),
                }],
                formatted_price: String::new(),
            }
        }

        #[test]
        fn test_mock_foods() {
            let mut db = MockDB::new().unwrap();
            db.seed_foods(vec![sample_food(1, "Pizza"), sample_food(2, "Burger")])
                .unwrap();

            assert_eq!(db.list_foods().unwrap().len(), 2);
            assert_eq!(db.get_food(2).unwrap().name, "Burger");
            assert!(db.get_food(3).is_err());
        }

        #[test]
        fn test_mock_favorites() {
            let mut db = MockDB::new().unwrap();

            assert!(db.favorites_matching(1).unwrap().is_empty());

            db.insert_favorite(sample_food(1, "Pizza")).unwrap();
            db.insert_favorite(sample_food(1, "Pizza")).unwrap();
            db.insert_favorite(sample_food(2, "Burger")).unwrap();

            // Re-favoriting replaces, it does not duplicate
            assert_eq!(db.favorites_matching(1).unwrap().len(), 1);
            assert_eq!(db.list_favorites().unwrap().len(), 2);

            db.remove_favorite(1).unwrap();
            assert!(db.favorites_matching(1).unwrap().is_empty());
            assert!(db.remove_favorite(1).is_err());
        }

        #[test]
        fn test_mock_orders_get_fresh_ids() {
            let mut db = MockDB::new().unwrap();

            let request = NewOrder {
                food_id: 7,
                name: "Pizza".to_string(),
                description: "A very good Pizza".to_string(),
                price: 10.0,
                image_url: "http://example.com/food.png".to_string(),
                quantity: 2,
                extras: vec![],
                total: 20.0,
            };

            let first = db.insert_order(request.clone()).unwrap();
            let second = db.insert_order(request).unwrap();

            assert_eq!(first.food_id, 7);
            assert_ne!(first.id, second.id);
            assert_eq!(db.orders().len(), 2);
        }
    }
}
