use crate::api::{Food, NewOrder, Order};
use crate::errors::{Error, Result};
use crate::http::{HttpClient, Response};
use crate::routes;
use serde::de::DeserializeOwned;

/// Typed access to the restaurant API
///
/// One method per endpoint the app uses; each serializes its payload, sends
/// it through the HTTP client and checks the status before deserializing
/// the body.
pub struct Api {
    http: HttpClient,
}

impl Api {
    /// Create a client for the backend at the given address
    pub fn new(server: &str) -> Api {
        Api {
            http: HttpClient::new(server),
        }
    }

    fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.http.send("GET", path, "")?;
        expect_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(Into::into)
    }

    /// Fetch the whole food catalog
    pub fn list_foods(&self) -> Result<Vec<Food>> {
        self.get_json(routes::paths::FOODS)
    }

    /// Fetch one food record with its extras
    pub fn get_food(&self, food_id: u64) -> Result<Food> {
        self.get_json(&routes::food_by_id(food_id))
    }

    /// Fetch the favorites matching the given food id
    ///
    /// An empty result means the food is not favorited
    pub fn favorites_matching(&self, food_id: u64) -> Result<Vec<Food>> {
        self.get_json(&routes::favorites_matching(food_id))
    }

    /// Mark a food as favorited, sending the full record
    pub fn add_favorite(&self, food: &Food) -> Result<()> {
        let response = self.http.send(
            "POST",
            routes::paths::FAVORITES,
            &serde_json::to_string(food)?,
        )?;
        expect_status(&response, 201)
    }

    /// Remove a food from the favorites, keyed by its id
    pub fn remove_favorite(&self, food_id: u64) -> Result<()> {
        let response = self
            .http
            .send("DELETE", &routes::favorite_by_id(food_id), "")?;
        expect_status(&response, 204)
    }

    /// Create a new order and return it as stored by the backend
    pub fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let response = self.http.send(
            "POST",
            routes::paths::ORDERS,
            &serde_json::to_string(order)?,
        )?;
        expect_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(Into::into)
    }
}

fn expect_status(response: &Response, expected: u16) -> Result<()> {
    match response.status {
        Some(code) if code == expected => Ok(()),
        Some(code) => Err(Error::UnexpectedStatus(code).into()),
        None => Err(Error::NoResponse.into()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::http::{HttpServer, Response};

    #[test]
    fn test_get_food_rejects_error_statuses() {
        static ADDR: &str = "127.0.0.1:18431";

        let server = HttpServer::new(ADDR).expect("Failed to bind server");
        let handle = std::thread::spawn(move || {
            server.serve_once(|_| Response::not_found());
        });

        let api = Api::new(ADDR);
        let result = api.get_food(1);

        assert!(result.is_err());
        handle.join().unwrap();
    }

    #[test]
    fn test_remove_favorite_sends_delete_for_the_id() {
        static ADDR: &str = "127.0.0.1:18432";

        let server = HttpServer::new(ADDR).expect("Failed to bind server");
        let handle = std::thread::spawn(move || {
            server.serve_once(|request| {
                assert_eq!(request.method, "DELETE");
                assert_eq!(request.path, "/favorites/12");
                Response::ok()
            });
        });

        let api = Api::new(ADDR);
        api.remove_favorite(12).unwrap();

        handle.join().unwrap();
    }
}
