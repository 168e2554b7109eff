use common::api::{Extra, Food};
use common::client::Api;
use common::database::sqlite::SQLiteConnection;
use common::database::Database;
use common::endpoints::{create_http_router, dispatch};
use common::http::HttpServer;
use common::screen::{FoodDetails, Phase};
use std::sync::{Arc, Mutex};

fn sample_food(id: u64, price: f64, extras: Vec<Extra>) -> Food {
    Food {
        id,
        name: "A la Parmegiana".to_string(),
        description: "Deliciosa batata em cubos com queijo coalho por cima".to_string(),
        price,
        image_url: "https://storage.example.com/foods/parmegiana.png".to_string(),
        extras,
        formatted_price: String::new(),
    }
}

fn sample_extra(id: u64, name: &str, value: f64) -> Extra {
    Extra {
        id,
        name: name.to_string(),
        value,
        quantity: 0,
        formatted_value: String::new(),
    }
}

/// Bind the stub server on the given address, then serve from a background
/// thread. Binding first means the client cannot race the listener setup.
fn start_server(addr: &'static str, foods: Vec<Food>) {
    let mut db = SQLiteConnection::new().unwrap();
    db.seed_foods(foods).unwrap();

    let router = Arc::new(create_http_router().unwrap());
    let db = Arc::new(Mutex::new(db));
    let server = HttpServer::new(addr).unwrap();

    std::thread::spawn(move || {
        server.serve(move |request| {
            let mut db = db.lock().unwrap();
            dispatch(&router, request, &mut *db)
        });
    });
}

#[test]
fn the_whole_screen_flow_runs_against_the_stub_server() {
    static ADDR: &str = "127.0.0.1:18521";
    start_server(
        ADDR,
        vec![sample_food(3, 14.9, vec![sample_extra(5, "Queijo", 2.5)])],
    );

    let api = Api::new(ADDR);
    let mut screen = FoodDetails::load(&api, 3).unwrap();

    assert!(!screen.is_favorite());
    assert_eq!(screen.food().formatted_price, "R$ 14,90");
    assert_eq!(screen.extras()[0].formatted_value, "R$ 2,50");
    assert_eq!(screen.formatted_total(), "R$ 14,90");

    screen.increment_food();
    screen.increment_extra(5);
    assert_eq!(screen.formatted_total(), "R$ 32,30");

    let order = screen.finish_order(&api).unwrap();
    assert_eq!(order.food_id, 3);
    assert_ne!(order.id, order.food_id);
    assert_eq!(order.quantity, 2);
    assert_eq!(order.extras.len(), 1);
    assert_eq!(order.extras[0].quantity, 1);
    assert!((order.total - 32.3).abs() < 1e-9);

    assert_eq!(screen.phase(), Phase::Submitted);
    assert!(screen.finish_order(&api).is_err());
}

#[test]
fn favorites_survive_across_screen_visits() {
    static ADDR: &str = "127.0.0.1:18522";
    start_server(ADDR, vec![sample_food(1, 19.9, vec![])]);

    let api = Api::new(ADDR);
    let mut screen = FoodDetails::load(&api, 1).unwrap();
    assert!(!screen.is_favorite());

    assert!(screen.toggle_favorite(&api));
    assert_eq!(api.favorites_matching(1).unwrap().len(), 1);

    // A fresh visit sees the stored favorite
    let mut screen = FoodDetails::load(&api, 1).unwrap();
    assert!(screen.is_favorite());

    assert!(!screen.toggle_favorite(&api));
    assert!(api.favorites_matching(1).unwrap().is_empty());
}

#[test]
fn loading_an_unknown_food_fails() {
    static ADDR: &str = "127.0.0.1:18523";
    start_server(ADDR, vec![sample_food(1, 19.9, vec![])]);

    let api = Api::new(ADDR);
    assert!(FoodDetails::load(&api, 99).is_err());

    // The catalog endpoint is what the client falls back to for suggestions
    let foods = api.list_foods().unwrap();
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0].name, "A la Parmegiana");
}
