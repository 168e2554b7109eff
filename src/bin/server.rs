use common::api::Food;
use common::cli::{validate_address, DEFAULT_ADDRESS};
use common::database::sqlite::SQLiteConnection;
use common::database::Database;
use common::endpoints::{create_http_router, dispatch};
use common::errors::Result;
use common::http::HttpServer;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Food catalog served when no seed file is given
const DEFAULT_SEED: &str = include_str!("../../fixtures/foods.json");

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Arguments: an optional listen address, an optional path to a JSON seed
/// file with the food catalog
fn parse_cli_args<I>(mut args: I) -> Result<(String, Option<String>)>
where
    I: Iterator<Item = String>,
{
    assert!(args.next().is_some()); // Skip the program name

    let address = match args.next() {
        Some(address) => validate_address(&address)?.to_string(),
        None => DEFAULT_ADDRESS.to_string(),
    };

    Ok((address, args.next()))
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (address, seed_path) = parse_cli_args(std::env::args())?;

    let seed = match &seed_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_SEED.to_string(),
    };
    let foods: Vec<Food> = serde_json::from_str(&seed)?;

    let mut db = SQLiteConnection::new()?;
    db.seed_foods(foods)?;

    let router = Arc::new(create_http_router()?);
    let db = Arc::new(Mutex::new(db));

    tracing::info!("Serving the food catalog on {}", address);

    let server = HttpServer::new(&address)?;
    server.serve(move |request| {
        let mut db = db.lock().unwrap();
        dispatch(&router, request, &mut *db)
    });

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        let mut all = vec!["server".to_string()];
        all.extend(list.iter().map(|s| s.to_string()));
        all.into_iter()
    }

    #[test]
    fn test_parse_cli_args_defaults() {
        let (address, seed) = parse_cli_args(args(&[])).unwrap();
        assert_eq!(address, DEFAULT_ADDRESS);
        assert!(seed.is_none());
    }

    #[test]
    fn test_parse_cli_args_with_address_and_seed() {
        let (address, seed) = parse_cli_args(args(&["0.0.0.0:8000", "foods.json"])).unwrap();
        assert_eq!(address, "0.0.0.0:8000");
        assert_eq!(seed.as_deref(), Some("foods.json"));
    }

    #[test]
    fn test_parse_cli_args_rejects_bad_address() {
        assert!(parse_cli_args(args(&["not an address"])).is_err());
    }

    #[test]
    fn test_default_seed_parses() {
        let foods: Vec<Food> = serde_json::from_str(DEFAULT_SEED).unwrap();
        assert!(!foods.is_empty());
    }
}
