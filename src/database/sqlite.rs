use crate::api::{Food, NewOrder, Order};
use crate::database::Database;
use crate::errors::{Error, Result};
use rusqlite::{params, Connection};
use std::sync::atomic::{AtomicU64, Ordering};

/// Contains the SQL queries used to interact with the database
pub mod sql_queries {
    pub const CREATE_TABLES: &str = "
        CREATE TABLE IF NOT EXISTS foods (id INTEGER PRIMARY KEY, name TEXT, description TEXT, price REAL, image_url TEXT, extras TEXT);
        CREATE TABLE IF NOT EXISTS favorites (food_id INTEGER PRIMARY KEY, food TEXT);
        CREATE TABLE IF NOT EXISTS orders (id INTEGER PRIMARY KEY, food_id INTEGER, body TEXT);
    ";

    pub const CLEAR_FOODS: &str = "DELETE FROM foods";
    pub const INSERT_FOOD: &str =
        "INSERT OR REPLACE INTO foods (id, name, description, price, image_url, extras) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
    pub const SELECT_FOODS: &str = "SELECT * FROM foods";
    pub const SELECT_FOOD: &str = "SELECT * FROM foods WHERE id = ?1";

    pub const INSERT_FAVORITE: &str =
        "INSERT OR REPLACE INTO favorites (food_id, food) VALUES (?1, ?2)";
    pub const SELECT_FAVORITES: &str = "SELECT food FROM favorites";
    pub const SELECT_FAVORITES_MATCHING: &str = "SELECT food FROM favorites WHERE food_id = ?1";
    pub const DELETE_FAVORITE: &str = "DELETE FROM favorites WHERE food_id = ?1";

    pub const INSERT_ORDER: &str = "INSERT INTO orders (id, food_id, body) VALUES (?1, ?2, ?3)";
}

pub struct SQLiteConnection {
    /// The connection
    conn: Connection,

    /// The ID to assign to the next order. Managed locally because there
    /// doesn't seem to be a great way to get the last inserted ID from
    /// SQLite in the case of multiple inserts.
    current_id: AtomicU64,
}

/// Map a row of the foods table back to the wire type.
///
/// Extras live in their column as JSON, the only nested part of the record.
fn food_from_row(row: &rusqlite::Row) -> rusqlite::Result<Food> {
    let extras_json: String = row.get(5)?;
    let extras = serde_json::from_str(&extras_json).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(Food {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        image_url: row.get(4)?,
        extras,
        formatted_price: String::new(),
    })
}

/// Parse the JSON food records of a favorites result set
fn foods_from_json(rows: Vec<String>) -> Result<Vec<Food>> {
    rows.iter()
        .map(|json| serde_json::from_str::<Food>(json).map_err(Into::into))
        .collect()
}

impl Database for SQLiteConnection {
    fn new() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(sql_queries::CREATE_TABLES)?;

        Ok(SQLiteConnection {
            conn,
            current_id: AtomicU64::new(1),
        })
    }

    fn seed_foods(&mut self, foods: Vec<Food>) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(sql_queries::CLEAR_FOODS, [])?;
        {
            let mut stmt = tx.prepare(sql_queries::INSERT_FOOD)?;
            for food in &foods {
                let extras = serde_json::to_string(&food.extras)?;
                stmt.execute(params![
                    food.id,
                    food.name,
                    food.description,
                    food.price,
                    food.image_url,
                    extras
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    fn list_foods(&self) -> Result<Vec<Food>> {
        self.conn
            .prepare(sql_queries::SELECT_FOODS)?
            .query_map([], food_from_row)
            .and_then(|rows| rows.collect::<std::result::Result<Vec<_>, _>>())
            .map_err(|err| err.into())
    }

    fn get_food(&self, food_id: u64) -> Result<Food> {
        let rows = self
            .conn
            .prepare(sql_queries::SELECT_FOOD)?
            .query_map(params![food_id], food_from_row)
            .and_then(|rows| rows.collect::<std::result::Result<Vec<_>, _>>())?;

        rows.into_iter()
            .next()
            .ok_or(Error::NotFound(format!("No food with ID {}", food_id)).into())
    }

    fn list_favorites(&self) -> Result<Vec<Food>> {
        let rows = self
            .conn
            .prepare(sql_queries::SELECT_FAVORITES)?
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<std::result::Result<Vec<_>, _>>())?;

        foods_from_json(rows)
    }

    fn favorites_matching(&self, food_id: u64) -> Result<Vec<Food>> {
        let rows = self
            .conn
            .prepare(sql_queries::SELECT_FAVORITES_MATCHING)?
            .query_map(params![food_id], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<std::result::Result<Vec<_>, _>>())?;

        foods_from_json(rows)
    }

    fn insert_favorite(&mut self, food: Food) -> Result<()> {
        let json = serde_json::to_string(&food)?;
        self.conn
            .prepare(sql_queries::INSERT_FAVORITE)?
            .execute(params![food.id, json])?;

        Ok(())
    }

    fn remove_favorite(&mut self, food_id: u64) -> Result<()> {
        let deleted = self
            .conn
            .prepare(sql_queries::DELETE_FAVORITE)?
            .execute(params![food_id])?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("No favorite with ID {}", food_id)).into());
        }
        Ok(())
    }

    fn insert_order(&mut self, request: NewOrder) -> Result<Order> {
        let id = self.current_id.fetch_add(1, Ordering::SeqCst);
        let order = Order::from_request(id, request);

        self.conn.prepare(sql_queries::INSERT_ORDER)?.execute(params![
            order.id,
            order.food_id,
            serde_json::to_string(&order)?
        ])?;

        Ok(order)
    }
}
