//! Sqlite backend for the drinks engine.

mod db;
pub mod drinks;

pub use db::SqliteDatabase;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::traits::DrinkStoreError;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, DrinkStoreError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
