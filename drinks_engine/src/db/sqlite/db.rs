use std::fmt::Debug;

use sqlx::SqlitePool;

use crate::{
    db::sqlite::{drinks, new_pool},
    db_types::{Drink, NewDrink},
    traits::{DrinkManagement, DrinkStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool with the given maximum number of connections.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, DrinkStoreError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), DrinkStoreError> {
        sqlx::migrate!("./src/db/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DrinkStoreError::DatabaseError(e.to_string()))
    }
}

impl DrinkManagement for SqliteDatabase {
    async fn fetch_all_drinks(&self) -> Result<Vec<Drink>, DrinkStoreError> {
        let mut conn = self.pool.acquire().await?;
        drinks::fetch_all_drinks(&mut conn).await
    }

    async fn fetch_drink_by_id(&self, id: i64) -> Result<Option<Drink>, DrinkStoreError> {
        let mut conn = self.pool.acquire().await?;
        drinks::fetch_drink_by_id(id, &mut conn).await
    }

    async fn insert_drink(&self, drink: NewDrink) -> Result<Drink, DrinkStoreError> {
        let mut tx = self.pool.begin().await?;
        let drink = drinks::insert_drink(drink, &mut tx).await?;
        tx.commit().await?;
        Ok(drink)
    }

    async fn update_drink(&self, id: i64, drink: NewDrink) -> Result<Option<Drink>, DrinkStoreError> {
        let mut tx = self.pool.begin().await?;
        let drink = drinks::update_drink(id, drink, &mut tx).await?;
        tx.commit().await?;
        Ok(drink)
    }

    async fn delete_drink(&self, id: i64) -> Result<Option<i64>, DrinkStoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = drinks::delete_drink(id, &mut tx).await?;
        tx.commit().await?;
        Ok(deleted)
    }
}
