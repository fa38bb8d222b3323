//! Query functions for the drinks table.
//!
//! Each function takes a `SqliteConnection` so callers can compose them inside a transaction by
//! passing `&mut *tx` as the connection argument.

use log::trace;
use sqlx::{FromRow, Row, SqliteConnection};

use crate::{
    db_types::{Drink, Ingredient, NewDrink},
    traits::DrinkStoreError,
};

/// A raw drinks row. The recipe column holds the JSON-serialized ingredient list.
#[derive(Debug, FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl DrinkRow {
    fn into_drink(self) -> Result<Drink, DrinkStoreError> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&self.recipe)
            .map_err(|e| DrinkStoreError::MalformedRecipe(format!("drink {}: {e}", self.id)))?;
        Ok(Drink { id: self.id, title: self.title, recipe })
    }
}

fn serialize_recipe(recipe: &[Ingredient]) -> Result<String, DrinkStoreError> {
    serde_json::to_string(recipe).map_err(|e| DrinkStoreError::MalformedRecipe(e.to_string()))
}

pub async fn fetch_all_drinks(conn: &mut SqliteConnection) -> Result<Vec<Drink>, DrinkStoreError> {
    let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id ASC")
        .fetch_all(conn)
        .await?;
    rows.into_iter().map(DrinkRow::into_drink).collect()
}

pub async fn fetch_drink_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Drink>, DrinkStoreError> {
    let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    row.map(DrinkRow::into_drink).transpose()
}

pub async fn insert_drink(drink: NewDrink, conn: &mut SqliteConnection) -> Result<Drink, DrinkStoreError> {
    let recipe = serialize_recipe(&drink.recipe)?;
    let row = sqlx::query("INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id")
        .bind(&drink.title)
        .bind(&recipe)
        .fetch_one(conn)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => DrinkStoreError::DuplicateTitle(drink.title.clone()),
            _ => e.into(),
        })?;
    let id = row.get::<i64, _>(0);
    trace!("🗃️ Drink '{}' has been saved in the DB with id {id}", drink.title);
    Ok(Drink { id, title: drink.title, recipe: drink.recipe })
}

/// Replaces the title and recipe for the given id. The last committed write wins; Sqlite's single
/// writer lock serializes racing updates and deletes on the same row.
pub async fn update_drink(
    id: i64,
    drink: NewDrink,
    conn: &mut SqliteConnection,
) -> Result<Option<Drink>, DrinkStoreError> {
    let recipe = serialize_recipe(&drink.recipe)?;
    let result = sqlx::query("UPDATE drinks SET title = $1, recipe = $2 WHERE id = $3")
        .bind(&drink.title)
        .bind(&recipe)
        .bind(id)
        .execute(conn)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => DrinkStoreError::DuplicateTitle(drink.title.clone()),
            _ => e.into(),
        })?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    trace!("🗃️ Drink {id} has been replaced with '{}'", drink.title);
    Ok(Some(Drink { id, title: drink.title, recipe: drink.recipe }))
}

pub async fn delete_drink(id: i64, conn: &mut SqliteConnection) -> Result<Option<i64>, DrinkStoreError> {
    let result = sqlx::query("DELETE FROM drinks WHERE id = $1").bind(id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }
    trace!("🗃️ Drink {id} has been deleted");
    Ok(Some(id))
}
