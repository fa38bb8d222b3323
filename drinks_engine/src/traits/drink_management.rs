use thiserror::Error;

use crate::db_types::{Drink, NewDrink};

#[derive(Debug, Clone, Error)]
pub enum DrinkStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("A drink titled '{0}' already exists")]
    DuplicateTitle(String),
    #[error("Stored recipe is not valid JSON. {0}")]
    MalformedRecipe(String),
}

impl From<sqlx::Error> for DrinkStoreError {
    fn from(e: sqlx::Error) -> Self {
        DrinkStoreError::DatabaseError(e.to_string())
    }
}

/// The `DrinkManagement` trait defines the store operations for drink records. Each call is
/// atomic: it either completes fully or leaves the store untouched. Concurrent writes to the same
/// record resolve last-committed-wins.
#[allow(async_fn_in_trait)]
pub trait DrinkManagement {
    /// Fetches every drink in the store, in ascending id order.
    async fn fetch_all_drinks(&self) -> Result<Vec<Drink>, DrinkStoreError>;

    /// Fetches the drink with the given id. If no such drink exists, `None` is returned.
    async fn fetch_drink_by_id(&self, id: i64) -> Result<Option<Drink>, DrinkStoreError>;

    /// Inserts a new drink and returns the stored record, including its store-assigned id.
    async fn insert_drink(&self, drink: NewDrink) -> Result<Drink, DrinkStoreError>;

    /// Replaces the title and recipe of the drink with the given id wholesale. Returns the
    /// updated record, or `None` if the id does not exist.
    async fn update_drink(&self, id: i64, drink: NewDrink) -> Result<Option<Drink>, DrinkStoreError>;

    /// Deletes the drink with the given id. Returns the id of the deleted record, or `None` if
    /// the id does not exist.
    async fn delete_drink(&self, id: i64) -> Result<Option<i64>, DrinkStoreError>;
}
