//! Unified API for accessing the drinks menu.

use std::fmt::Debug;

use log::trace;

use crate::{
    db_types::{Drink, NewDrink},
    traits::{DrinkManagement, DrinkStoreError},
};

/// The `DrinkApi` provides a unified API for managing drink records over any backend that
/// implements [`DrinkManagement`].
pub struct DrinkApi<B> {
    db: B,
}

impl<B: Debug> Debug for DrinkApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DrinkApi ({:?})", self.db)
    }
}

impl<B> DrinkApi<B>
where B: DrinkManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Fetches every drink on the menu in ascending id order.
    pub async fn fetch_all_drinks(&self) -> Result<Vec<Drink>, DrinkStoreError> {
        trace!("🍸️ Fetching all drinks");
        self.db.fetch_all_drinks().await
    }

    /// Fetches the drink with the given id, if it exists.
    pub async fn fetch_drink(&self, id: i64) -> Result<Option<Drink>, DrinkStoreError> {
        self.db.fetch_drink_by_id(id).await
    }

    /// Adds a new drink to the menu and returns it, with its store-assigned id.
    pub async fn create_drink(&self, drink: NewDrink) -> Result<Drink, DrinkStoreError> {
        trace!("🍸️ Creating drink '{}'", drink.title);
        self.db.insert_drink(drink).await
    }

    /// Replaces the title and recipe of an existing drink. `None` means the id was not found.
    pub async fn update_drink(&self, id: i64, drink: NewDrink) -> Result<Option<Drink>, DrinkStoreError> {
        trace!("🍸️ Updating drink {id}");
        self.db.update_drink(id, drink).await
    }

    /// Removes a drink from the menu. `None` means the id was not found.
    pub async fn delete_drink(&self, id: i64) -> Result<Option<i64>, DrinkStoreError> {
        trace!("🍸️ Deleting drink {id}");
        self.db.delete_drink(id).await
    }
}
