//! Data objects for drink records.
//!
//! A drink is a title plus a recipe: an ordered list of ingredients, each with a display colour
//! and a relative quantity. The recipe is persisted as a serialized JSON blob and parsed again on
//! read; a row that fails to parse is a storage error, never a silently empty recipe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single entry in a drink's recipe. `parts` is a relative quantity, so a recipe of
/// `[milk: 3, espresso: 1]` reads as three parts milk to one part espresso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// A drink record as stored. Serializing this struct directly yields the long projection,
/// including ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// The short projection of this drink. Ingredient names are hidden; only the colour and
    /// relative quantity of each ingredient are exposed.
    pub fn summary(&self) -> DrinkSummary {
        let recipe = self
            .recipe
            .iter()
            .map(|i| IngredientAmount { color: i.color.clone(), parts: i.parts })
            .collect();
        DrinkSummary { id: self.id, title: self.title.clone(), recipe }
    }
}

/// One recipe entry in the short projection. Same as [`Ingredient`], minus the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub color: String,
    pub parts: u32,
}

/// The short projection of a drink. See [`Drink::summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientAmount>,
}

/// Payload for creating a drink, or replacing one wholesale. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrinkValidationError {
    #[error("title was not provided")]
    MissingTitle,
    #[error("recipe was not provided")]
    MissingRecipe,
    #[error("ingredient '{0}' must have at least one part")]
    ZeroParts(String),
}

impl NewDrink {
    /// Checks the payload before it goes anywhere near the database. The title must be non-empty,
    /// the recipe must have at least one ingredient, and every ingredient needs a positive number
    /// of parts.
    pub fn validate(&self) -> Result<(), DrinkValidationError> {
        if self.title.trim().is_empty() {
            return Err(DrinkValidationError::MissingTitle);
        }
        if self.recipe.is_empty() {
            return Err(DrinkValidationError::MissingRecipe);
        }
        if let Some(i) = self.recipe.iter().find(|i| i.parts == 0) {
            return Err(DrinkValidationError::ZeroParts(i.name.clone()));
        }
        Ok(())
    }
}
