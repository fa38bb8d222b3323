//! Drinks Engine
//!
//! The drinks engine is the persistence layer for the drinks menu API. It owns the domain types
//! for drink records and their recipes, and it knows how to store and retrieve them. It has no
//! knowledge of HTTP, tokens or permissions; those live in the server crate.
//!
//! The crate is divided into three main sections:
//! 1. Database management and control ([`mod@db`]). Sqlite is the only supported backend right
//!    now, but all access goes through the [`traits::DrinkManagement`] trait, so adding a new
//!    backend means implementing that trait and nothing else. The data types used in the database
//!    are defined in the `db_types` module and are public.
//! 2. The storage trait contracts ([`mod@traits`]). Backends implement [`traits::DrinkManagement`]
//!    to provide the list/get/insert/update/delete operations the menu needs.
//! 3. The public API ([`DrinkApi`]). A thin facade over a backend that the server holds and calls.
//!    Consumers should never need to touch the database directly.

mod api;
mod db;

pub mod db_types;
pub mod traits;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use api::DrinkApi;
pub use db::sqlite::SqliteDatabase;
