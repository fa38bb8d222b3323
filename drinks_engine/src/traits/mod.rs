//! Storage contracts for the drinks engine.
//!
//! This module defines the behaviour a database backend needs to expose in order to act as the
//! store for the drinks menu. The server only ever talks to a backend through
//! [`DrinkManagement`], which makes swapping the Sqlite implementation for a mock (in tests) or
//! another database a local change.

mod drink_management;

pub use drink_management::{DrinkManagement, DrinkStoreError};
