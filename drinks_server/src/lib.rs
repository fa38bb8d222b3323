//! # Drinks server
//! This module hosts the HTTP server for the drinks menu API. It is responsible for:
//! Routing incoming requests to their handlers.
//! Verifying bearer tokens against the trusted issuer's signing keys and enforcing the
//! permission each route requires.
//! Translating every failure into a uniform JSON error envelope.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/drinks`: The public menu listing, and (with `post:drinks`) drink creation.
//! * `/drinks-detail`: The full menu listing, including ingredient names.
//! * `/drinks/{id}`: Wholesale replacement and deletion of a single drink.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
