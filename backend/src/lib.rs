//! Bakery GET API Library
//!
//! Read-only catalog of bakeries and their baked goods, served over HTTP:
//! - Diesel schema, entities and the SQLite connection pool
//! - Catalog queries (bakeries with nested goods, goods by price)
//! - actix-web handlers shaping each endpoint's JSON response

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod schema;
pub mod services;
