pub mod api;
pub mod auth;
pub mod config;
pub mod docs;
pub mod error;
pub mod leave;
pub mod model;
pub mod routes;
pub mod seed;
pub mod store;
