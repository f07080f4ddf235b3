//! Course catalog backend: courses and users over a REST API backed by SQLite.

pub mod api;
pub mod authz;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
