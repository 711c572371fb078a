//! invoicectl-server: invoice dashboard backend
//!
//! Data access for the dashboard (revenue, latest invoices, summary cards,
//! invoice search), a transactional seed procedure, and the HTTP surface
//! that exposes both.

pub mod config;
pub mod data;
pub mod db;
pub mod http;
pub mod models;
pub mod seed;

pub use config::{AppConfig, ConfigError, EmptyResultPolicy};
pub use data::{Dashboard, DataFetchError, FetchErrorKind, FetchOperation};
pub use seed::{seed_database, Fixtures, SeedError, SeedReport};
