//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One process-scoped pool, passed explicitly; no global connection
//! - Every query is parameterized and bounded by a timeout
//! - Rely on DB constraints, handle conflicts with ON CONFLICT
//! - Transactions for multi-step operations

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_lazy};
pub use sqlx::PgPool;
pub use repos::*;
