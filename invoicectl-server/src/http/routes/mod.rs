//! Route handlers organized by resource

pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod seed;
