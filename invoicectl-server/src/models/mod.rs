//! Dashboard view models and input validation
//!
//! Rows coming out of the database are reshaped into these types before
//! they reach a handler. Monetary values stay integer cents until
//! [`format_currency`] turns them into display strings.

pub mod card;
pub mod invoice;
pub mod money;
pub mod pagination;
pub mod revenue;
pub mod validation;

pub use card::{CardData, DashboardOverview};
pub use invoice::{InvoiceStatus, InvoiceTableRow, LatestInvoice, SearchQuery};
pub use money::format_currency;
pub use pagination::{Paginated, Pagination, SearchParams, INVOICES_PER_PAGE};
pub use revenue::Revenue;
pub use validation::ValidationError;
