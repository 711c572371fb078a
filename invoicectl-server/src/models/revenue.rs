//! Monthly revenue rows

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One month of the revenue chart. `month` is a short code such as `"Jan"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}
