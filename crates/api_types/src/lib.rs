//! JSON shapes shared by the HTTP API and its clients.

use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// One live expense as returned by `GET /v1/expenses`.
    ///
    /// `category` and `payment_type` are human readable labels, `amount` is a
    /// decimal string with two fractional digits.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Uuid,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        pub category: String,
        pub payment_type: String,
        pub description: String,
        pub amount: String,
        pub user_id: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseList {
        /// `<= 0` or missing means no limit.
        pub limit: Option<i64>,
    }
}

pub mod category {
    use super::*;

    /// Entry of `GET /v1/categories`: the stable ordinal and its label.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: u8,
        pub name: String,
    }

    /// Body of `PUT /v1/expenses/{id}/category`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub category: u8,
    }
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
