use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub username: String,
        /// Defaults to the username when absent or blank.
        pub nickname: Option<String>,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreated {
        pub username: String,
        pub nickname: String,
    }
}

pub mod list {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ListNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ListRename {
        pub name: String,
    }

    /// Query parameters for browsing lists.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ListsQuery {
        /// 1-based page number, defaults to 1.
        pub page: Option<u64>,
        /// Page size, defaults to 10.
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub username: String,
        pub nickname: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ListView {
        pub id: String,
        pub name: String,
        /// Short code others use to join the list.
        pub share_code: String,
        pub total_amount_minor: i64,
        pub members: Vec<MemberView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ListsResponse {
        pub lists: Vec<ListView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ListDetailResponse {
        pub list: ListView,
        pub payments: Vec<super::payment::PaymentView>,
    }
}

pub mod payment {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentCategory {
        Food,
        Groceries,
        Travel,
        Entertainment,
        Utilities,
        Rent,
        Shopping,
        Other,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PaidBy {
        pub member: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        pub amount_minor: i64,
        pub is_equally_paid: bool,
        /// Required unless `is_equally_paid` is set (the split is derived
        /// then, and any supplied entries are ignored).
        pub paid_by: Option<Vec<PaidBy>>,
        pub category: PaymentCategory,
        pub payment_for: Option<String>,
    }

    /// Partial payment edit; absent fields keep their prior values.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentEdit {
        pub amount_minor: Option<i64>,
        pub payment_for: Option<String>,
        pub is_equally_paid: Option<bool>,
        pub category: Option<PaymentCategory>,
        pub paid_by: Option<Vec<PaidBy>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub payment_for: String,
        pub category: PaymentCategory,
        pub is_equally_paid: bool,
        pub paid_by: Vec<PaidBy>,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpendView {
        pub username: String,
        pub nickname: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpendResponse {
        pub members: Vec<SpendView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayableView {
        pub from_user: String,
        pub to_user: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayablesResponse {
        pub transactions: Vec<PayableView>,
    }
}
