//! Payment categories.
//!
//! A closed set: categories double as the default description for a payment
//! that was logged without one, so the string forms are part of the API.

use serde::{Deserialize, Serialize};

use crate::EngineError;

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

impl PaymentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Groceries => "groceries",
            Self::Travel => "travel",
            Self::Entertainment => "entertainment",
            Self::Utilities => "utilities",
            Self::Rent => "rent",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for PaymentCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "food" => Ok(Self::Food),
            "groceries" => Ok(Self::Groceries),
            "travel" => Ok(Self::Travel),
            "entertainment" => Ok(Self::Entertainment),
            "utilities" => Ok(Self::Utilities),
            "rent" => Ok(Self::Rent),
            "shopping" => Ok(Self::Shopping),
            "other" => Ok(Self::Other),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid payment category: {other}"
            ))),
        }
    }
}
