//! The module contains the errors the engine can throw.
//!
//! The split/settlement core produces a small, typed taxonomy
//! ([`EmptyMemberSet`], [`InvalidMembers`], [`AmountMismatch`],
//! [`EmptyBalances`]); the remaining variants cover the storage-backed
//! operations around it.
//!
//!  [`EmptyMemberSet`]: EngineError::EmptyMemberSet
//!  [`InvalidMembers`]: EngineError::InvalidMembers
//!  [`AmountMismatch`]: EngineError::AmountMismatch
//!  [`EmptyBalances`]: EngineError::EmptyBalances
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot split payment: list has no members")]
    EmptyMemberSet,
    #[error("some members are not part of this list: {0}")]
    InvalidMembers(String),
    #[error("paid amounts don't add up to total: {0}")]
    AmountMismatch(String),
    #[error("cannot settle: no member balances")]
    EmptyBalances,
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmptyMemberSet, Self::EmptyMemberSet) => true,
            (Self::InvalidMembers(a), Self::InvalidMembers(b)) => a == b,
            (Self::AmountMismatch(a), Self::AmountMismatch(b)) => a == b,
            (Self::EmptyBalances, Self::EmptyBalances) => true,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
