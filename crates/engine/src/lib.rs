//! Shared-expense ledger engine.
//!
//! The core is pure: [`allocate_payment`] distributes a payment's cost
//! across a list's members, [`aggregate_contributions`] folds a payment
//! history into per-member balances and [`compute_payables`] reduces them to
//! a minimal plan of transfers. Around it, [`Engine`]
//! hosts the storage-backed operations (users, lists, payments, reports)
//! that feed the core with consistent snapshots.

pub use categories::PaymentCategory;
pub use commands::{NewPayment, PaymentUpdate};
pub use error::EngineError;
pub use lists::List;
pub use ops::{Engine, EngineBuilder, MemberSpend};
pub use paid_by::PaidByEntry;
pub use payments::Payment;
pub use settlement::{MemberBalance, Payable, aggregate_contributions, compute_payables};
pub use split::{allocate_payment, apply_payment_update};
pub use users::Member;

mod categories;
mod commands;
mod error;
mod list_members;
mod lists;
mod ops;
mod paid_by;
mod payments;
mod settlement;
mod split;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
