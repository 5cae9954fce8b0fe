//! Internal helpers shared by the engine modules.
//!
//! These utilities are **not** part of the public API.

use uuid::Uuid;

/// Divides `total` by `n`, rounding half-up to the nearest whole minor unit.
///
/// This is the engine-wide replacement for "round to 2 decimal places" on
/// amounts expressed in currency units: with amounts stored as integer cents,
/// rounding to cents is rounding to integers.
///
/// `total` must be >= 0 and `n` > 0 (all call sites divide non-negative
/// contribution sums by a member count).
pub(crate) fn div_round_half_up(total: i64, n: i64) -> i64 {
    debug_assert!(total >= 0 && n > 0);
    (2 * total + n) / (2 * n)
}

/// Generates a short share code (6 chars, `A-Z a-z 0-9`) for joining a list.
///
/// Derived from UUID bytes rather than a dedicated RNG; codes are join
/// handles, not secrets, and the `lists.share_code` unique index catches the
/// rare collision.
pub(crate) fn generate_share_code() -> String {
    const SEQUENCE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcdefghijklmnopqrstuvwxyz";
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(6)
        .map(|byte| SEQUENCE[*byte as usize % SEQUENCE.len()] as char)
        .collect()
}
