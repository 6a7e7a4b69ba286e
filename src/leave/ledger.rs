//! Pure balance arithmetic. Exactly one debit per submitted request and
//! exactly one matching credit if that request later becomes cancelled or
//! rejected; approved requests keep the debit. Neither operation is
//! idempotent. The single-transition guarantee of the lifecycle engine is
//! what prevents a double credit, not anything in here.

/// New balance after deducting `days`, or `None` when the deduction would
/// underflow. Validation makes underflow unreachable in the normal path;
/// a `None` here means a concurrent debit won the race.
pub fn debit(balance: u32, days: u32) -> Option<u32> {
    balance.checked_sub(days)
}

/// New balance after restoring `days`.
pub fn credit(balance: u32, days: u32) -> u32 {
    balance.saturating_add(days)
}
