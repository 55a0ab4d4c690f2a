//! Fee policy: whole-percentage splits with floor rounding.
//!
//! `fee = amount * percent / 100`, truncated toward zero, so the protocol
//! never overcharges; the remainder stays with the payer. Percentages are
//! validated into [0, 100] when configured, not here.

/// Upper bound for any configured fee percentage.
pub const MAX_FEE_PERCENT: u32 = 100;

/// Fee taken from `amount` at `percent`.
pub fn fee_on(amount: i128, percent: u32) -> i128 {
    amount * percent as i128 / 100
}

/// Split `amount` into `(net, fee)` where `net + fee == amount`.
pub fn apply_fee(amount: i128, percent: u32) -> (i128, i128) {
    let fee = fee_on(amount, percent);
    (amount - fee, fee)
}
