//! Budget mechanics: a floor raised by research, interpolated up to the
//! ceiling by reputation.

use crate::settings::Settings;

/// Reputation at which the budget reaches `max_funding`.
pub const REP_SPAN: f64 = 1000.0;

/// Headroom kept between the raised floor and `max_funding`.
pub const FLOOR_HEADROOM: i64 = 1000;

/// Funds per reputation point: (max - min) / 1000. Negative when misconfigured.
#[inline]
pub fn funds_per_rep(min_funding: i64, max_funding: i64) -> f64 {
    (max_funding as f64 - min_funding as f64) / REP_SPAN
}

/// Floor at 0 reputation: min + spent * per_sci, capped at max - 1000.
#[inline]
pub fn effective_min(
    min_funding: i64,
    max_funding: i64,
    science_spent: i64,
    funding_per_science: i64,
) -> i64 {
    let raised = min_funding.saturating_add(science_spent.saturating_mul(funding_per_science));
    raised.min(max_funding.saturating_sub(FLOOR_HEADROOM))
}

/// budget = floor(effective_min + rep * max(0, funds_per_rep)).
#[inline]
pub fn compute_budget(settings: &Settings, science_spent: i64, reputation: f64) -> i64 {
    let floor = effective_min(
        settings.min_funding,
        settings.max_funding,
        science_spent,
        settings.funding_per_science,
    );
    let slope = funds_per_rep(settings.min_funding, settings.max_funding).max(0.0);
    let raw = (floor as f64 + reputation * slope).floor();
    // `as` saturates; NaN (non-finite reputation) falls back to the floor.
    if raw.is_nan() { floor } else { raw as i64 }
}
