//! Conversion mechanics: price a funds deviation in reputation and science.

/// Funds per science point, the host's fixed exchange convention.
pub const FUNDS_PER_SCIENCE: f64 = 10_000.0;

/// Reputation lost for spending `deficit` below the budget.
/// Zero when the rate is off or funds/rep is degenerate.
#[inline]
pub fn penalty(deficit: f64, percent: f64, funds_per_rep: f64) -> f64 {
    rep_rate(deficit, percent, funds_per_rep)
}

/// Reputation gained for holding `surplus` above the budget.
#[inline]
pub fn rep_bonus(surplus: f64, percent: f64, funds_per_rep: f64) -> f64 {
    rep_rate(surplus, percent, funds_per_rep)
}

/// Science gained for holding `surplus` above the budget.
#[inline]
pub fn sci_bonus(surplus: f64, percent: f64) -> f64 {
    if percent > 0.0 {
        surplus * percent / FUNDS_PER_SCIENCE
    } else {
        0.0
    }
}

#[inline]
fn rep_rate(amount: f64, percent: f64, funds_per_rep: f64) -> f64 {
    if percent > 0.0 && funds_per_rep > 0.0 {
        amount * percent / funds_per_rep
    } else {
        0.0
    }
}
