//! Control mechanics: compare live funds against the budget and decide
//! the correction.

use crate::mechanics::{budget, convert};
use crate::settings::Settings;

/// Outcome of [`reconcile`]. `new_funds` is `None` when funds already match.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reconciliation {
    pub new_funds: Option<f64>,
    /// Signed: negative for a penalty.
    pub reputation_delta: f64,
    pub science_delta: f64,
}

impl Reconciliation {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.new_funds.is_none() && self.reputation_delta == 0.0 && self.science_delta == 0.0
    }
}

/// Deficit pays a reputation penalty, surplus earns reputation and science;
/// either way funds go back to the budget.
pub fn reconcile(live_funds: f64, budget: i64, settings: &Settings) -> Reconciliation {
    let target = budget as f64;
    if live_funds == target || (settings.keeps_excess() && live_funds >= target) {
        return Reconciliation::default();
    }

    let fpr = budget::funds_per_rep(settings.min_funding, settings.max_funding);
    let (reputation_delta, science_delta) = if live_funds < target {
        let deficit = target - live_funds;
        (-convert::penalty(deficit, settings.funding_penalty_percent, fpr), 0.0)
    } else {
        let surplus = live_funds - target;
        (
            convert::rep_bonus(surplus, settings.funding_bonus_percent, fpr),
            convert::sci_bonus(surplus, settings.science_bonus_percent),
        )
    };

    Reconciliation {
        new_funds: Some(target),
        reputation_delta,
        science_delta,
    }
}

/// Clamp step only: the funds to set, if any.
#[inline]
pub fn clamp_funds(live_funds: f64, budget: i64, keeps_excess: bool) -> Option<f64> {
    let target = budget as f64;
    if live_funds == target || (keeps_excess && live_funds >= target) {
        None
    } else {
        Some(target)
    }
}
