//! Funding floor controller.
//!
//! Owns the economy state (budget, science spent, funds/rep cache) and runs
//! one update cycle per notification:
//!
//! - funds changed: `recompute → reconcile → recompute → clamp`
//! - research, settings applied: bump the counter or swap the settings
//!   first, then the same full cycle
//! - reputation or science changed: `recompute → clamp`
//!
//! Reputation/science echoes of a conversion never reconcile again, and the
//! final `funds := budget` write makes the funds echo a no-op, so a cycle
//! cannot feed itself.

use tracing::{debug, info};

use crate::mechanics::{budget, control};
use crate::persist::ScenarioState;
use crate::settings::Settings;
use crate::systems::sdk::{Host, ResearchResult, ResourceListener, TransactionReason};

pub struct BudgetController<H> {
    host: H,
    settings: Settings,
    budget: i64,
    science_spent: i64,
    funds_per_rep: f64,
}

impl<H: Host> BudgetController<H> {
    /// Reads the settings snapshot from the host and restores the persisted
    /// counter. Call [`start`](Self::start) before relying on `budget()`.
    pub fn new(host: H, state: ScenarioState) -> Self {
        let settings = host.settings();
        let funds_per_rep = budget::funds_per_rep(settings.min_funding, settings.max_funding);
        Self {
            host,
            settings,
            budget: 0,
            science_spent: state.science_spent.max(0),
            funds_per_rep,
        }
    }

    /// Compute the first budget and clamp funds to it. No conversion: the
    /// funds found at load time are not income or expenditure.
    pub fn start(&mut self) {
        info!(science_spent = self.science_spent, "starting funding floor");
        if self.recompute() {
            self.clamp();
        }
        info!(budget = self.budget, "funding floor started");
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn science_spent(&self) -> i64 {
        self.science_spent
    }

    pub fn funds_per_rep(&self) -> f64 {
        self.funds_per_rep
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// What to persist.
    pub fn snapshot(&self) -> ScenarioState {
        ScenarioState { science_spent: self.science_spent }
    }

    /// Full cycle: recompute, convert the deviation, recompute, clamp.
    pub fn update_funding(&mut self) {
        if !self.recompute() {
            return;
        }
        let Some(funds) = self.host.funds() else {
            debug!("funds subsystem unavailable, skipping reconcile");
            return;
        };

        let r = control::reconcile(funds, self.budget, &self.settings);
        if r.is_noop() {
            return;
        }
        debug!(
            funds,
            budget = self.budget,
            reputation_delta = r.reputation_delta,
            science_delta = r.science_delta,
            "reconciling funds"
        );
        if r.reputation_delta != 0.0 {
            self.host.add_reputation(r.reputation_delta);
        }
        if r.science_delta != 0.0 {
            self.host.add_science(r.science_delta);
        }

        // Reputation just moved, so the budget did too.
        self.recompute();
        self.clamp();
    }

    /// Add a successful unlock's cost to the science-spent counter.
    pub fn record_research(&mut self, cost: i64) {
        self.science_spent = self.science_spent.saturating_add(cost.max(0));
        info!(cost, total = self.science_spent, "technology researched");
    }

    /// Swap the whole settings snapshot.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.funds_per_rep =
            budget::funds_per_rep(self.settings.min_funding, self.settings.max_funding);
    }

    /// Returns `false` when reputation is not available yet.
    fn recompute(&mut self) -> bool {
        let Some(rep) = self.host.reputation() else {
            debug!("reputation subsystem unavailable, budget unchanged");
            return false;
        };
        self.funds_per_rep =
            budget::funds_per_rep(self.settings.min_funding, self.settings.max_funding);
        self.budget = budget::compute_budget(&self.settings, self.science_spent, rep);
        debug!(
            min = self.settings.min_funding,
            max = self.settings.max_funding,
            sci = self.science_spent,
            rep,
            funds_per_rep = self.funds_per_rep,
            budget = self.budget,
            "budget recalculated"
        );
        true
    }

    fn clamp(&mut self) {
        let Some(funds) = self.host.funds() else {
            return;
        };
        if let Some(target) = control::clamp_funds(funds, self.budget, self.settings.keeps_excess())
        {
            info!(from = funds, to = target, "setting player funds");
            self.host.set_funds(target);
        }
    }
}

impl<H: Host> ResourceListener for BudgetController<H> {
    fn on_funds_changed(&mut self, value: f64, reason: TransactionReason) {
        debug!(new = value, ?reason, "funds changed");
        self.update_funding();
    }

    fn on_reputation_changed(&mut self, value: f64, reason: TransactionReason) {
        debug!(new = value, ?reason, "reputation changed");
        if self.recompute() {
            self.clamp();
        }
    }

    fn on_science_changed(&mut self, value: f64, reason: TransactionReason) {
        debug!(new = value, ?reason, "science changed");
        if self.recompute() {
            self.clamp();
        }
    }

    fn on_technology_researched(&mut self, tech_id: &str, cost: i64, result: ResearchResult) {
        if result != ResearchResult::Success {
            debug!(tech_id, ?result, "research did not complete, ignored");
            return;
        }
        debug!(tech_id, "research completed");
        self.record_research(cost);
        self.update_funding();
    }

    fn on_settings_applied(&mut self) {
        info!("settings applied, reloading");
        let settings = self.host.settings();
        self.apply_settings(settings);
        self.update_funding();
    }
}
