//! In-memory host: the three resource pools, the settings store and an
//! outbox of notifications waiting to be dispatched.
//!
//! Cloning a `MemoryHost` yields another handle to the same state, so the
//! controller and the driver can both hold one. Borrows never outlive a
//! single call.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::settings::Settings;
use crate::systems::sdk::{
    Notification, ResearchResult, ResourceOracle, ResourceSink, SettingsSource, TransactionReason,
};

/// Resource pools. `None` means the subsystem is not initialised.
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
    pub funds: Option<f64>,
    pub reputation: Option<f64>,
    pub science: Option<f64>,
    pub settings: Settings,
}

#[derive(Debug)]
struct Inner {
    ledger: Ledger,
    outbox: VecDeque<Notification>,
}

#[derive(Clone, Debug)]
pub struct MemoryHost {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryHost {
    pub fn new(funds: f64, reputation: f64, science: f64, settings: Settings) -> Self {
        Self::from_ledger(Ledger {
            funds: Some(funds),
            reputation: Some(reputation),
            science: Some(science),
            settings,
        })
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner { ledger, outbox: VecDeque::new() })),
        }
    }

    pub fn ledger(&self) -> Ledger {
        self.inner.borrow().ledger.clone()
    }

    /// Bring a missing subsystem online (or replace its value) silently.
    pub fn set_ledger(&self, ledger: Ledger) {
        self.inner.borrow_mut().ledger = ledger;
    }

    pub fn post(&self, n: Notification) {
        self.inner.borrow_mut().outbox.push_back(n);
    }

    pub fn pop(&self) -> Option<Notification> {
        self.inner.borrow_mut().outbox.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().outbox.len()
    }

    /// Host-side funds transaction (contract payout, vessel rollout, ...).
    pub fn change_funds(&self, delta: f64, reason: TransactionReason) {
        if let Some(value) = self.bump(|l| &mut l.funds, delta) {
            self.post(Notification::FundsChanged { value, reason });
        }
    }

    pub fn change_reputation(&self, delta: f64, reason: TransactionReason) {
        if let Some(value) = self.bump(|l| &mut l.reputation, delta) {
            self.post(Notification::ReputationChanged { value, reason });
        }
    }

    pub fn change_science(&self, delta: f64, reason: TransactionReason) {
        if let Some(value) = self.bump(|l| &mut l.science, delta) {
            self.post(Notification::ScienceChanged { value, reason });
        }
    }

    /// Unlock a technology. Fails without spending when science is short.
    pub fn research(&self, tech_id: &str, cost: i64) -> ResearchResult {
        let available = self.inner.borrow().ledger.science.unwrap_or(0.0);
        let result = if available >= cost as f64 {
            self.change_science(-(cost as f64), TransactionReason::RnDTechResearch);
            ResearchResult::Success
        } else {
            ResearchResult::Failure
        };
        self.post(Notification::TechnologyResearched {
            tech_id: tech_id.to_string(),
            cost,
            result,
        });
        result
    }

    /// Store a new settings snapshot and announce it.
    pub fn apply_settings(&self, settings: Settings) {
        self.inner.borrow_mut().ledger.settings = settings;
        self.post(Notification::SettingsApplied);
    }

    fn bump(&self, pool: impl FnOnce(&mut Ledger) -> &mut Option<f64>, delta: f64) -> Option<f64> {
        let mut inner = self.inner.borrow_mut();
        let slot = pool(&mut inner.ledger).as_mut()?;
        *slot += delta;
        Some(*slot)
    }
}

impl ResourceOracle for MemoryHost {
    fn funds(&self) -> Option<f64> {
        self.inner.borrow().ledger.funds
    }

    fn reputation(&self) -> Option<f64> {
        self.inner.borrow().ledger.reputation
    }

    fn science(&self) -> Option<f64> {
        self.inner.borrow().ledger.science
    }
}

// Writes from the controller echo back as notifications, like the game does.
impl ResourceSink for MemoryHost {
    fn set_funds(&mut self, amount: f64) {
        let value = {
            let mut inner = self.inner.borrow_mut();
            let Some(slot) = inner.ledger.funds.as_mut() else {
                return;
            };
            *slot = amount;
            amount
        };
        self.post(Notification::FundsChanged { value, reason: TransactionReason::None });
    }

    fn add_reputation(&mut self, delta: f64) {
        self.change_reputation(delta, TransactionReason::None);
    }

    fn add_science(&mut self, delta: f64) {
        self.change_science(delta, TransactionReason::None);
    }
}

impl SettingsSource for MemoryHost {
    fn settings(&self) -> Settings {
        self.inner.borrow().ledger.settings.clone()
    }
}
