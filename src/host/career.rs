//! Career driver.
//!
//! Wires a [`MemoryHost`], a [`MemoryBus`] and a [`BudgetController`]
//! together and plays the game's side: every player action mutates the
//! ledger, then the outbox is drained through the bus until nothing is
//! pending. Drains are bounded so a misbehaving listener cannot spin forever.

use std::cell::{Ref, RefCell};
use std::path::Path;
use std::rc::Rc;

use tracing::warn;

use crate::host::bus::MemoryBus;
use crate::host::memory::{Ledger, MemoryHost};
use crate::persist::{self, PersistError, ScenarioState};
use crate::settings::Settings;
use crate::systems::funding_floor::BudgetController;
use crate::systems::sdk::{ListenerId, NotificationBus, ResearchResult, TransactionReason};
use crate::{Settled, settle};

/// Upper bound on dispatches per drain.
pub const MAX_DISPATCHES: usize = 64;

pub struct Career {
    host: MemoryHost,
    bus: MemoryBus,
    controller: Rc<RefCell<BudgetController<MemoryHost>>>,
    listener: Option<ListenerId>,
    max_dispatches: usize,
}

impl Career {
    /// Start the controller against `host` and attach it.
    pub fn start(host: MemoryHost, state: ScenarioState) -> Self {
        let mut controller = BudgetController::new(host.clone(), state);
        controller.start();
        let controller = Rc::new(RefCell::new(controller));

        let mut bus = MemoryBus::new();
        let listener = Some(bus.attach(controller.clone()));

        let mut career = Self {
            host,
            bus,
            controller,
            listener,
            max_dispatches: MAX_DISPATCHES,
        };
        career.pump();
        career
    }

    /// Restore the scenario file at `path` (missing file: fresh career).
    pub fn resume(host: MemoryHost, path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let state = persist::load(path)?;
        Ok(Self::start(host, state))
    }

    pub fn with_max_dispatches(mut self, max_dispatches: usize) -> Self {
        self.max_dispatches = max_dispatches;
        self
    }

    /// Detach the controller. Later notifications are still drained but
    /// reach nobody.
    pub fn stop(&mut self) {
        if let Some(id) = self.listener.take() {
            self.bus.detach(id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Drain pending notifications through the bus.
    pub fn pump(&mut self) -> Settled {
        let host = &self.host;
        let bus = &mut self.bus;
        let settled = settle(
            || match host.pop() {
                Some(n) => {
                    bus.dispatch(&n);
                    true
                }
                None => bus.retry_deferred() > 0,
            },
            self.max_dispatches,
        );
        if !settled.quiescent {
            warn!(
                steps = settled.steps,
                pending = self.host.pending(),
                "notification drain hit its bound"
            );
        }
        settled
    }

    pub fn spend(&mut self, amount: f64, reason: TransactionReason) -> Settled {
        self.host.change_funds(-amount, reason);
        self.pump()
    }

    pub fn earn(&mut self, amount: f64, reason: TransactionReason) -> Settled {
        self.host.change_funds(amount, reason);
        self.pump()
    }

    pub fn gain_reputation(&mut self, delta: f64, reason: TransactionReason) -> Settled {
        self.host.change_reputation(delta, reason);
        self.pump()
    }

    pub fn gain_science(&mut self, delta: f64, reason: TransactionReason) -> Settled {
        self.host.change_science(delta, reason);
        self.pump()
    }

    pub fn research(&mut self, tech_id: &str, cost: i64) -> ResearchResult {
        let result = self.host.research(tech_id, cost);
        self.pump();
        result
    }

    pub fn apply_settings(&mut self, settings: Settings) -> Settled {
        self.host.apply_settings(settings);
        self.pump()
    }

    pub fn budget(&self) -> i64 {
        self.controller.borrow().budget()
    }

    pub fn science_spent(&self) -> i64 {
        self.controller.borrow().science_spent()
    }

    pub fn ledger(&self) -> Ledger {
        self.host.ledger()
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn controller(&self) -> Ref<'_, BudgetController<MemoryHost>> {
        self.controller.borrow()
    }

    pub fn snapshot(&self) -> ScenarioState {
        self.controller.borrow().snapshot()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        persist::save(path, &self.snapshot())
    }
}
