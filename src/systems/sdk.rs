// src/systems/sdk.rs

//! # Host SDK
//!
//! The seam between the funding floor and whatever simulation hosts it.
//! The controller never reaches into global state; it is handed a host
//! handle and told when resources change.
//!
//! ## What a host provides
//! - [`ResourceOracle`]: read the live funds, reputation and science pools.
//!   Each read returns `None` while that subsystem is not initialised yet
//!   (e.g. the game has not created its funding ledger). The controller
//!   treats `None` as "nothing to do" and returns early.
//! - [`ResourceSink`]: write back. `set_funds` replaces the funds value,
//!   `add_reputation` / `add_science` apply signed deltas.
//! - [`SettingsSource`]: the current settings snapshot, read at start and
//!   again on every [`Notification::SettingsApplied`].
//!
//! Anything implementing all three is a [`Host`].
//!
//! ## Notifications
//! Hosts describe changes with [`Notification`] and deliver them through a
//! [`NotificationBus`] to attached [`ResourceListener`]s. Listeners override
//! only the callbacks they care about; the rest default to no-ops.
//!
//! ## Reentrancy contract
//! Writes made through [`ResourceSink`] while a listener is running must
//! not call back into that listener synchronously. Hosts queue the
//! resulting notifications and deliver them after the current callback
//! returns (see [`crate::host::MemoryBus`]). The controller ends every
//! cycle with `funds := budget`, so the queued echo is a no-op.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Why a resource changed, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionReason {
    None,
    ContractReward,
    ContractPenalty,
    VesselRecovery,
    VesselRollout,
    StructureConstruction,
    RnDTechResearch,
    ScienceTransmission,
    Other,
}

/// Outcome of a technology research attempt. Only `Success` is accounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResearchResult {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    FundsChanged { value: f64, reason: TransactionReason },
    ReputationChanged { value: f64, reason: TransactionReason },
    ScienceChanged { value: f64, reason: TransactionReason },
    TechnologyResearched { tech_id: String, cost: i64, result: ResearchResult },
    SettingsApplied,
}

pub trait ResourceOracle {
    fn funds(&self) -> Option<f64>;
    fn reputation(&self) -> Option<f64>;
    fn science(&self) -> Option<f64>;
}

pub trait ResourceSink {
    fn set_funds(&mut self, amount: f64);
    fn add_reputation(&mut self, delta: f64);
    fn add_science(&mut self, delta: f64);
}

pub trait SettingsSource {
    fn settings(&self) -> Settings;
}

pub trait Host: ResourceOracle + ResourceSink + SettingsSource {}
impl<T: ResourceOracle + ResourceSink + SettingsSource> Host for T {}

/// Something that can be told a resource changed.
pub trait ResourceListener {
    fn on_funds_changed(&mut self, _value: f64, _reason: TransactionReason) {}
    fn on_reputation_changed(&mut self, _value: f64, _reason: TransactionReason) {}
    fn on_science_changed(&mut self, _value: f64, _reason: TransactionReason) {}
    fn on_technology_researched(&mut self, _tech_id: &str, _cost: i64, _result: ResearchResult) {}
    fn on_settings_applied(&mut self) {}

    /// Route a notification to the matching callback.
    fn notify(&mut self, n: &Notification) {
        match n {
            Notification::FundsChanged { value, reason } => self.on_funds_changed(*value, *reason),
            Notification::ReputationChanged { value, reason } => {
                self.on_reputation_changed(*value, *reason)
            }
            Notification::ScienceChanged { value, reason } => {
                self.on_science_changed(*value, *reason)
            }
            Notification::TechnologyResearched { tech_id, cost, result } => {
                self.on_technology_researched(tech_id, *cost, *result)
            }
            Notification::SettingsApplied => self.on_settings_applied(),
        }
    }
}

/// Handle returned by [`NotificationBus::attach`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

pub type SharedListener = Rc<RefCell<dyn ResourceListener>>;

/// Registration surface for start/stop of a listener's lifecycle.
pub trait NotificationBus {
    fn attach(&mut self, listener: SharedListener) -> ListenerId;
    /// Returns `false` when `id` was not attached.
    fn detach(&mut self, id: ListenerId) -> bool;
}
