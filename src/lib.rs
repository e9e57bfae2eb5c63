/*!
`funding_floor`: a reactive funding-floor controller for career-mode
space-program economies.

What it does
- Recomputes a spendable-funds ceiling (the *budget*) from reputation and
  the science spent on research:
  `budget = floor(min(min + spent·per_sci, max − 1000) + rep·(max − min)/1000)`.
- Reacts to funds/reputation/science notifications by clamping funds to the
  budget and converting the deviation into reputation/science side effects
  (a penalty for spending below the floor, bonuses for surplus income).
- Keeps the three mutually-dependent resources consistent without feedback
  loops: every cycle ends with `funds := budget`, so the echo of that write is
  a no-op.

How to use (call surface only)
- Implement the host seam in [`systems::sdk`] (`ResourceOracle`,
  `ResourceSink`, `SettingsSource`) or use [`host::MemoryHost`].
- Build a [`BudgetController`] with the host handle and the restored
  [`ScenarioState`], call `start()`, and attach it to a
  [`NotificationBus`] so resource changes reach it.
- Persist `controller.snapshot()` with [`persist::save`].

What it does NOT do
- No UI, no localisation, no host-side transaction bookkeeping.
*/

pub mod error;
pub mod host;
pub mod logging;
pub mod mechanics;
pub mod persist;
pub mod settings;
pub mod systems;

pub use error::{Error, Result};
pub use persist::ScenarioState;
pub use settings::Settings;
pub use systems::funding_floor::BudgetController;
pub use systems::sdk::{
    Host, ListenerId, Notification, NotificationBus, ResearchResult, ResourceListener,
    ResourceOracle, ResourceSink, SettingsSource, TransactionReason,
};

/// Result of a [`settle`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled {
    pub steps: usize,
    pub quiescent: bool,
}

/// Deterministic drain: call `step` until it reports no work left or
/// `max_steps` is exhausted. `step` returns `true` when it did something.
pub fn settle<Step>(mut step: Step, max_steps: usize) -> Settled
where
    Step: FnMut() -> bool,
{
    for steps in 0..max_steps {
        if !step() {
            return Settled { steps, quiescent: true };
        }
    }
    Settled { steps: max_steps, quiescent: false }
}
