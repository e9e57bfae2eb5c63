// src/host/mod.rs

// Reference host: an in-memory ledger plus a queued notification bus, and a
// career driver that wires both to a controller.

pub mod bus;
pub mod career;
pub mod memory;

pub use bus::MemoryBus;
pub use career::Career;
pub use memory::{Ledger, MemoryHost};
