//! Synchronous notification bus. Delivers one notification to every
//! attached listener in attach order; a listener that is already borrowed
//! (mid-callback) is never re-entered, the delivery is deferred instead.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::systems::sdk::{ListenerId, Notification, NotificationBus, SharedListener};

#[derive(Default)]
pub struct MemoryBus {
    next_id: u64,
    listeners: Vec<(ListenerId, SharedListener)>,
    deferred: VecDeque<(ListenerId, Notification)>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Returns how many listeners received `n` now.
    pub fn dispatch(&mut self, n: &Notification) -> usize {
        let mut delivered = 0;
        for (id, listener) in &self.listeners {
            match listener.try_borrow_mut() {
                Ok(mut l) => {
                    trace!(%id, ?n, "dispatch");
                    l.notify(n);
                    delivered += 1;
                }
                Err(_) => {
                    warn!(%id, ?n, "listener busy, deferring notification");
                    self.deferred.push_back((*id, n.clone()));
                }
            }
        }
        delivered
    }

    /// Retry deferred deliveries once each. Returns how many went through.
    pub fn retry_deferred(&mut self) -> usize {
        let mut delivered = 0;
        for _ in 0..self.deferred.len() {
            let Some((id, n)) = self.deferred.pop_front() else {
                break;
            };
            let Some((_, listener)) = self.listeners.iter().find(|(lid, _)| *lid == id) else {
                // Detached meanwhile.
                continue;
            };
            match listener.try_borrow_mut() {
                Ok(mut l) => {
                    l.notify(&n);
                    delivered += 1;
                }
                Err(_) => self.deferred.push_back((id, n)),
            }
        }
        delivered
    }
}

impl NotificationBus for MemoryBus {
    fn attach(&mut self, listener: SharedListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        trace!(%id, "attached");
        id
    }

    fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.deferred.retain(|(lid, _)| *lid != id);
        let removed = self.listeners.len() != before;
        if removed {
            trace!(%id, "detached");
        }
        removed
    }
}
