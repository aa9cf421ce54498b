//! Events emitted by the ledger for subscribers.

use energy_types::{Address, Nullifier, Year};

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A spend was authorized and debited.
    EnergySpent {
        nullifier: Nullifier,
        spender_tag: Address,
        recipient: Address,
        amount: u128,
    },
    /// Accrual was realized into the stored balance outside a spend.
    BalanceRealized {
        nullifier: Nullifier,
        amount: u128,
        year: Year,
        periods_elapsed: u64,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline after the record is persisted. A spend
/// notifies while its identity is still locked, so keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn spent() -> LedgerEvent {
        LedgerEvent::EnergySpent {
            nullifier: Nullifier::new([1; 32]),
            spender_tag: Address::ZERO,
            recipient: Address::new([2; 20]),
            amount: 10,
        }
    }

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&spent());
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::default();
        assert!(bus.listeners.is_empty());
        bus.emit(&spent());
    }
}
