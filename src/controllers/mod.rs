//! Stateful controllers over the model traits
//!
//! A controller owns the state a screen renders (lists, selection, loading
//! flag, error text) and exposes the actions that change it. State is read as
//! a cloned snapshot through `state().await`.
//!
//! Every action follows the same sequence: mark a request in flight, clear
//! the error, call the model, merge the result by id, and on failure store the
//! error text and leave the lists untouched.
//!
//! List loads are ticketed. When two loads of the same list overlap, only the
//! response to the newer one is applied; the older one is dropped. Mutations
//! are merged by id and always applied.

mod auth;
mod clothing;
mod fashion;
mod location;
mod outfit;
mod weather;

pub use auth::{AuthController, AuthState};
pub use clothing::{ClothingController, ClothingState};
pub use fashion::{FashionController, FashionState, DEFAULT_COORDINATES};
pub use location::{LocationController, LocationState, CURRENT_LOCATION_NAME};
pub use outfit::{OutfitController, OutfitState};
pub use weather::{WeatherController, WeatherState};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::storage::lock;

/// Identifies one load of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    list: &'static str,
    generation: u64,
}

/// In-flight accounting and load ordering for one controller
#[derive(Debug, Default)]
pub(crate) struct RequestTracker {
    in_flight: AtomicUsize,
    generations: Mutex<HashMap<&'static str, u64>>,
}

impl RequestTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Count a request as in flight until the guard is dropped
    pub(crate) fn begin(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight { tracker: self }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Start a new load of `list`, superseding every earlier ticket for it
    pub(crate) fn ticket(&self, list: &'static str) -> Ticket {
        let mut generations = lock(&self.generations);
        let generation = generations.entry(list).or_insert(0);
        *generation += 1;
        Ticket {
            list,
            generation: *generation,
        }
    }

    /// Whether `ticket` is still the newest load of its list
    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        let current = lock(&self.generations).get(ticket.list).copied();
        if current == Some(ticket.generation) {
            true
        } else {
            log::debug!(
                "dropping stale response for {} (ticket {}, newest {:?})",
                ticket.list,
                ticket.generation,
                current
            );
            false
        }
    }
}

/// Drop guard returned by [`RequestTracker::begin`]
#[must_use]
pub(crate) struct InFlight<'a> {
    tracker: &'a RequestTracker,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Replace the entry with the same id, leaving the rest in place
pub(crate) fn replace_by_id<T: Clone>(
    list: &mut [T],
    id: &str,
    replacement: &T,
    id_of: impl Fn(&T) -> &str,
) {
    for entry in list.iter_mut() {
        if id_of(entry) == id {
            *entry = replacement.clone();
        }
    }
}
