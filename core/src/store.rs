//! The Store - runtime coordinator for a reducer.
//!
//! The store owns the state, applies the reducer to every dispatched
//! action, and broadcasts each applied action to observers. Observers
//! see actions in exactly the order they were applied, which is what
//! lets callers assert event-sequence invariants (one REQUEST, one
//! terminal event) from outside.

use crate::reducer::Reducer;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Default capacity of the action broadcast channel.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// The Store - holds state, applies the reducer, broadcasts actions.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(AppState::default(), AppReducer);
/// let mut actions = store.subscribe();
///
/// store.dispatch(AppAction::LogoutSuccess).await;
///
/// let seen = actions.try_recv().ok();
/// ```
pub struct Store<S, A, R>
where
    R: Reducer<State = S, Action = A>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    /// Broadcasts every applied action, in application order.
    ///
    /// Lagging observers lose the oldest actions (tokio broadcast
    /// semantics); size the capacity for the longest burst an observer
    /// must not miss.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, R> Store<S, A, R>
where
    R: Reducer<State = S, Action = A>,
    A: Clone,
{
    /// Create a new store with initial state and reducer.
    #[must_use]
    pub fn new(initial_state: S, reducer: R) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a new store with a custom action broadcast capacity.
    ///
    /// Increase the capacity when observers collect long bursts of
    /// actions before draining (e.g. sequence-asserting tests).
    #[must_use]
    pub fn with_broadcast_capacity(initial_state: S, reducer: R, capacity: usize) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            action_broadcast,
        }
    }

    /// Apply an action: reduce it into state, then broadcast it.
    ///
    /// Actions dispatched from the same task are applied and observed
    /// in dispatch order. The broadcast happens while the write lock is
    /// held, so no observer can see an action before the state change
    /// it describes.
    pub async fn dispatch(&self, action: A) {
        let mut state = self.state.write().await;
        self.reducer.reduce(&mut state, &action);

        tracing::trace!(
            subscribers = self.action_broadcast.receiver_count(),
            "action applied"
        );

        // send() only errors when there are no subscribers, which is
        // a legitimate steady state (nobody observing).
        let _ = self.action_broadcast.send(action);
    }

    /// Read a projection of the current state.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to the applied-action stream.
    ///
    /// Only actions dispatched after the call are observed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }
}
