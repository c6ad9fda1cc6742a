//! # Careflow Core
//!
//! Store machinery for the careflow client architecture.
//!
//! The client is built around a unidirectional event flow: dispatchers
//! perform remote calls and produce a deterministic stream of typed
//! actions; a [`reducer::Reducer`] folds each action into application
//! state; observers (routers, UIs, tests) subscribe to the applied
//! action stream.
//!
//! ## Core Concepts
//!
//! - **State**: owned, `Clone`-able domain state
//! - **Action**: a closed enum of everything that can happen
//! - **Reducer**: pure fold `(State, Action) → State`
//! - **Store**: holds state, applies the reducer, broadcasts actions
//!
//! Side effects do not live here. Sequencing of remote calls is the
//! dispatcher's concern, expressed as ordered awaits; by the time an
//! action reaches the store it is a fact to be folded, not a request
//! to do work.

pub mod reducer;
pub mod store;

pub use reducer::Reducer;
pub use store::Store;
