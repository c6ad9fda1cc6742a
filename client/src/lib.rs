//! # Careflow Client
//!
//! Async action-dispatch layer for the Careflow clinical-data platform.
//!
//! Every domain operation follows the same contract: dispatch a
//! REQUEST action into the store, await the remote call(s) in explicit
//! sequence, then dispatch exactly one terminal SUCCESS or FAILURE
//! action. The store folds the action stream into [`state::AppState`];
//! observers subscribe to the stream itself for side-channels such as
//! navigation.
//!
//! ## Architecture
//!
//! ```text
//! Dispatcher method → REQUEST → await API call(s) → SUCCESS | FAILURE
//!                         │                              │
//!                         └──────── Store::dispatch ─────┘
//!                                        │
//!                               AppReducer fold + broadcast
//! ```
//!
//! ## Example: login
//!
//! ```rust,ignore
//! use careflow_client::{AppStore, ClientConfig, Dispatcher, HttpApiClient};
//!
//! let api = Arc::new(HttpApiClient::new(&ClientConfig::from_env()));
//! let store = Arc::new(AppStore::new(AppState::default(), AppReducer));
//! let dispatcher = Dispatcher::new(api, store);
//!
//! dispatcher
//!     .login(&Credentials { username, password }, true)
//!     .await;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod api;
pub mod config;
pub mod constants;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod reducer;
pub mod state;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use actions::{AppAction, Phase, Route};
pub use api::ApiClient;
pub use config::ClientConfig;
pub use context::Context;
pub use dispatch::{AppStore, Dispatcher};
pub use error::{ApiError, AppError};
pub use http::HttpApiClient;
pub use reducer::AppReducer;
pub use state::{AppState, Operation, UserId};
