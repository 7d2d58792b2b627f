//! # Wizard Events - backend → frontend lifecycle notifications
//!
//! A generator engine running in a backend process reports its lifecycle
//! (output folder selection, completion, dependency install, progress) through
//! the [`WizardEvents`] contract. [`EventForwarder`] implements that contract by
//! issuing one-way named invocations on a [`RemoteChannel`]:
//!
//! ```text
//!   generator engine ──WizardEvents──▶ EventForwarder
//!                                          │ invoke(name, params)
//!                                          ▼
//!                                    QueuedChannel ──mpsc──▶ RpcServer session
//!                                                               │ MSG_INVOKE frames
//!                                                               ▼
//!                                                           frontend
//! ```
//!
//! Nothing travels back: the frontend's answers are not awaited or handled.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod events;
pub mod rpc;
pub mod types;

pub mod observability;

pub use events::{AppWizard, EventForwarder, Severity, WizardEvents};
pub use rpc::{QueuedChannel, RemoteChannel, RpcServer, Session, SessionHandler};
pub use types::{Config, Error, Result, RpcConfig, SessionId};
