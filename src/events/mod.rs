//! Wizard event infrastructure.
//!
//! The generator engine reports lifecycle events through [`WizardEvents`];
//! [`EventForwarder`] turns them into one-way frontend invocations.

pub mod forwarder;
pub mod wizard;

pub use forwarder::EventForwarder;
pub use wizard::{AppWizard, Severity, WizardEvents};
