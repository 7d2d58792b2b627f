//! The listener contract the generator engine reports lifecycle events to.

use std::fmt;
use std::sync::Arc;

use crate::types::Result;

/// Severity of a message shown by an [`AppWizard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

/// Wizard surface a generator can drive directly when one is available.
pub trait AppWizard: Send + Sync + fmt::Debug {
    fn show_progress(&self, message: Option<&str>);
    fn show_message(&self, message: &str, severity: Severity);
}

/// Lifecycle events raised by the generator engine.
///
/// Every notification is one-way. Errors come only from the underlying
/// transport and are passed through untouched.
pub trait WizardEvents {
    /// The wizard instance, if this listener can offer one.
    fn get_app_wizard(&self) -> Option<Arc<dyn AppWizard>>;

    /// Ask the frontend to let the user pick an output folder.
    fn select_folder(&self) -> Result<()>;

    /// Report generator completion. `target_path` of `None` is sent as `""`.
    fn do_generator_done(
        &self,
        succeeded: bool,
        message: &str,
        target_path: Option<&str>,
    ) -> Result<()>;

    /// Signal that dependency installation has started.
    fn do_generator_install(&self) -> Result<()>;

    /// Signal generic progress.
    fn show_progress(&self, message: Option<&str>) -> Result<()>;
}
