//! Event forwarder — wizard lifecycle events → one-way frontend invocations.
//!
//! Forwarding rules:
//!   select_folder        → selectOutputFolder []
//!   do_generator_done    → generatorDone [succeeded, message, targetPath]
//!   do_generator_install → generatorInstall []
//!   show_progress        → showProgress [] (message is not sent)
//!   get_app_wizard       → None, nothing sent

use std::sync::Arc;

use serde_json::{json, Value};

use crate::events::wizard::{AppWizard, WizardEvents};
use crate::rpc::RemoteChannel;
use crate::types::Result;

pub const SELECT_OUTPUT_FOLDER: &str = "selectOutputFolder";
pub const GENERATOR_DONE: &str = "generatorDone";
pub const GENERATOR_INSTALL: &str = "generatorInstall";
pub const SHOW_PROGRESS: &str = "showProgress";

/// Target path forwarded when the generator reports none.
pub const DEFAULT_TARGET_PATH: &str = "";

/// Forwards [`WizardEvents`] to the frontend over a [`RemoteChannel`].
#[derive(Debug, Clone)]
pub struct EventForwarder<C> {
    channel: C,
}

impl<C: RemoteChannel> EventForwarder<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    fn forward(&self, method: &'static str, params: Vec<Value>) -> Result<()> {
        tracing::debug!(method, params = params.len(), "forwarding wizard event");
        self.channel.invoke(method, params)
    }
}

impl<C: RemoteChannel> WizardEvents for EventForwarder<C> {
    fn get_app_wizard(&self) -> Option<Arc<dyn AppWizard>> {
        None
    }

    fn select_folder(&self) -> Result<()> {
        self.forward(SELECT_OUTPUT_FOLDER, Vec::new())
    }

    fn do_generator_done(
        &self,
        succeeded: bool,
        message: &str,
        target_path: Option<&str>,
    ) -> Result<()> {
        let target_path = target_path.unwrap_or(DEFAULT_TARGET_PATH);
        self.forward(
            GENERATOR_DONE,
            vec![json!(succeeded), json!(message), json!(target_path)],
        )
    }

    fn do_generator_install(&self) -> Result<()> {
        self.forward(GENERATOR_INSTALL, Vec::new())
    }

    fn show_progress(&self, message: Option<&str>) -> Result<()> {
        // The frontend procedure takes no arguments; the message stays here.
        if let Some(message) = message {
            tracing::trace!(message, "progress message not forwarded");
        }
        self.forward(SHOW_PROGRESS, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::channel::MockRemoteChannel;
    use crate::types::Error;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl RemoteChannel for Recorder {
        fn invoke(&self, method: &str, params: Vec<Value>) -> Result<()> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            Ok(())
        }
    }

    impl Recorder {
        fn take(&self) -> Vec<(String, Vec<Value>)> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    fn expect_once(method: &'static str, expected: Vec<Value>) -> MockRemoteChannel {
        let mut mock = MockRemoteChannel::new();
        mock.expect_invoke()
            .withf(move |m, params| m.to_string() == method && *params == expected)
            .times(1)
            .returning(|_, _| Ok(()));
        mock
    }

    #[test]
    fn test_select_folder() {
        let forwarder = EventForwarder::new(expect_once(SELECT_OUTPUT_FOLDER, vec![]));
        forwarder.select_folder().unwrap();
    }

    #[test]
    fn test_generator_done_with_path() {
        let forwarder = EventForwarder::new(expect_once(
            GENERATOR_DONE,
            vec![json!(true), json!("done"), json!("/out")],
        ));
        forwarder.do_generator_done(true, "done", Some("/out")).unwrap();
    }

    #[test]
    fn test_generator_done_defaults_target_path() {
        let forwarder = EventForwarder::new(expect_once(
            GENERATOR_DONE,
            vec![json!(false), json!("failed"), json!("")],
        ));
        forwarder.do_generator_done(false, "failed", None).unwrap();
    }

    #[test]
    fn test_generator_install() {
        let forwarder = EventForwarder::new(expect_once(GENERATOR_INSTALL, vec![]));
        forwarder.do_generator_install().unwrap();
    }

    #[test]
    fn test_show_progress_drops_message() {
        let forwarder = EventForwarder::new(expect_once(SHOW_PROGRESS, vec![]));
        forwarder.show_progress(Some("anything")).unwrap();
    }

    #[test]
    fn test_show_progress_without_message() {
        let forwarder = EventForwarder::new(expect_once(SHOW_PROGRESS, vec![]));
        forwarder.show_progress(None).unwrap();
    }

    #[test]
    fn test_get_app_wizard_sends_nothing() {
        let mut mock = MockRemoteChannel::new();
        mock.expect_invoke().times(0);
        let forwarder = EventForwarder::new(mock);

        assert!(forwarder.get_app_wizard().is_none());
        assert!(forwarder.get_app_wizard().is_none());
    }

    #[test]
    fn test_channel_error_passes_through() {
        let mut mock = MockRemoteChannel::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _| Err(Error::channel_closed("socket reset")));
        let forwarder = EventForwarder::new(mock);

        let err = forwarder.do_generator_install().unwrap_err();
        assert_eq!(err.to_string(), "channel closed: socket reset");
    }

    #[test]
    fn test_calls_forwarded_in_order() {
        let recorder = Recorder::default();
        let forwarder = EventForwarder::new(&recorder);

        forwarder.select_folder().unwrap();
        forwarder.show_progress(Some("installing")).unwrap();
        forwarder.do_generator_install().unwrap();
        forwarder.do_generator_install().unwrap();
        forwarder.do_generator_done(true, "done", Some("/out")).unwrap();

        let names: Vec<String> = recorder.take().into_iter().map(|(m, _)| m).collect();
        assert_eq!(
            names,
            vec![
                SELECT_OUTPUT_FOLDER,
                SHOW_PROGRESS,
                GENERATOR_INSTALL,
                GENERATOR_INSTALL,
                GENERATOR_DONE,
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_generator_done_forwards_triple(
            succeeded in any::<bool>(),
            message in ".*",
            target_path in proptest::option::of(".*"),
        ) {
            let recorder = Recorder::default();
            let forwarder = EventForwarder::new(&recorder);

            forwarder
                .do_generator_done(succeeded, &message, target_path.as_deref())
                .unwrap();

            let calls = recorder.take();
            prop_assert_eq!(calls.len(), 1);
            let expected_path = target_path.unwrap_or_default();
            prop_assert_eq!(&calls[0].0, GENERATOR_DONE);
            prop_assert_eq!(
                &calls[0].1,
                &vec![json!(succeeded), json!(message), json!(expected_path)]
            );
        }

        #[test]
        fn prop_show_progress_never_carries_message(message in proptest::option::of(".*")) {
            let recorder = Recorder::default();
            let forwarder = EventForwarder::new(&recorder);

            forwarder.show_progress(message.as_deref()).unwrap();

            let calls = recorder.take();
            prop_assert_eq!(calls.len(), 1);
            prop_assert_eq!(&calls[0].0, SHOW_PROGRESS);
            prop_assert!(calls[0].1.is_empty());
        }
    }
}
