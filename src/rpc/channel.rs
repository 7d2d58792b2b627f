//! Remote channel abstraction and the queue-backed implementation used by
//! server sessions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::rpc::message::Invocation;
use crate::types::{Error, Result};

/// One-way call capability towards the frontend.
///
/// `invoke` never waits for the far side. An `Err` means the channel itself
/// could not take the call (closed, saturated); nothing is ever returned by
/// the remote procedure.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteChannel {
    fn invoke(&self, method: &str, params: Vec<Value>) -> Result<()>;
}

impl<C: RemoteChannel + ?Sized> RemoteChannel for &C {
    fn invoke(&self, method: &str, params: Vec<Value>) -> Result<()> {
        (**self).invoke(method, params)
    }
}

impl<C: RemoteChannel + ?Sized> RemoteChannel for Arc<C> {
    fn invoke(&self, method: &str, params: Vec<Value>) -> Result<()> {
        (**self).invoke(method, params)
    }
}

impl<C: RemoteChannel + ?Sized> RemoteChannel for Box<C> {
    fn invoke(&self, method: &str, params: Vec<Value>) -> Result<()> {
        (**self).invoke(method, params)
    }
}

/// Channel that enqueues invocations on a bounded mpsc queue.
///
/// Clones share the queue and the id sequence. Ids follow allocation order;
/// calls from one clone are queued in id order, concurrent clones may
/// interleave out of order. The receiving half is drained
/// by whoever owns the transport (see `rpc::server`).
#[derive(Debug, Clone)]
pub struct QueuedChannel {
    tx: mpsc::Sender<Invocation>,
    next_id: Arc<AtomicU64>,
}

impl QueuedChannel {
    /// Create a channel and the receiver its invocations arrive on.
    ///
    /// A zero capacity is raised to one.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<Invocation>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let channel = Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (channel, rx)
    }

    /// Whether the receiving side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl RemoteChannel for QueuedChannel {
    fn invoke(&self, method: &str, params: Vec<Value>) -> Result<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.tx
            .try_send(Invocation::new(id, method, params))
            .map_err(|e| match e {
                TrySendError::Full(invocation) => Error::backpressure(format!(
                    "outbound queue full, '{}' not sent",
                    invocation.method
                )),
                TrySendError::Closed(invocation) => Error::channel_closed(format!(
                    "frontend gone, '{}' not sent",
                    invocation.method
                )),
            })
    }
}
