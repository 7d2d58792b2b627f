//! TCP+msgpack transport carrying one-way invocations to the frontend.
//!
//! Length-prefixed frames (see [`codec`]) wrap msgpack-encoded
//! [`message::Invocation`]s. [`RemoteChannel`] is the seam the event
//! forwarder talks to; [`QueuedChannel`] feeds a server session.

pub mod channel;
pub mod codec;
pub mod message;
pub mod server;

pub use channel::{QueuedChannel, RemoteChannel};
pub use message::Invocation;
pub use server::{RpcServer, Session, SessionHandler};
