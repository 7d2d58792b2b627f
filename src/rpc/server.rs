//! TCP RPC server — accept loop and per-connection session.
//!
//! Each frontend connection becomes a [`Session`] whose [`EventForwarder`]
//! enqueues invocations; the connection task drains the queue onto the socket.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::events::EventForwarder;
use crate::rpc::channel::QueuedChannel;
use crate::rpc::codec::{read_frame, write_frame, MSG_ERROR, MSG_INVOKE};
use crate::rpc::message::{self, Invocation};
use crate::types::{Config, Result, RpcConfig, SessionId};

/// A connected frontend.
///
/// The connection stays open while any clone of `events` (or its channel) is
/// alive. Once the frontend disconnects, further events fail with
/// `Error::ChannelClosed`. A frontend that shuts down only its write half
/// counts as disconnected: inbound EOF ends the session.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub peer: SocketAddr,
    pub events: EventForwarder<QueuedChannel>,
}

/// Receives a session for every accepted connection.
///
/// Called from the accept loop; must not block.
pub trait SessionHandler: Send + Sync + 'static {
    fn on_session(&self, session: Session);
}

impl<F> SessionHandler for F
where
    F: Fn(Session) + Send + Sync + 'static,
{
    fn on_session(&self, session: Session) {
        self(session)
    }
}

/// RPC server handing frontend sessions to the generator side.
pub struct RpcServer {
    addr: SocketAddr,
    cancel: CancellationToken,
    rpc_config: RpcConfig,
    handler: Arc<dyn SessionHandler>,
}

impl fmt::Debug for RpcServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcServer")
            .field("addr", &self.addr)
            .field("rpc_config", &self.rpc_config)
            .finish_non_exhaustive()
    }
}

impl RpcServer {
    pub fn new(addr: SocketAddr, rpc_config: RpcConfig, handler: impl SessionHandler) -> Self {
        Self {
            addr,
            cancel: CancellationToken::new(),
            rpc_config,
            handler: Arc::new(handler),
        }
    }

    /// Build a server from `server.listen_addr` and the `rpc` section.
    pub fn from_config(config: &Config, handler: impl SessionHandler) -> Result<Self> {
        config.rpc.validate()?;
        let addr = config.listen_socket_addr()?;
        Ok(Self::new(addr, config.rpc.clone(), handler))
    }

    /// Address `serve` binds.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind the configured address and serve until cancelled or a fatal error occurs.
    pub async fn serve(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve_listener(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_listener(&self, listener: TcpListener) -> std::io::Result<()> {
        let max_connections = self.rpc_config.max_connections;
        let conn_semaphore = Arc::new(Semaphore::new(max_connections));
        tracing::info!(
            "RPC server listening on {} (max_connections={})",
            listener.local_addr()?,
            max_connections,
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("RPC server shutting down");
                    break;
                }
                accept = listener.accept() => {
                    let (stream, peer) = accept?;

                    let permit = match conn_semaphore.clone().try_acquire_owned() {
                        Ok(permit) => permit,
                        Err(_) => {
                            tracing::warn!(
                                "Connection from {} rejected: at max_connections ({})",
                                peer,
                                max_connections,
                            );
                            drop(stream);
                            continue;
                        }
                    };

                    let session_id = SessionId::new();
                    let (channel, outbound) =
                        QueuedChannel::bounded(self.rpc_config.outbound_queue_capacity);
                    tracing::debug!(
                        session = %session_id,
                        "Frontend connected from {} (active={})",
                        peer,
                        max_connections - conn_semaphore.available_permits(),
                    );

                    let cancel = self.cancel.clone();
                    let rpc_config = self.rpc_config.clone();
                    let task_session = session_id.clone();
                    tokio::spawn(async move {
                        match handle_connection(stream, outbound, cancel, rpc_config, permit).await {
                            Ok(()) => tracing::debug!(session = %task_session, "Session with {} ended", peer),
                            Err(e) => tracing::warn!(session = %task_session, "Session with {} error: {}", peer, e),
                        }
                    });

                    self.handler.on_session(Session {
                        id: session_id,
                        peer,
                        events: EventForwarder::new(channel),
                    });
                }
            }
        }
        Ok(())
    }

    /// Request graceful shutdown of the accept loop and all sessions.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Drain outbound invocations onto the socket until the frontend leaves,
/// every channel clone is dropped, or the server shuts down.
async fn handle_connection(
    stream: TcpStream,
    mut outbound: mpsc::Receiver<Invocation>,
    cancel: CancellationToken,
    rpc_config: RpcConfig,
    _permit: OwnedSemaphorePermit, // held for connection lifetime
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let closed = cancel.child_token();
    // Stops the reader if we leave early on a write error.
    let _reader_guard = closed.clone().drop_guard();
    tokio::spawn(read_inbound(reader, rpc_config.max_frame_bytes, closed.clone()));

    loop {
        tokio::select! {
            _ = closed.cancelled() => break,
            next = outbound.recv() => {
                let Some(invocation) = next else {
                    break;
                };
                let payload = message::encode(&invocation)?;
                timed_write(&mut writer, &payload, rpc_config.write_timeout).await?;
                tracing::trace!(id = invocation.id, method = %invocation.method, "invocation sent");
            }
        }
    }

    Ok(())
}

/// Consume frames sent by the frontend until EOF, then cancel `closed`.
///
/// EOF ends the whole session, including a half-closed connection whose
/// frontend could still read.
///
/// Frontend requests are not served on this transport; they are logged and dropped.
async fn read_inbound(mut reader: OwnedReadHalf, max_frame_bytes: u32, closed: CancellationToken) {
    loop {
        tokio::select! {
            _ = closed.cancelled() => return,
            frame = read_frame(&mut reader, max_frame_bytes) => match frame {
                Ok(Some((MSG_INVOKE, payload))) => match message::decode(&payload) {
                    Ok(invocation) => tracing::debug!(
                        method = %invocation.method,
                        "ignoring invocation from frontend"
                    ),
                    Err(e) => tracing::debug!("undecodable frame from frontend: {}", e),
                },
                Ok(Some((MSG_ERROR, payload))) => {
                    tracing::warn!("frontend reported error: {}", String::from_utf8_lossy(&payload));
                }
                Ok(Some((msg_type, _))) => {
                    tracing::debug!("ignoring frame type 0x{:02X} from frontend", msg_type);
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("read error, closing session: {}", e);
                    break;
                }
            },
        }
    }
    closed.cancel();
}

/// Write an invoke frame with a timeout (slow frontends are dropped).
async fn timed_write(
    writer: &mut OwnedWriteHalf,
    payload: &[u8],
    timeout: Duration,
) -> std::io::Result<()> {
    tokio::time::timeout(timeout, write_frame(writer, MSG_INVOKE, payload))
        .await
        .map_err(|_| {
            tracing::warn!("Write timeout ({:?}), dropping connection", timeout);
            std::io::Error::new(std::io::ErrorKind::TimedOut, "write timeout")
        })?
}
