//! The one duplex connection to the agent backend.
//!
//! Exactly one logical connection exists at a time, owned by the
//! [`ConnectionManager`]; no other component touches the raw channel. On
//! close (clean or error) exactly one reconnect attempt is scheduled after a
//! fixed delay — constant backoff, no retry cap: the session is long-lived
//! and the operator is present. Teardown cancels the pending reconnect and
//! closes the socket.
//!
//! Connections are strictly serial: a superseded connection's stream is
//! dropped before its replacement is opened, so a frame from an old
//! connection can never be reduced after the new one has produced state.
//! The `session_created` greeting of each new connection then supersedes
//! the session id as well.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use parking_lot::RwLock;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use tether_protocol::ClientCommand;

use crate::dispatch;
use crate::state::SharedState;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Capacity of the outbound send channel. Commands are small and human
/// initiated; overflow means the socket stalled and the command is dropped.
const OUTBOUND_CAPACITY: usize = 64;

/// Owns the streaming connection and its reconnect loop.
pub struct ConnectionManager {
    endpoint: String,
    reconnect_delay: Duration,
    state: SharedState,
    connected: AtomicBool,
    outbound: RwLock<Option<mpsc::Sender<String>>>,
    shutdown: CancellationToken,
    running: AtomicBool,
}

impl ConnectionManager {
    /// Create a manager for the given WebSocket endpoint.
    ///
    /// No connection is made until [`connect`](Self::connect) is called.
    #[must_use]
    pub fn new(endpoint: String, reconnect_delay: Duration, state: SharedState) -> Arc<Self> {
        Arc::new(Self {
            endpoint,
            reconnect_delay,
            state,
            connected: AtomicBool::new(false),
            outbound: RwLock::new(None),
            shutdown: CancellationToken::new(),
            running: AtomicBool::new(false),
        })
    }

    /// Start the connection loop.
    ///
    /// Idempotent: a no-op while the loop is already running (connected or
    /// waiting out the reconnect delay), and after [`close`](Self::close).
    pub fn connect(self: &Arc<Self>) {
        if self.shutdown.is_cancelled() {
            debug!("connect ignored: manager is closed");
            return;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let manager = Arc::clone(self);
        drop(tokio::spawn(async move { manager.run().await }));
    }

    /// Whether the connection is currently open.
    ///
    /// The presentation layer gates input on this (e.g. disables send while
    /// disconnected).
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Tear the connection down for good: close the socket and disarm the
    /// pending reconnect. The manager cannot be reused afterwards.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    /// Serialize a command and enqueue it on the active connection.
    ///
    /// Returns `false` (a silent drop, not an error) when no connection is
    /// open or the channel is full; commands are never queued across
    /// reconnects — the operator retries manually.
    pub fn send_command(&self, command: &ClientCommand) -> bool {
        let Some(tx) = self.outbound.read().clone() else {
            debug!("no open connection, dropping command");
            return false;
        };
        match serde_json::to_string(command) {
            Ok(json) => {
                if tx.try_send(json).is_ok() {
                    true
                } else {
                    debug!("outbound channel full or closed, dropping command");
                    false
                }
            }
            Err(err) => {
                debug!(error = %err, "failed to serialize command");
                false
            }
        }
    }

    /// Connection loop: connect, drive until close, wait, repeat.
    async fn run(self: Arc<Self>) {
        let mut generation: u64 = 0;
        loop {
            if self.shutdown.is_cancelled() {
                break;
            }
            match connect_async(self.endpoint.as_str()).await {
                Ok((ws, _response)) => {
                    generation += 1;
                    info!(endpoint = %self.endpoint, generation, "connected");
                    self.connected.store(true, Ordering::SeqCst);
                    self.drive(ws).await;
                    self.connected.store(false, Ordering::SeqCst);
                    *self.outbound.write() = None;
                    info!(generation, "disconnected");
                }
                Err(err) => {
                    debug!(endpoint = %self.endpoint, error = %err, "connect attempt failed");
                }
            }
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                () = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }

    /// Pump one open connection until it closes or teardown is requested.
    async fn drive(&self, ws: WsStream) {
        let (mut ws_tx, mut ws_rx) = ws.split();
        let (out_tx, mut out_rx) = mpsc::channel::<String>(OUTBOUND_CAPACITY);
        *self.outbound.write() = Some(out_tx);

        loop {
            tokio::select! {
                inbound = ws_rx.next() => {
                    match inbound {
                        Some(Ok(Message::Text(text))) => {
                            dispatch::handle_frame(&self.state, text.as_str());
                        }
                        Some(Ok(Message::Close(_))) => {
                            debug!("server sent close frame");
                            break;
                        }
                        Some(Ok(Message::Binary(data))) => {
                            // Protocol is text-only
                            debug!(len = data.len(), "ignoring binary frame");
                        }
                        // Ping/pong are handled by the transport
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            debug!(error = %err, "transport error");
                            break;
                        }
                        None => break,
                    }
                }
                outbound = out_rx.recv() => {
                    match outbound {
                        Some(text) => {
                            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                () = self.shutdown.cancelled() => {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    }
}
