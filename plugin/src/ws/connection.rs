//! Game server connection
//!
//! One `ConnectionHandler` owns one WebSocket. The socket lives on a
//! dedicated thread with its own tokio runtime; the handler only holds the
//! outbound queue and the shared ready state, so it is cheap to keep in a
//! Bevy resource and never blocks the caller.
//!
//! Lifecycle events are pushed to an [`EventSink`] in transport order.

use futures_util::stream::SplitStream;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;

use crate::ws::{
    CLOSE_ABNORMAL, ConnectError, ConnectionConfig, ConnectionEvent, EventSink, SendError,
    ServerMessage,
};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// How long to keep reading after a close frame while the reply is flushed.
const CLOSE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection lifecycle (same values as the browser `readyState`).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ReadyState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

#[derive(Clone)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn new(state: ReadyState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    fn load(&self) -> ReadyState {
        ReadyState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn store(&self, state: ReadyState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    /// Move to `to` only if currently in `from`.
    fn advance(&self, from: ReadyState, to: ReadyState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Commands for the connection task.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outbound {
    Text(String),
    Close,
}

/// Owner of the single game server connection.
pub struct ConnectionHandler {
    id: u32,
    url: String,
    sender: mpsc::UnboundedSender<Outbound>,
    state: SharedState,
}

impl ConnectionHandler {
    /// Start connecting and return immediately in the `Connecting` state.
    ///
    /// There is no retry and no timeout. Failures are reported to `sink` as
    /// an `Error` event followed by `Closed` with code 1006.
    pub fn connect(config: ConnectionConfig, sink: impl EventSink) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = SharedState::new(ReadyState::Connecting);
        let url = config.url.clone();

        let thread_state = state.clone();
        let spawned = thread::Builder::new()
            .name(format!("websocket-{}", id))
            .spawn(move || run_connection(id, config, receiver, thread_state, sink));

        if let Err(e) = spawned {
            log::error!("[WebSocket {}] Failed to spawn connection thread: {}", id, e);
            state.store(ReadyState::Closed);
        }

        Self {
            id,
            url,
            sender,
            state,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ready_state(&self) -> ReadyState {
        self.state.load()
    }

    /// Send `choice` verbatim as a single text frame.
    ///
    /// Nothing is queued when the connection is not open.
    pub fn send(&self, choice: impl Into<String>) -> Result<(), SendError> {
        let state = self.state.load();
        if state != ReadyState::Open {
            return Err(SendError::NotOpen(state));
        }

        let text = choice.into();
        log::debug!("[WebSocket {}] Queueing {} bytes", self.id, text.len());
        self.sender
            .send(Outbound::Text(text))
            .map_err(|_| SendError::Disconnected)
    }

    /// Ask the server to close the connection. A `Closed` event follows
    /// once the server answers.
    pub fn close(&self) {
        let state = self.state.load();
        if matches!(state, ReadyState::Closing | ReadyState::Closed) {
            return;
        }

        self.state.store(ReadyState::Closing);
        log::info!("[WebSocket {}] Closing", self.id);
        let _ = self.sender.send(Outbound::Close);
    }

    /// A handler with no connection thread behind it.
    #[cfg(test)]
    pub(crate) fn detached(state: ReadyState) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handler = Self {
            id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
            url: String::new(),
            sender,
            state: SharedState::new(state),
        };
        (handler, receiver)
    }
}

impl Drop for ConnectionHandler {
    fn drop(&mut self) {
        self.close();
    }
}

type GameStream = WebSocketStream<TcpStream>;

/// Body of the connection thread.
fn run_connection(
    id: u32,
    config: ConnectionConfig,
    mut receiver: mpsc::UnboundedReceiver<Outbound>,
    state: SharedState,
    sink: impl EventSink,
) {
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            fail(id, &state, &sink, ConnectError::Runtime(e), "Runtime unavailable");
            return;
        }
    };

    rt.block_on(async move {
        log::info!("[WebSocket {}] Connecting to {}", id, config.url);

        let (ws_stream, protocol) = match handshake(id, &config).await {
            Ok(connected) => connected,
            Err(e) => {
                let reason = match &e {
                    ConnectError::InvalidUrl(_)
                    | ConnectError::UnsupportedScheme(_)
                    | ConnectError::MissingHost => "Invalid URL",
                    ConnectError::Io(_) => "Connection failed",
                    _ => "Handshake failed",
                };
                fail(id, &state, &sink, e, reason);
                return;
            }
        };

        // close() during Connecting: no Open event. The queued Close command
        // is handled by the send task below.
        if state.advance(ReadyState::Connecting, ReadyState::Open) {
            sink.dispatch(ConnectionEvent::Open { protocol });
        } else {
            log::info!("[WebSocket {}] Closed before open", id);
        }

        let (mut write, mut read) = ws_stream.split();

        let send_task = tokio::spawn(async move {
            while let Some(outbound) = receiver.recv().await {
                match outbound {
                    Outbound::Text(text) => {
                        log::debug!("[WebSocket {}] Sending: {}", id, text);
                        if let Err(e) = write.send(Message::Text(text.into())).await {
                            log::error!("[WebSocket {}] Send error: {}", id, e);
                            return;
                        }
                    }
                    Outbound::Close => break,
                }
            }

            // Explicit close, or the handler was dropped.
            if let Err(e) = write.send(Message::Close(None)).await {
                log::debug!("[WebSocket {}] Close frame not sent: {}", id, e);
            }
        });

        let (code, reason) = loop {
            match read.next().await {
                Some(Ok(Message::Text(text))) => {
                    log::debug!(
                        "[WebSocket {}] Received: {}",
                        id,
                        text.chars().take(100).collect::<String>()
                    );
                    sink.dispatch(ConnectionEvent::Message(ServerMessage::parse(
                        text.as_str(),
                    )));
                }
                Some(Ok(Message::Binary(data))) => {
                    log::debug!(
                        "[WebSocket {}] Ignoring binary frame ({} bytes)",
                        id,
                        data.len()
                    );
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    // Handled by tungstenite
                }
                Some(Ok(Message::Frame(_))) => {}
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (f.code.into(), f.reason.to_string()))
                        .unwrap_or((1000, String::new()));
                    log::info!("[WebSocket {}] Received close: {} {}", id, code, reason);
                    drain_after_close(id, &mut read).await;
                    break (code, reason);
                }
                Some(Err(e)) => {
                    log::error!("[WebSocket {}] Read error: {}", id, e);
                    sink.dispatch(ConnectionEvent::Error(e.to_string()));
                    break (CLOSE_ABNORMAL, "Connection error".to_string());
                }
                None => {
                    log::info!("[WebSocket {}] Stream ended", id);
                    break (CLOSE_ABNORMAL, "Connection ended".to_string());
                }
            }
        };

        state.store(ReadyState::Closed);
        sink.dispatch(ConnectionEvent::Closed { code, reason });

        send_task.abort();
        log::info!("[WebSocket {}] Connection ended", id);
    });
}

/// Keep polling the read half until tungstenite has flushed its close reply
/// and reports the stream finished.
async fn drain_after_close(id: u32, read: &mut SplitStream<GameStream>) {
    let drained = tokio::time::timeout(CLOSE_DRAIN_TIMEOUT, async {
        while let Some(next) = read.next().await {
            if let Err(e) = next {
                log::debug!("[WebSocket {}] Error while closing: {}", id, e);
                break;
            }
        }
    })
    .await;

    if drained.is_err() {
        log::warn!("[WebSocket {}] Close handshake did not finish in time", id);
    }
}

/// Open TCP and upgrade to WebSocket, returning the accepted subprotocol.
async fn handshake(
    id: u32,
    config: &ConnectionConfig,
) -> Result<(GameStream, Option<String>), ConnectError> {
    let (url, addr) = config.socket_addr()?;

    log::info!("[WebSocket {}] Connecting TCP to {}", id, addr);
    let tcp_stream = TcpStream::connect(&addr).await?;
    log::info!("[WebSocket {}] TCP connected", id);

    let mut request = url.as_str().into_client_request()?;
    if !config.subprotocol.is_empty() {
        request.headers_mut().insert(
            "Sec-WebSocket-Protocol",
            header_value("Sec-WebSocket-Protocol", &config.subprotocol)?,
        );
    }
    if let Some(ref origin) = config.origin {
        request
            .headers_mut()
            .insert("Origin", header_value("Origin", origin)?);
    }

    log::info!("[WebSocket {}] Performing WebSocket handshake", id);
    let (stream, response) = tokio_tungstenite::client_async(request, tcp_stream).await?;
    log::info!(
        "[WebSocket {}] Connected successfully (status: {})",
        id,
        response.status()
    );

    let protocol = response
        .headers()
        .get("Sec-WebSocket-Protocol")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok((stream, protocol))
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConnectError> {
    HeaderValue::from_str(value).map_err(|_| ConnectError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}

/// Report a connection that never opened.
fn fail(id: u32, state: &SharedState, sink: &impl EventSink, error: ConnectError, reason: &str) {
    log::error!("[WebSocket {}] {}", id, error);
    state.store(ReadyState::Closed);
    sink.dispatch(ConnectionEvent::Error(error.to_string()));
    sink.dispatch(ConnectionEvent::Closed {
        code: CLOSE_ABNORMAL,
        reason: reason.to_string(),
    });
}
