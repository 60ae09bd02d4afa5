//! WebSocket client for the change feed, over `tokio-tungstenite`.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header, HeaderValue, StatusCode};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::adapters::realtime::{ClientMessage, RealtimeError, ServerMessage};
use crate::domain::realtime::GroupKey;

use super::subscriptions::SubscriptionRegistry;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long `connect` waits for the `connected` frame and `ping` for `pong`.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

const OUTBOUND_BUFFER: usize = 32;

/// A live connection to `/ws` that feeds every received event into a
/// [`SubscriptionRegistry`].
pub struct RealtimeClient {
    connection_id: String,
    registry: Arc<SubscriptionRegistry>,
    outbound: mpsc::Sender<Message>,
    pongs: watch::Receiver<u64>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl RealtimeClient {
    /// Opens the socket, sending `origin` as the `Origin` header when given,
    /// and waits for the server's `connected` frame.
    ///
    /// # Errors
    ///
    /// - `OriginNotAllowed` when the server answers the upgrade with 403
    /// - `Connect` for any other handshake failure
    /// - `Timeout` / `UnexpectedFrame` if `connected` does not arrive first
    pub async fn connect(
        url: &str,
        origin: Option<&str>,
        registry: Arc<SubscriptionRegistry>,
    ) -> Result<Self, RealtimeError> {
        let mut request = url.into_client_request().map_err(RealtimeError::Connect)?;
        if let Some(origin) = origin {
            let value = HeaderValue::from_str(origin)
                .map_err(|e| RealtimeError::Connect(tungstenite::Error::HttpFormat(e.into())))?;
            request.headers_mut().insert(header::ORIGIN, value);
        }

        let (stream, _) = match connect_async(request).await {
            Ok(connected) => connected,
            Err(tungstenite::Error::Http(response))
                if response.status() == StatusCode::FORBIDDEN =>
            {
                return Err(RealtimeError::OriginNotAllowed(
                    origin.unwrap_or_default().to_string(),
                ));
            }
            Err(e) => return Err(RealtimeError::Connect(e)),
        };

        let (sink, mut source) = stream.split();
        let connection_id = wait_for_connected(&mut source).await?;
        tracing::debug!(connection_id = %connection_id, url, "realtime client connected");

        let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
        let (pong_tx, pongs) = watch::channel(0);
        let writer = tokio::spawn(write_loop(sink, outbound_rx));
        let reader = tokio::spawn(read_loop(source, Arc::clone(&registry), pong_tx));

        Ok(Self {
            connection_id,
            registry,
            outbound,
            pongs,
            reader,
            writer,
        })
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    /// Sends `join`. The server does not acknowledge joins; follow with
    /// [`RealtimeClient::ping`] to know it has been processed.
    pub async fn join(&self, group: &GroupKey) -> Result<(), RealtimeError> {
        self.send(&ClientMessage::Join {
            group: group.clone(),
        })
        .await
    }

    /// Sends `ping` and waits for the matching `pong`.
    pub async fn ping(&self) -> Result<(), RealtimeError> {
        let mut pongs = self.pongs.clone();
        pongs.borrow_and_update();
        self.send(&ClientMessage::Ping).await?;
        match tokio::time::timeout(HANDSHAKE_TIMEOUT, pongs.changed()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(RealtimeError::Closed),
            Err(_) => Err(RealtimeError::Timeout("pong")),
        }
    }

    /// Sends a close frame and stops the background tasks.
    pub async fn close(mut self) {
        if self.outbound.send(Message::Close(None)).await.is_ok() {
            let _ = tokio::time::timeout(HANDSHAKE_TIMEOUT, &mut self.writer).await;
        }
    }

    async fn send(&self, message: &ClientMessage) -> Result<(), RealtimeError> {
        let json = serde_json::to_string(message)?;
        self.outbound
            .send(Message::Text(json))
            .await
            .map_err(|_| RealtimeError::Closed)
    }
}

impl Drop for RealtimeClient {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
    }
}

async fn wait_for_connected(source: &mut SplitStream<WsStream>) -> Result<String, RealtimeError> {
    let frame = tokio::time::timeout(HANDSHAKE_TIMEOUT, source.next())
        .await
        .map_err(|_| RealtimeError::Timeout("connected"))?
        .ok_or(RealtimeError::Closed)?
        .map_err(RealtimeError::Connect)?;

    match frame {
        Message::Text(text) => match serde_json::from_str::<ServerMessage>(&text)? {
            ServerMessage::Connected(connected) => Ok(connected.connection_id),
            other => Err(RealtimeError::UnexpectedFrame(format!("{:?}", other))),
        },
        other => Err(RealtimeError::UnexpectedFrame(format!("{:?}", other))),
    }
}

async fn write_loop(mut sink: SplitSink<WsStream, Message>, mut outbound: mpsc::Receiver<Message>) {
    while let Some(message) = outbound.recv().await {
        let closing = matches!(message, Message::Close(_));
        if let Err(e) = sink.send(message).await {
            tracing::debug!("realtime client send failed: {}", RealtimeError::Send(e));
            break;
        }
        if closing {
            break;
        }
    }
}

async fn read_loop(
    mut source: SplitStream<WsStream>,
    registry: Arc<SubscriptionRegistry>,
    pongs: watch::Sender<u64>,
) {
    while let Some(frame) = source.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("realtime client receive failed: {}", e);
                break;
            }
        };

        match serde_json::from_str::<ServerMessage>(&text) {
            Ok(message @ ServerMessage::Event(_)) => {
                if let Some(notification) = message.into_notification() {
                    let handlers = registry.dispatch(&notification);
                    tracing::trace!(topic = %notification.topic, handlers, "event dispatched");
                }
            }
            Ok(ServerMessage::Pong(_)) => pongs.send_modify(|count| *count += 1),
            Ok(ServerMessage::Error(err)) => {
                tracing::warn!(code = %err.code, "server rejected frame: {}", err.message);
            }
            Ok(ServerMessage::Connected(_)) => {}
            Err(e) => tracing::warn!("unreadable server frame: {}", e),
        }
    }
}
