pub mod config;
pub mod errors;
pub mod frames;

use std::time::Duration;

use config::{MAX_RECONNECT_JITTER_MS, WsHandlerConfig};
use errors::WsHandlerError;
use frames::{OutboundFrame, status_from_frame};
use futures::{SinkExt, StreamExt};
use remoove_api_caller::json::status::TrashCanStatus;
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    oneshot,
};
use tokio_tungstenite::tungstenite::Message;

/// Live subscription to the status of one trash can. Matching pushes are sent to the
/// `data_sender` given at construction.
pub struct WsHandler {
    task_handle: Option<tokio::task::JoinHandle<()>>,
    stop_sender: Option<oneshot::Sender<()>>,
    outbound_sender: UnboundedSender<OutboundFrame>,
}

impl WsHandler {
    pub fn new(
        config: WsHandlerConfig,
        subscription_id: String,
        data_sender: UnboundedSender<TrashCanStatus>,
    ) -> anyhow::Result<Self> {
        if config.url.is_empty() {
            return Err(anyhow::anyhow!("WebSocket URL must not be empty"));
        }

        let (stop_sender, stop_receiver) = oneshot::channel();
        let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel();
        let task_handle = logging::spawn_in_current_span(launch_eventloop(
            config,
            subscription_id,
            data_sender,
            outbound_receiver,
            stop_receiver,
        ));
        Ok(Self {
            task_handle: Some(task_handle),
            stop_sender: Some(stop_sender),
            outbound_sender,
        })
    }

    /// Queues a frame for the socket. Frames queued while disconnected, and a frame whose write
    /// failed, go out after reconnecting. They are dropped if no reconnection follows.
    pub fn send(&self, frame: OutboundFrame) {
        if self.outbound_sender.send(frame).is_err() {
            tracing::warn!("WebSocket task has ended; outbound frame dropped");
        }
    }

    #[must_use]
    pub fn outbound_sender(&self) -> UnboundedSender<OutboundFrame> {
        self.outbound_sender.clone()
    }

    pub async fn wait(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            if let Err(e) = handle.await {
                tracing::error!("WebSocket task failed: {e}");
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            if sender.send(()).is_err() {
                tracing::debug!("WebSocket task already finished before stop");
            }
        }
    }
}

/// Opens a short-lived connection, sends one frame and closes it
pub async fn send_once(url: &str, frame: &OutboundFrame) -> Result<(), WsHandlerError> {
    let (mut stream, _response) = tokio_tungstenite::connect_async(url).await?;
    stream.send(Message::Text(frame.to_text()?)).await?;
    if let Err(e) = stream.close(None).await {
        tracing::warn!("Failed to close WebSocket after sending: {e}");
    }

    tracing::debug!("Sent one frame to {url}");

    Ok(())
}

enum SessionEnd {
    Stopped,
    Closed,
}

async fn launch_eventloop(
    config: WsHandlerConfig,
    subscription_id: String,
    data_sender: UnboundedSender<TrashCanStatus>,
    mut outbound_receiver: UnboundedReceiver<OutboundFrame>,
    mut stop_receiver: oneshot::Receiver<()>,
) {
    let mut attempt = 0u32;
    let mut unsent = None;

    loop {
        let session = run_session(
            &config,
            &subscription_id,
            &data_sender,
            &mut outbound_receiver,
            &mut stop_receiver,
            &mut attempt,
            &mut unsent,
        )
        .await;

        match session {
            Ok(SessionEnd::Stopped) => {
                tracing::info!("WebSocket subscription for trash can {subscription_id} stopped");
                return;
            }
            Ok(SessionEnd::Closed) => {
                tracing::info!("WebSocket connection closed");
            }
            Err(e) => {
                tracing::error!("WebSocket connection error: {e}");
            }
        }

        if !config.reconnect.enabled {
            tracing::info!("Reconnecting is disabled; live updates end here");
            if unsent.is_some() {
                tracing::warn!("Outbound frame dropped without a connection to send it on");
            }
            return;
        }

        attempt += 1;
        if config.reconnect.attempts_exhausted(attempt) {
            tracing::error!(
                "Giving up on the WebSocket after {} reconnection attempts",
                config.reconnect.max_attempts
            );
            return;
        }

        let jitter = randomness::jitter_millis(
            &mut randomness::make_pseudo_rng(),
            MAX_RECONNECT_JITTER_MS,
        );
        let delay = config
            .reconnect
            .backoff_delay(attempt, Duration::from_millis(jitter));
        tracing::warn!(
            "Reconnecting to WebSocket (attempt {attempt}) in {} ms",
            delay.as_millis()
        );

        tokio::select! {
            () = tokio::time::sleep(delay) => {}
            _ = &mut stop_receiver => {
                tracing::info!("Stop requested while waiting to reconnect");
                return;
            }
        }
    }
}

async fn run_session(
    config: &WsHandlerConfig,
    subscription_id: &str,
    data_sender: &UnboundedSender<TrashCanStatus>,
    outbound_receiver: &mut UnboundedReceiver<OutboundFrame>,
    stop_receiver: &mut oneshot::Receiver<()>,
    attempt: &mut u32,
    unsent: &mut Option<OutboundFrame>,
) -> Result<SessionEnd, WsHandlerError> {
    tracing::info!("Connecting to WebSocket server: {}", config.url);

    let (stream, _response) = tokio::select! {
        connected = tokio_tungstenite::connect_async(config.url.as_str()) => connected?,
        _ = &mut *stop_receiver => return Ok(SessionEnd::Stopped),
    };
    let (mut write, mut read) = stream.split();
    *attempt = 0;

    tracing::info!("WebSocket connected");

    if config.subscribe_on_connect {
        tracing::info!("Subscribing to trash can {subscription_id}");
        let handshake = OutboundFrame::subscribe(subscription_id).to_text()?;
        write.send(Message::Text(handshake)).await?;
    }

    if let Some(frame) = unsent.take() {
        tracing::info!("Resending the frame that failed on the previous connection");
        send_frame(&mut write, frame, unsent).await?;
    }

    loop {
        tokio::select! {
            _ = &mut *stop_receiver => {
                if let Err(e) = write.send(Message::Close(None)).await {
                    tracing::warn!("Failed to send Close frame during shutdown: {e}");
                }
                return Ok(SessionEnd::Stopped);
            }

            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    if let Some(status) = status_from_frame(&text, subscription_id) {
                        tracing::debug!("Status push for trash can {subscription_id}");
                        if data_sender.send(status).is_err() {
                            tracing::info!("Status receiver dropped");
                            return Ok(SessionEnd::Stopped);
                        }
                    }
                }
                Some(Ok(Message::Ping(data))) => {
                    write.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map_or((1000, "Normal close".to_string()), |f| {
                            (f.code.into(), f.reason.to_string())
                        });
                    return Err(WsHandlerError::ConnectionClosed { code, reason });
                }
                Some(Ok(_)) => (),
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(SessionEnd::Closed),
            },

            outbound = outbound_receiver.recv() => match outbound {
                Some(frame) => send_frame(&mut write, frame, unsent).await?,
                None => return Ok(SessionEnd::Stopped),
            },
        }
    }
}

/// On a write failure the frame is kept in `unsent` for the next connection
async fn send_frame<W>(
    write: &mut W,
    frame: OutboundFrame,
    unsent: &mut Option<OutboundFrame>,
) -> Result<(), WsHandlerError>
where
    W: futures::Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    let text = frame.to_text()?;
    if let Err(e) = write.send(Message::Text(text)).await {
        *unsent = Some(frame);
        return Err(e.into());
    }
    Ok(())
}
