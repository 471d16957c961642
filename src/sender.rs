use crate::config::SenderConfig;
use crate::control::ControlFrame;
use crate::error::SenderError;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, error, info, warn};

/// Destination for interpreted control frames.
#[async_trait]
pub trait ControlSink: Send {
    async fn send(&mut self, frame: &ControlFrame) -> Result<(), SenderError>;
}

/// Persistent TCP link to the actuator endpoint.
///
/// The connection is attempted once at construction; a refused connection
/// is reported and leaves the sender disconnected rather than failing the
/// caller. Send failures drop the link and are surfaced to the caller,
/// never retried here.
pub struct ControlSender {
    config: SenderConfig,
    stream: Option<TcpStream>,
    frames_sent: u64,
}

impl ControlSender {
    /// Connect to the configured endpoint.
    pub async fn connect(config: SenderConfig) -> Self {
        let stream = match TcpStream::connect((config.host.as_str(), config.port)).await {
            Ok(stream) => {
                info!("Connected to actuator at {}:{}", config.host, config.port);
                Some(stream)
            }
            Err(e) => {
                error!(
                    "Connection to {}:{} refused: {}",
                    config.host, config.port, e
                );
                None
            }
        };

        Self {
            config,
            stream,
            frames_sent: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

#[async_trait]
impl ControlSink for ControlSender {
    async fn send(&mut self, frame: &ControlFrame) -> Result<(), SenderError> {
        let stream = self.stream.as_mut().ok_or(SenderError::NotConnected)?;

        let payload = frame.encode();
        if let Err(e) = stream.write_all(&payload).await {
            warn!(
                "Dropping actuator link {}:{} after write failure: {}",
                self.config.host, self.config.port, e
            );
            self.stream = None;
            return Err(SenderError::Write(e));
        }

        self.frames_sent += 1;
        debug!(
            "Sent control record {} ({} bytes)",
            self.frames_sent,
            payload.len()
        );
        Ok(())
    }
}

/// Sink that counts and discards control frames. Used for dry runs.
#[derive(Debug, Default)]
pub struct NullSink {
    frames_discarded: u64,
}

impl NullSink {
    pub fn frames_discarded(&self) -> u64 {
        self.frames_discarded
    }
}

#[async_trait]
impl ControlSink for NullSink {
    async fn send(&mut self, _frame: &ControlFrame) -> Result<(), SenderError> {
        self.frames_discarded += 1;
        Ok(())
    }
}
