// Message-oriented TCP transport to the relay. Every call is bounded by the
// transport timeout; running out of time is a soft outcome, not an error.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, info, warn};

use super::{JsonFrames, NetError};
use crate::interface_adapters::protocol::RelayFrame;

const READ_CHUNK: usize = 4096;
// Upper bound on the final read before close, so quitting stays snappy.
const CLOSE_DRAIN: Duration = Duration::from_millis(250);

pub struct Transport {
    stream: TcpStream,
    frames: JsonFrames,
    timeout: Duration,
}

impl Transport {
    pub async fn connect(host: &str, port: u16, call_timeout: Duration) -> Result<Self, NetError> {
        let stream = match timeout(call_timeout, TcpStream::connect((host, port))).await {
            Ok(stream) => stream?,
            Err(_) => {
                return Err(NetError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("connect to {host}:{port} timed out"),
                )));
            }
        };
        stream.set_nodelay(true)?;
        info!(host, port, "connected to relay");
        Ok(Self::new(stream, call_timeout))
    }

    pub fn new(stream: TcpStream, call_timeout: Duration) -> Self {
        Self {
            stream,
            frames: JsonFrames::new(),
            timeout: call_timeout,
        }
    }

    /// Writes one frame. Returns `Ok(false)` when the socket was not writable
    /// within the timeout; the caller decides whether that tick is lost.
    pub async fn send(&mut self, frame: &RelayFrame) -> Result<bool, NetError> {
        let bytes = serde_json::to_vec(frame)?;
        match timeout(self.timeout, self.stream.write_all(&bytes)).await {
            Ok(written) => {
                written?;
                Ok(true)
            }
            Err(_) => {
                warn!(bytes = bytes.len(), "send timed out");
                Ok(false)
            }
        }
    }

    /// Reads until one complete frame is buffered. Returns `Ok(None)` when the
    /// timeout elapses first, which callers cannot tell apart from a quiet
    /// relay. Malformed frames are dropped and reading continues.
    pub async fn receive(&mut self) -> Result<Option<RelayFrame>, NetError> {
        self.receive_within(self.timeout).await
    }

    async fn receive_within(&mut self, limit: Duration) -> Result<Option<RelayFrame>, NetError> {
        let deadline = Instant::now() + limit;
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            match self.frames.next_frame::<RelayFrame>() {
                Ok(Some(frame)) => return Ok(Some(frame)),
                Ok(None) => {}
                Err(e) => debug!(error = %e, "dropping malformed frame"),
            }

            match timeout_at(deadline, self.stream.read(&mut chunk)).await {
                Err(_) => return Ok(None),
                Ok(Ok(0)) => return Err(NetError::Closed),
                Ok(Ok(n)) => self.frames.extend(&chunk[..n]),
                Ok(Err(e)) => return Err(NetError::Io(e)),
            }
        }
    }

    /// Drains one pending frame (so the relay's last send is acknowledged by
    /// the read) and shuts the socket down. The drain waits at most
    /// `CLOSE_DRAIN`, or the call timeout if that is shorter.
    pub async fn close(&mut self) {
        match self.receive_within(self.timeout.min(CLOSE_DRAIN)).await {
            Ok(Some(_)) => debug!("drained final frame"),
            Ok(None) => debug!("nothing to drain before close"),
            Err(e) => debug!(error = ?e, "drain before close failed"),
        }
        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "socket shutdown failed");
        }
        info!("disconnected from relay");
    }
}
