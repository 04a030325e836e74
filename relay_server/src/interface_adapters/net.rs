// TCP edge of the relay: one task per connection, forwarding decoded frames to
// the relay task and writing back whatever it sends.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{Instrument, Span, debug, info, info_span, warn};

use crate::interface_adapters::codec::{FrameError, FrameReader};
use crate::interface_adapters::utils::rng::rand_id;
use crate::use_cases::{ConnId, RelayEvent};

const LOG_THROTTLE: Duration = Duration::from_secs(2);
const READ_CHUNK: usize = 4096;

#[derive(Debug)]
enum NetError {
    Io(std::io::Error),
    RelayClosed,
}

impl From<std::io::Error> for NetError {
    fn from(e: std::io::Error) -> Self {
        NetError::Io(e)
    }
}

enum LoopControl {
    Continue,
    Disconnect,
}

fn should_log(last: &mut Instant) -> bool {
    if last.elapsed() >= LOG_THROTTLE {
        *last = Instant::now();
        true
    } else {
        false
    }
}

/// Accepts connections until the listener fails. Accept errors on a single
/// connection are logged and skipped.
pub async fn accept_loop(
    listener: TcpListener,
    events: mpsc::Sender<RelayEvent>,
    outbound_capacity: usize,
) -> std::io::Result<()> {
    let mut last_accept_log = Instant::now() - LOG_THROTTLE;
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                if should_log(&mut last_accept_log) {
                    warn!(error = %e, "accept failed");
                }
                continue;
            }
        };
        if let Err(e) = socket.set_nodelay(true) {
            debug!(%peer, error = %e, "failed to set nodelay");
        }

        let conn_id = rand_id();
        let span = info_span!("conn", conn_id, client_id = tracing::field::Empty);
        tokio::spawn(
            handle_connection(socket, peer, conn_id, events.clone(), outbound_capacity)
                .instrument(span),
        );
    }
}

async fn handle_connection(
    socket: TcpStream,
    peer: SocketAddr,
    conn_id: ConnId,
    events: mpsc::Sender<RelayEvent>,
    outbound_capacity: usize,
) {
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<Arc<str>>(outbound_capacity);
    let connected = RelayEvent::Connected {
        conn_id,
        outbound: outbound_tx,
    };
    if events.send(connected).await.is_err() {
        warn!("relay task gone; refusing connection");
        return;
    }
    info!(%peer, "client connected");

    let (mut reader, mut writer) = socket.into_split();
    let mut frames = FrameReader::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    let mut client_known = false;
    let mut last_malformed_log = Instant::now() - LOG_THROTTLE;

    let fatal = loop {
        let control = tokio::select! {
            read = reader.read(&mut chunk) => match read {
                Ok(0) => Ok(LoopControl::Disconnect),
                Ok(n) => {
                    frames.push(&chunk[..n]);
                    forward_frames(
                        conn_id,
                        &mut frames,
                        &events,
                        &mut client_known,
                        &mut last_malformed_log,
                    )
                    .await
                }
                Err(e) => Err(NetError::from(e)),
            },
            outbound = outbound_rx.recv() => match outbound {
                Some(text) => writer
                    .write_all(text.as_bytes())
                    .await
                    .map(|()| LoopControl::Continue)
                    .map_err(NetError::from),
                None => {
                    info!("relay closed the connection");
                    Ok(LoopControl::Disconnect)
                }
            },
        };

        match control {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Disconnect) => break None,
            Err(e) => break Some(e),
        }
    };

    match fatal {
        Some(NetError::Io(e)) => warn!(error = %e, kind = ?e.kind(), "connection error"),
        Some(NetError::RelayClosed) => warn!("relay task gone; dropping connection"),
        None => {}
    }
    let _ = writer.shutdown().await;
    let _ = events.send(RelayEvent::Disconnected { conn_id }).await;
    info!("client disconnected");
}

// Hand every complete frame in the buffer to the relay task.
async fn forward_frames(
    conn_id: ConnId,
    frames: &mut FrameReader,
    events: &mpsc::Sender<RelayEvent>,
    client_known: &mut bool,
    last_malformed_log: &mut Instant,
) -> Result<LoopControl, NetError> {
    loop {
        match frames.next_frame() {
            Ok(Some(frame)) => {
                if !*client_known && let Some(client_id) = frame.keys().next() {
                    Span::current().record("client_id", client_id.as_str());
                    *client_known = true;
                }
                events
                    .send(RelayEvent::Frame { conn_id, frame })
                    .await
                    .map_err(|_| NetError::RelayClosed)?;
            }
            Ok(None) => return Ok(LoopControl::Continue),
            Err(FrameError::Malformed(e)) => {
                if should_log(last_malformed_log) {
                    warn!(error = %e, "malformed frame; dropping");
                }
            }
            Err(FrameError::Oversized { bytes }) => {
                if should_log(last_malformed_log) {
                    warn!(bytes, "oversized frame; dropping");
                }
            }
        }
    }
}
