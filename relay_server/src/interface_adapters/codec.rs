// Splits a TCP byte stream into JSON frames. Frames have no delimiter, so a
// frame ends where its JSON object ends.

use crate::interface_adapters::protocol::ClientFrame;

// A well-behaved client never has this much undecoded data in flight.
const MAX_BUFFERED: usize = 64 * 1024;

#[derive(Debug)]
pub enum FrameError {
    Malformed(serde_json::Error),
    Oversized { bytes: usize },
}

#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    // Next complete frame, or `Ok(None)` until more bytes arrive. On error the
    // buffer is discarded and decoding starts over with the next read.
    pub fn next_frame(&mut self) -> Result<Option<ClientFrame>, FrameError> {
        let (next, consumed) = {
            let mut stream =
                serde_json::Deserializer::from_slice(&self.buf).into_iter::<ClientFrame>();
            (stream.next(), stream.byte_offset())
        };

        match next {
            Some(Ok(frame)) => {
                self.buf.drain(..consumed);
                Ok(Some(frame))
            }
            Some(Err(e)) if e.is_eof() => {
                if self.buf.len() > MAX_BUFFERED {
                    let bytes = self.buf.len();
                    self.buf.clear();
                    return Err(FrameError::Oversized { bytes });
                }
                Ok(None)
            }
            Some(Err(e)) => {
                self.buf.clear();
                Err(FrameError::Malformed(e))
            }
            None => {
                self.buf.clear();
                Ok(None)
            }
        }
    }
}
