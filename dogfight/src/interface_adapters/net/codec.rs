// Frame decoder for back-to-back JSON objects on a byte stream. Messages carry
// no delimiter or length prefix; a frame ends where its JSON value ends.

use serde::de::DeserializeOwned;

#[derive(Debug, Default)]
pub struct JsonFrames {
    buf: Vec<u8>,
}

impl JsonFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Decodes the next complete frame.
    ///
    /// `Ok(None)` means more bytes are needed. A malformed frame discards the
    /// whole buffer, since there is no delimiter to resynchronise on.
    pub fn next_frame<T: DeserializeOwned>(&mut self) -> Result<Option<T>, serde_json::Error> {
        let (next, consumed) = {
            let mut stream = serde_json::Deserializer::from_slice(&self.buf).into_iter::<T>();
            let next = stream.next();
            (next, stream.byte_offset())
        };

        match next {
            Some(Ok(frame)) => {
                self.buf.drain(..consumed);
                Ok(Some(frame))
            }
            Some(Err(e)) if e.is_eof() => Ok(None),
            Some(Err(e)) => {
                self.buf.clear();
                Err(e)
            }
            // Only whitespace left.
            None => {
                self.buf.clear();
                Ok(None)
            }
        }
    }
}
