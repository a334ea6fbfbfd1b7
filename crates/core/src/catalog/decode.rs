//! Incremental decoder for a top-level JSON array of objects.
//!
//! `serde_json` wants a complete value; the bulk file is far too large to
//! hold as one buffer. This splitter tracks string/escape state and brace
//! depth across chunk boundaries, carving out one complete element at a
//! time and deserializing each in isolation. Only the bytes of the element
//! currently being assembled are ever buffered.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Payload is not a JSON array")]
    NotAnArray,

    #[error("Unexpected character '{0}' at top level of array")]
    UnexpectedToken(char),

    #[error("Payload ended mid-array")]
    Truncated,

    #[error("Trailing data after closing bracket")]
    TrailingData,

    #[error("Invalid array element: {0}")]
    Element(String),
}

/// Chunk-fed splitter/decoder for one JSON array.
pub struct JsonArrayDecoder {
    buf: Vec<u8>,
    started: bool,
    finished: bool,
}

impl Default for JsonArrayDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonArrayDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Feed the next chunk, returning every element completed by it.
    pub fn push<T: DeserializeOwned>(&mut self, chunk: &[u8]) -> Result<Vec<T>, DecodeError> {
        self.buf.extend_from_slice(chunk);

        let mut items = Vec::new();
        let mut pos = 0;

        if !self.started {
            pos = skip_whitespace(&self.buf, pos);
            if pos >= self.buf.len() {
                self.buf.drain(..pos);
                return Ok(items);
            }
            if self.buf[pos] != b'[' {
                return Err(DecodeError::NotAnArray);
            }
            pos += 1;
            self.started = true;
        }

        loop {
            pos = skip_whitespace(&self.buf, pos);
            if pos >= self.buf.len() {
                break;
            }

            if self.finished {
                return Err(DecodeError::TrailingData);
            }

            match self.buf[pos] {
                b',' => pos += 1,
                b']' => {
                    self.finished = true;
                    pos += 1;
                }
                b'{' => match element_end(&self.buf[pos..]) {
                    Some(len) => {
                        let item = serde_json::from_slice(&self.buf[pos..pos + len])
                            .map_err(|e| DecodeError::Element(e.to_string()))?;
                        items.push(item);
                        pos += len;
                    }
                    // Element spans into the next chunk; keep its bytes.
                    None => break,
                },
                other => return Err(DecodeError::UnexpectedToken(other as char)),
            }
        }

        self.buf.drain(..pos);
        Ok(items)
    }

    /// Assert the stream formed one complete array.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if !self.started || !self.finished {
            return Err(DecodeError::Truncated);
        }
        Ok(())
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\n' | b'\r') {
        pos += 1;
    }
    pos
}

/// Length of the complete object starting at `bytes[0]`, or `None` if it
/// continues past the end of the buffer.
fn element_end(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
