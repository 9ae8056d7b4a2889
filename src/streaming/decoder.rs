//! Incremental UTF-8 decoding
//!
//! Upstream chunks can end in the middle of a multi-byte character. The
//! decoder holds back an incomplete trailing sequence until the bytes that
//! complete it arrive.

/// Stateful UTF-8 decoder for a byte stream split at arbitrary offsets.
///
/// Invalid sequences decode to U+FFFD, the same way `String::from_utf8_lossy`
/// treats them, so the output does not depend on where the input was split.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of an incomplete trailing sequence
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        while start < self.pending.len() {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        None => {
                            // Incomplete sequence at the end: wait for more bytes.
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Whether an incomplete sequence is being held back
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
