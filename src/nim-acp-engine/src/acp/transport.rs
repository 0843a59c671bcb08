//! Newline-delimited JSON transport.
//!
//! One JSON object per line in both directions. Lines that are not valid
//! requests are logged and skipped; they are never answered.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::acp::protocol::AcpRequest;

/// Line codec over an async reader/writer pair.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
    line: Vec<u8>,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: Vec::new(),
        }
    }

    /// Read the next valid request. `Ok(None)` means end of stream.
    pub async fn read_request(&mut self) -> Result<Option<AcpRequest>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line).await? == 0 {
                return Ok(None);
            }

            let trimmed = self.line.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }

            let text = match std::str::from_utf8(trimmed) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Skipping line that is not valid UTF-8");
                    continue;
                }
            };

            debug!("Received line: {}", text);

            let value: Value = match serde_json::from_str(text) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "Skipping line that is not valid JSON");
                    continue;
                }
            };

            match serde_json::from_value::<AcpRequest>(value) {
                Ok(request) => return Ok(Some(request)),
                Err(e) => {
                    warn!(error = %e, "Skipping line that is not a valid request");
                }
            }
        }
    }

    /// Write one message as a JSON line and flush.
    pub async fn write_message<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let mut json = serde_json::to_vec(message)?;
        json.push(b'\n');
        self.writer.write_all(&json).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
