//! Line-delimited JSON transport
//!
//! One JSON object per line in each direction. Generic over the reader and
//! writer so sessions can run against in-memory buffers.

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tracing::trace;

use crate::errors::TransportError;
use crate::mcp::rpc::{Message, Response};

pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl StdioTransport<Stdin, Stdout> {
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Reads the next message.
    ///
    /// Returns `Ok(None)` at end of stream. Blank lines are skipped. A line
    /// that is not a JSON object yields [`TransportError::Decode`]; the line
    /// is consumed and the next call continues after it.
    pub async fn read_message(&mut self) -> Result<Option<Message>, TransportError> {
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(TransportError::Read)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        trace!(len = line.len(), "read message");
        Message::decode(line.trim())
            .map(Some)
            .map_err(TransportError::Decode)
    }

    /// Writes one response as a single newline-terminated line and flushes.
    pub async fn write_message(&mut self, response: &Response) -> Result<(), TransportError> {
        let mut line = serde_json::to_string(response).map_err(TransportError::Encode)?;
        line.push('\n');
        trace!(len = line.len(), "writing message");

        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(TransportError::Write)?;
        self.writer.flush().await.map_err(TransportError::Write)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
