//! ACP Server implementation.
//!
//! Runs the request loop over stdio: one request is read, fully handled and
//! answered before the next line is read.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{debug, info};

use crate::acp::handler::{AcpHandler, LoopControl};
use crate::acp::transport::LineTransport;
use crate::config::Config;
use crate::gateway::{CompletionGateway, NimClient};

/// ACP server bound to a completion gateway.
pub struct AcpServer {
    handler: AcpHandler,
}

impl AcpServer {
    /// Create a new ACP server.
    pub fn new(config: &Config, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            handler: AcpHandler::new(config, gateway),
        }
    }

    /// Create a server backed by the NVIDIA NIM HTTP client.
    pub fn with_nim_client(config: &Config) -> Result<Self> {
        let client = NimClient::new(&config.base_url, config.request_timeout)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Run the server with stdio transport.
    ///
    /// Reads JSON-RPC requests from stdin and writes responses and
    /// notifications to stdout. Nothing else is ever written to stdout.
    pub async fn run_stdio(&mut self) -> Result<()> {
        info!("Starting ACP server on stdio transport");
        let reader = BufReader::new(tokio::io::stdin());
        self.run(reader, tokio::io::stdout()).await
    }

    /// Serve requests from `reader` until end of input or `session/end`.
    pub async fn run<R, W>(&mut self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut transport = LineTransport::new(reader, writer);
        let mut handled = 0usize;

        while let Some(request) = transport.read_request().await? {
            let dispatch = self.handler.process_request(request).await;
            handled += 1;

            for message in &dispatch.messages {
                transport.write_message(message).await?;
            }

            if dispatch.control == LoopControl::Stop {
                info!(requests = handled, "ACP server stopped by session/end");
                return Ok(());
            }
        }

        debug!(requests = handled, "Input closed");
        info!("ACP server stopped at end of input");
        Ok(())
    }
}
