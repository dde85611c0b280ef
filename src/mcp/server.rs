//! The dispatcher loop
//!
//! Reads one message, routes it through the [`MethodTable`], writes exactly
//! one response, and only then reads the next line. Undecodable lines are
//! dropped; any other transport failure ends the session.

use std::{sync::Arc, time::Instant};

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::registry::ToolRegistry;
use crate::errors::{AppError, TransportError};
use crate::logging::audit_dispatch;
use crate::mcp::{
    methods::MethodTable,
    rpc::{display_value, Message, Response, RpcError},
    transport::StdioTransport,
};

pub struct Server {
    methods: MethodTable,
}

impl Server {
    pub fn new(config: &Config, registry: Arc<ToolRegistry>) -> Self {
        Self::with_methods(MethodTable::new(config, registry))
    }

    pub fn with_methods(methods: MethodTable) -> Self {
        Self { methods }
    }

    /// Produces the response for a single message. Never fails: every
    /// routing or tool failure becomes an error envelope with the same id.
    pub async fn dispatch(&self, message: Message) -> Response {
        let started_at = Instant::now();
        let (id, method, params) = message.into_parts();
        let audit_params = params.clone();

        let handler = method.as_str().and_then(|name| self.methods.get(name));
        let method = display_value(&method);

        let outcome = match handler {
            Some(handler) => handler.handle(params).await,
            None => Err(AppError::MethodNotFound(method.clone())),
        };

        let response = match outcome {
            Ok(result) => Response::success(id, result),
            Err(err) => Response::failure(id, RpcError::from(&err)),
        };

        audit_dispatch(
            &method,
            &response.id,
            &audit_params,
            response.is_error(),
            started_at.elapsed(),
        );
        response
    }

    /// Serves the transport until end of stream (`Ok`) or a fatal transport
    /// error (`Err`, already logged).
    pub async fn run<R, W>(
        &self,
        transport: &mut StdioTransport<R, W>,
    ) -> Result<(), TransportError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("server listening for messages");

        let result = loop {
            let message = match transport.read_message().await {
                Ok(Some(message)) => message,
                Ok(None) => {
                    debug!("input closed");
                    break Ok(());
                }
                Err(err) if err.is_recoverable() => {
                    warn!(error = %err, "dropping undecodable message");
                    continue;
                }
                Err(err) => break Err(err),
            };

            let response = self.dispatch(message).await;
            if let Err(err) = transport.write_message(&response).await {
                break Err(err);
            }
        };

        if let Err(err) = &result {
            error!(error = %err, "fatal transport error, stopping");
        }
        info!("server shutting down");
        result
    }
}
