//! Model Context Protocol (MCP) dispatcher over line-delimited JSON-RPC
//!
//! Provides the wire envelopes, the stdio transport, the method routing table
//! and the sequential server loop that ties them together.

pub mod methods;
pub mod rpc;
pub mod server;
pub mod transport;
