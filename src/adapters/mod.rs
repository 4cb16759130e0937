// Adapters layer: concrete implementations of the domain ports.

pub mod jsonrpc;

pub use jsonrpc::{JsonRpcTransport, OdooClient};
