//! gRPC implementations of the manager and position ports.

pub mod channel;
pub mod client;
pub mod proto;

pub use client::{GrpcManager, GrpcPosition};
