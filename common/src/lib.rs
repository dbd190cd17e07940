//! Shared model, payloads and text transforms for the call script desk.
//!
//! Everything in this crate is free of I/O. The backend wires these pieces to
//! storage and HTTP; any other client can reuse them as-is.

pub mod call_flow;
pub mod markup;
pub mod model;
pub mod render;
pub mod requests;
pub mod responses;
