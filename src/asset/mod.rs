//! Per-asset configuration and the state shared with its worker.

pub(crate) mod config;
pub(crate) mod context;
pub(crate) mod source;
