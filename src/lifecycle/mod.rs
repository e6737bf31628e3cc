//! Asset lifecycle: the state machine driven by screen and visibility events, and the worker
//! body it launches.

pub(crate) mod manager;
pub(crate) mod state;
pub(crate) mod task;
