//! Frame timing: which frame to render for a given playback time, and how long to wait.

pub(crate) mod clock;
pub(crate) mod frame;
pub(crate) mod playhead;
