use crate::memory::region::Region;

/// Convenience result type used across lottie-host.
pub type LottieResult<T> = Result<T, LottieError>;

/// Error taxonomy for the asset lifecycle.
///
/// None of these are fatal to the host: launch paths turn them into an `Err` for the caller,
/// worker paths turn them into a silently idle asset.
#[derive(thiserror::Error, Debug)]
pub enum LottieError {
    /// A memory region could not satisfy a request.
    #[error("allocation error: region {region} cannot fit {requested} bytes ({available} free)")]
    Allocation {
        /// Region that was asked.
        region: Region,
        /// Requested size in bytes.
        requested: usize,
        /// Free bytes in the region at the time of the request.
        available: usize,
    },

    /// The animation source is malformed or unreadable.
    #[error("decode error: {0}")]
    Decode(String),

    /// The source parsed but its frame range or duration cannot be scheduled.
    #[error("degenerate metadata: {0}")]
    DegenerateMetadata(String),

    /// The worker execution context could not be created.
    #[error("worker spawn error: {0}")]
    WorkerSpawn(String),

    /// The worker did not reach a safe point in time.
    #[error("stop timeout: {0}")]
    StopTimeout(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LottieError {
    /// Build a [`LottieError::Allocation`] value.
    pub fn allocation(region: Region, requested: usize, available: usize) -> Self {
        Self::Allocation {
            region,
            requested,
            available,
        }
    }

    /// Build a [`LottieError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`LottieError::DegenerateMetadata`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateMetadata(msg.into())
    }

    /// Build a [`LottieError::WorkerSpawn`] value.
    pub fn worker_spawn(msg: impl Into<String>) -> Self {
        Self::WorkerSpawn(msg.into())
    }

    /// Build a [`LottieError::StopTimeout`] value.
    pub fn stop_timeout(msg: impl Into<String>) -> Self {
        Self::StopTimeout(msg.into())
    }

    /// Build a [`LottieError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `true` for failures that happen while acquiring launch resources.
    ///
    /// These roll the asset back to `Unloaded`; the widget decides whether to show a placeholder.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Self::Allocation { .. } | Self::WorkerSpawn(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
