use crate::foundation::error::{LottieError, LottieResult};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where an asset's animation description comes from.
///
/// Embedded data and a filesystem path are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetSource {
    /// Bytes compiled into the program image.
    Embedded(Arc<[u8]>),
    /// A file read when the engine decodes the asset.
    File(PathBuf),
}

impl AssetSource {
    /// Embed `bytes`.
    pub fn embedded(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Embedded(bytes.into())
    }

    /// Refer to the file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Path of a file source.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(p) => Some(p),
            Self::Embedded(_) => None,
        }
    }

    /// Load the source bytes. Read failures are decode failures for the asset.
    pub fn read_bytes(&self) -> LottieResult<Cow<'_, [u8]>> {
        match self {
            Self::Embedded(bytes) => Ok(Cow::Borrowed(bytes)),
            Self::File(path) => std::fs::read(path).map(Cow::Owned).map_err(|e| {
                LottieError::decode(format!("failed to read '{}': {e}", path.display()))
            }),
        }
    }
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded(bytes) => write!(f, "embedded ({} bytes)", bytes.len()),
            Self::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}
