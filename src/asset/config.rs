use crate::asset::source::AssetSource;
use crate::engine::probe::probe_header;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{LottieError, LottieResult};
use std::path::{Path, PathBuf};

/// Immutable configuration of one asset instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetConfig {
    /// Animation description.
    pub source: AssetSource,
    /// Pixel size of the draw target.
    pub dimensions: Dimensions,
    /// Cycle forever instead of stopping on the end frame.
    pub looping: bool,
    /// Start playback as soon as the asset is loaded.
    pub auto_start: bool,
}

impl AssetConfig {
    /// Create a config with `looping` and `auto_start` enabled.
    pub fn new(source: AssetSource, dimensions: Dimensions) -> Self {
        Self {
            source,
            dimensions,
            looping: true,
            auto_start: true,
        }
    }

    /// Set the loop flag.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the auto-start flag.
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Build a config from a Lottie JSON file.
    ///
    /// The file must exist and carry `w`/`h`; its bytes are embedded so the worker never touches
    /// the filesystem.
    pub fn from_lottie_file(
        path: impl AsRef<Path>,
        looping: bool,
        auto_start: bool,
    ) -> LottieResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LottieError::validation(format!(
                "Lottie file not found: {}",
                path.display()
            )));
        }
        let bytes = std::fs::read(path).map_err(|e| {
            LottieError::validation(format!("failed to read '{}': {e}", path.display()))
        })?;
        let header = probe_header(&bytes).map_err(|e| {
            LottieError::validation(format!("{} ({})", e, path.display()))
        })?;
        let dimensions = header.dimensions()?;

        Ok(Self {
            source: AssetSource::embedded(bytes),
            dimensions,
            looping,
            auto_start,
        })
    }
}

fn default_true() -> bool {
    true
}

/// Declarative form of an asset, as written in a device configuration file.
///
/// ```json
/// { "file": "loading.json", "loop": false }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetSpec {
    /// Lottie JSON path, relative to the configuration directory.
    pub file: PathBuf,
    /// Loop playback (default `true`).
    #[serde(rename = "loop", default = "default_true")]
    pub looping: bool,
    /// Start playback on load (default `true`).
    #[serde(default = "default_true")]
    pub auto_start: bool,
}

impl AssetSpec {
    /// Resolve `file` against `base_dir` and build an [`AssetConfig`].
    pub fn resolve(&self, base_dir: &Path) -> LottieResult<AssetConfig> {
        let path = if self.file.is_absolute() {
            self.file.clone()
        } else {
            base_dir.join(&self.file)
        };
        AssetConfig::from_lottie_file(path, self.looping, self.auto_start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/asset/config.rs"]
mod tests;
