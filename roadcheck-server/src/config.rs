//! Dataset locations.

use std::path::PathBuf;

/// Default location of the speed camera CSV.
pub const DEFAULT_CAMERAS_PATH: &str = "supplementary-data/speed-cameras.csv";

/// Default location of the Geohub road closure export.
pub const DEFAULT_CLOSURES_PATH: &str = "supplementary-data/full-road-closures.json";

/// Where the static datasets are read from at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Speed camera CSV
    pub cameras_path: PathBuf,

    /// Full road closure ArcGIS JSON
    pub closures_path: PathBuf,
}

impl DataConfig {
    /// Create a config with explicit paths.
    pub fn new(cameras_path: impl Into<PathBuf>, closures_path: impl Into<PathBuf>) -> Self {
        Self {
            cameras_path: cameras_path.into(),
            closures_path: closures_path.into(),
        }
    }

    /// Read all datasets from one directory, using the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(
            dir.join("speed-cameras.csv"),
            dir.join("full-road-closures.json"),
        )
    }

    /// Set the camera CSV path.
    pub fn with_cameras_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cameras_path = path.into();
        self
    }

    /// Set the closure JSON path.
    pub fn with_closures_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.closures_path = path.into();
        self
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERAS_PATH, DEFAULT_CLOSURES_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = DataConfig::default();
        assert_eq!(config.cameras_path, PathBuf::from(DEFAULT_CAMERAS_PATH));
        assert_eq!(config.closures_path, PathBuf::from(DEFAULT_CLOSURES_PATH));
    }

    #[test]
    fn in_dir_uses_default_names() {
        let config = DataConfig::in_dir("data/fixtures");
        assert_eq!(config, DataConfig::default()
            .with_cameras_path("data/fixtures/speed-cameras.csv")
            .with_closures_path("data/fixtures/full-road-closures.json"));
    }
}
