//! Labeling configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::feature::FeatureFlags;

// ============================================================================
// Connectivity
// ============================================================================

/// Pixel connectivity for connected component labeling.
///
/// Serialized as the neighbour count, `4` or `8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Connectivity {
    /// Only horizontal and vertical neighbours: (x±1, y) and (x, y±1).
    Four,
    /// Diagonal neighbours are connected as well.
    #[default]
    Eight,
}

impl Connectivity {
    /// Number of neighbours, 4 or 8.
    #[inline]
    pub const fn neighbours(self) -> u8 {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(Error::InvalidConnectivity(other)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(value: Connectivity) -> Self {
        value.neighbours()
    }
}

// ============================================================================
// Labeling configuration
// ============================================================================

/// Parameters of one labeling run.
///
/// Pixels equal to `background` are background; every other value is
/// foreground. `foreground` documents the expected foreground value and must
/// differ from `background`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config<T> {
    pub connectivity: Connectivity,
    pub foreground: T,
    pub background: T,
    /// Features to extract. Empty selects the label-only path.
    #[serde(default)]
    pub features: FeatureFlags,
}

impl<T: Copy + PartialEq> Config<T> {
    /// 8-connectivity, no features.
    pub fn new(foreground: T, background: T) -> Self {
        Self {
            connectivity: Connectivity::default(),
            foreground,
            background,
            features: FeatureFlags::NONE,
        }
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Validate the configuration.
    ///
    /// The connectivity enum is closed, so only the markers can be wrong.
    pub fn validate(&self) -> Result<()> {
        if self.foreground == self.background {
            return Err(Error::IdenticalMarkers);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn is_background(&self, value: T) -> bool {
        value == self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_connectivity_from_u8() {
        assert_eq!(Connectivity::try_from(4).unwrap(), Connectivity::Four);
        assert_eq!(Connectivity::try_from(8).unwrap(), Connectivity::Eight);
        let err = Connectivity::try_from(6).unwrap_err();
        assert_eq!(err, Error::InvalidConnectivity(6));
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(u8::from(Connectivity::Four), 4);
    }

    #[test]
    fn test_identical_markers_rejected() {
        assert_eq!(
            Config::new(1u8, 1u8).validate().unwrap_err(),
            Error::IdenticalMarkers
        );
        assert!(Config::new(1u8, 0u8).validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = Config::new(255u8, 0u8)
            .with_connectivity(Connectivity::Four)
            .with_features(FeatureFlags::AREA | FeatureFlags::CENTROID);
        assert_eq!(config.connectivity, Connectivity::Four);
        assert!(config.features.contains(FeatureFlags::CENTROID));
        assert!(config.is_background(0));
        assert!(!config.is_background(7));
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{"connectivity":4,"foreground":2,"background":0,"features":8}"#;
        let config: Config<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(config.connectivity, Connectivity::Four);
        assert_eq!(config.features, FeatureFlags::BOUNDING_BOX);
        assert_eq!(serde_json::to_string(&config).unwrap(), json);

        let bad = r#"{"connectivity":6,"foreground":1,"background":0}"#;
        assert!(serde_json::from_str::<Config<i32>>(bad).is_err());
    }
}
