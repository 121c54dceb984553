use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, OptionsError};
use foundation::math::GeoCoordinate;
use scene::prefabs::FaceLayout;

pub const DEFAULT_FACE_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT_RATIO: f64 = 4.0;
pub const DEFAULT_PANELS: usize = 3;
pub const DEFAULT_ZOOM: f64 = 10.0;
/// Central Park, New York.
pub const DEFAULT_CENTER: GeoCoordinate = GeoCoordinate {
    lat: 40.7808,
    lng: -73.9772,
};

/// Base map style requested from the mapping service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    #[default]
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

/// Composition-time configuration of an atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtlasOptions {
    /// Face width in pixels.
    pub width: f64,
    /// Face height as a multiple of `width`.
    pub ratio: f64,
    /// Number of folding pairs.
    pub panels: usize,
    pub center: GeoCoordinate,
    pub zoom: f64,
    pub map_type: MapType,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_FACE_WIDTH,
            ratio: DEFAULT_HEIGHT_RATIO,
            panels: DEFAULT_PANELS,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            map_type: MapType::default(),
        }
    }
}

impl AtlasOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(payload: &str) -> Result<Self, AtlasError> {
        let options: Self = serde_json::from_str(payload).map_err(AtlasError::Config)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.panels == 0 {
            return Err(OptionsError::ZeroPanels);
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(OptionsError::NonPositiveWidth(self.width));
        }
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(OptionsError::NonPositiveRatio(self.ratio));
        }
        if !self.center.is_finite() {
            return Err(OptionsError::NonFiniteCenter);
        }
        if !self.zoom.is_finite() {
            return Err(OptionsError::NonFiniteZoom(self.zoom));
        }
        Ok(())
    }

    pub fn face_layout(&self) -> FaceLayout {
        FaceLayout::new(self.width, self.ratio)
    }

    pub fn face_count(&self) -> usize {
        self.panels * scene::FACES_PER_PAIR
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{AtlasOptions, DEFAULT_CENTER, MapType};
    use crate::error::{AtlasError, OptionsError};

    #[test]
    fn empty_object_takes_defaults() {
        let options = AtlasOptions::from_json("{}").expect("defaults");
        assert_eq!(options, AtlasOptions::default());
        assert_eq!(options.panels, 3);
        assert_eq!(options.center, DEFAULT_CENTER);
        assert_eq!(options.face_count(), 6);
    }

    #[test]
    fn parses_camel_case_fields() {
        let options = AtlasOptions::from_json(
            r#"{"width": 120, "ratio": 2.5, "panels": 4, "mapType": "satellite",
                "center": {"lat": 48.8566, "lng": 2.3522}, "zoom": 12}"#,
        )
        .expect("valid options");
        assert_eq!(options.width, 120.0);
        assert_eq!(options.map_type, MapType::Satellite);
        assert_eq!(options.face_layout().height(), 300.0);
        assert_eq!(options.center.lng, 2.3522);
    }

    #[test]
    fn rejects_zero_panels() {
        let err = AtlasOptions::from_json(r#"{"panels": 0}"#).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidOptions(OptionsError::ZeroPanels)));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let mut options = AtlasOptions::default();
        options.width = 0.0;
        assert_eq!(options.validate(), Err(OptionsError::NonPositiveWidth(0.0)));

        options.width = 100.0;
        options.ratio = -1.0;
        assert_eq!(options.validate(), Err(OptionsError::NonPositiveRatio(-1.0)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = AtlasOptions::from_json("{width: }").unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }
}
