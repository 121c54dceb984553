use serde::Serialize;

use crate::options::MapType;
use foundation::math::GeoCoordinate;

/// One external map view hosted by a face.
///
/// Mutations are fire-and-forget: the mapping service is assumed to apply
/// them without blocking or failing.
pub trait MapViewport {
    fn set_center(&mut self, center: GeoCoordinate);
    fn set_zoom(&mut self, zoom: f64);
}

/// Construction options handed to the mapping service for each viewport.
///
/// Field names follow the service's option object so the value can be
/// serialized straight into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportOptions {
    pub center: GeoCoordinate,
    pub zoom: f64,
    #[serde(rename = "disableDefaultUI")]
    pub disable_default_ui: bool,
    pub draggable: bool,
    pub scrollwheel: bool,
    pub map_type_id: MapType,
}

impl ViewportOptions {
    /// Options with the service's own drag and wheel handling switched off;
    /// the atlas drives panning and zoom itself.
    pub fn controlled(center: GeoCoordinate, zoom: f64, map_type_id: MapType) -> Self {
        Self {
            center,
            zoom,
            disable_default_ui: true,
            draggable: false,
            scrollwheel: false,
            map_type_id,
        }
    }
}

/// In-memory viewport that records every call it receives.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingViewport {
    pub options: ViewportOptions,
    pub center: GeoCoordinate,
    pub zoom: f64,
    pub center_writes: usize,
    pub zoom_writes: usize,
}

impl RecordingViewport {
    pub fn new(options: &ViewportOptions) -> Self {
        Self {
            options: options.clone(),
            center: options.center,
            zoom: options.zoom,
            center_writes: 0,
            zoom_writes: 0,
        }
    }
}

impl MapViewport for RecordingViewport {
    fn set_center(&mut self, center: GeoCoordinate) {
        self.center = center;
        self.center_writes += 1;
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.zoom_writes += 1;
    }
}
