use serde::Serialize;
use tracing::debug;

use crate::options::MapType;
use crate::viewport::{MapViewport, ViewportOptions};
use foundation::math::{GeoCoordinate, Vec2, face_centers, ground_resolution, translate_gps_coord};

/// Lowest zoom level pushed to the viewports.
pub const MIN_MAP_ZOOM: f64 = 3.0;

/// One logical map spread over a strip of viewports, one per face.
///
/// Holds the shared center and zoom; every change is fanned out so each
/// viewport shows its own slice of the strip.
#[derive(Debug)]
pub struct VirtualMap<V> {
    viewports: Vec<V>,
    center: GeoCoordinate,
    zoom: f64,
    face_widths: Vec<f64>,
}

/// Center/zoom state of a virtual map and the center of each face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualMapSnapshot {
    pub center: GeoCoordinate,
    pub zoom: f64,
    pub resolution: f64,
    pub face_centers: Vec<GeoCoordinate>,
}

impl<V: MapViewport> VirtualMap<V> {
    /// Create one viewport per face, index-aligned with `faces`.
    ///
    /// `create_viewport` receives the face element and the options for that
    /// face, already centered on its slice of the strip.
    pub fn create<E, F, X>(
        faces: &[&E],
        face_width: f64,
        center: GeoCoordinate,
        zoom: f64,
        map_type: MapType,
        mut create_viewport: F,
    ) -> Result<Self, X>
    where
        F: FnMut(&E, &ViewportOptions) -> Result<V, X>,
    {
        let mut map = Self {
            viewports: Vec::with_capacity(faces.len()),
            center,
            zoom,
            face_widths: vec![face_width; faces.len()],
        };

        let centers = map.centers();
        for (face, face_center) in faces.iter().zip(centers) {
            let options = ViewportOptions::controlled(face_center, zoom, map_type);
            map.viewports.push(create_viewport(*face, &options)?);
        }

        debug!(viewports = map.viewports.len(), zoom, "created viewports");
        Ok(map)
    }

    pub fn center(&self) -> GeoCoordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn viewports(&self) -> &[V] {
        &self.viewports
    }

    /// Meters per pixel at the current center latitude and zoom.
    pub fn resolution(&self) -> f64 {
        ground_resolution(self.center.lat, self.zoom)
    }

    pub fn centers(&self) -> Vec<GeoCoordinate> {
        face_centers(self.center, self.resolution(), &self.face_widths)
    }

    pub fn set_center(&mut self, center: GeoCoordinate) {
        self.center = center;
        let centers = self.centers();
        for (viewport, face_center) in self.viewports.iter_mut().zip(centers) {
            viewport.set_center(face_center);
        }
    }

    /// Apply a zoom level, floored at [`MIN_MAP_ZOOM`], then re-center every
    /// viewport since face offsets depend on resolution.
    pub fn set_zoom(&mut self, level: f64) {
        let level = level.max(MIN_MAP_ZOOM);
        self.zoom = level;
        for viewport in &mut self.viewports {
            viewport.set_zoom(level);
        }
        self.set_center(self.center);
    }

    /// Shift the center by a pixel displacement (`x` east, `y` north).
    pub fn move_by(&mut self, delta: Vec2) {
        let center = translate_gps_coord(delta.x, delta.y, self.resolution(), self.center);
        self.set_center(center);
    }

    pub fn snapshot(&self) -> VirtualMapSnapshot {
        VirtualMapSnapshot {
            center: self.center,
            zoom: self.zoom,
            resolution: self.resolution(),
            face_centers: self.centers(),
        }
    }
}
