use serde::Serialize;
use tracing::{debug, info};

use crate::error::AtlasError;
use crate::input::{FOLD_DEG_PER_PX, Gesture, InputState, ROTATE_DEG_PER_PX, wheel_zoom};
use crate::options::AtlasOptions;
use crate::viewport::{MapViewport, ViewportOptions};
use crate::virtual_map::{VirtualMap, VirtualMapSnapshot};
use foundation::math::Vec2;
use scene::components::AxisUpdate;
use scene::prefabs::spawn_paper_map;
use scene::{Element, World, WorldSnapshot};

/// Largest fold angle reachable by dragging (degrees).
pub const MAX_FOLD_ANGLE: f64 = 90.0;

/// Composition root: owns the geometry tree, the viewports and the input
/// state, and routes events between them.
#[derive(Debug)]
pub struct Atlas<E, V> {
    options: AtlasOptions,
    container: E,
    world: World<E>,
    map: Option<VirtualMap<V>>,
    input: InputState,
    fold_angle: f64,
}

/// Serializable view of an atlas for debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasSnapshot {
    pub options: AtlasOptions,
    pub fold_angle: f64,
    pub geometry: WorldSnapshot,
    pub map: Option<VirtualMapSnapshot>,
}

impl<E: Element, V: MapViewport> Atlas<E, V> {
    /// Validate `options` and assemble the geometry tree. Nothing is attached
    /// to `container` until [`Atlas::insert`].
    pub fn new<F>(container: E, options: AtlasOptions, create_element: F) -> Result<Self, AtlasError>
    where
        F: FnMut(&str) -> Result<E, AtlasError>,
    {
        options.validate()?;
        let world = spawn_paper_map(&options.face_layout(), options.panels, create_element)?;

        Ok(Self {
            options,
            container,
            world,
            map: None,
            input: InputState::new(),
            fold_angle: 0.0,
        })
    }

    pub fn options(&self) -> &AtlasOptions {
        &self.options
    }

    pub fn container(&self) -> &E {
        &self.container
    }

    pub fn world(&self) -> &World<E> {
        &self.world
    }

    pub fn virtual_map(&self) -> Option<&VirtualMap<V>> {
        self.map.as_ref()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Last applied fold angle (degrees).
    pub fn fold_angle(&self) -> f64 {
        self.fold_angle
    }

    pub fn is_inserted(&self) -> bool {
        self.map.is_some()
    }

    /// Create one viewport per face and attach the map element to the
    /// container.
    pub fn insert<F>(&mut self, create_viewport: F) -> Result<(), AtlasError>
    where
        F: FnMut(&E, &ViewportOptions) -> Result<V, AtlasError>,
    {
        if self.map.is_some() {
            return Err(AtlasError::AlreadyInserted);
        }

        let faces = self.world.face_elements();
        let map = VirtualMap::create(
            &faces,
            self.world.face_width(),
            self.options.center,
            self.options.zoom,
            self.options.map_type,
            create_viewport,
        )?;
        self.map = Some(map);
        self.container.append_child(self.world.map().element());

        info!(
            faces = self.options.face_count(),
            lat = self.options.center.lat,
            lng = self.options.center.lng,
            "atlas inserted"
        );
        Ok(())
    }

    /// Rotate the whole map; see [`World::rotate`].
    pub fn rotate(&mut self, angles: AxisUpdate) {
        self.world.rotate(angles);
    }

    pub fn fold(&mut self, angle_deg: f64) {
        self.world.fold(angle_deg);
        self.fold_angle = angle_deg;
    }

    pub fn on_key_down(&mut self, key_code: u32) {
        self.input.on_key_down(key_code);
    }

    pub fn on_key_up(&mut self, key_code: u32) {
        self.input.on_key_up(key_code);
    }

    pub fn on_pointer_down(&mut self, pos_px: Vec2) {
        self.input.on_pointer_down(pos_px);
    }

    pub fn on_pointer_move(&mut self, pos_px: Vec2) {
        let Some(gesture) = self.input.on_pointer_move(pos_px) else {
            return;
        };

        match gesture {
            Gesture::Pan(delta) => {
                if let Some(map) = &mut self.map {
                    map.move_by(delta);
                }
            }
            Gesture::Rotate(delta) => {
                let current = *self.world.map().rotation();
                self.rotate(AxisUpdate {
                    x: Some(current.x - delta.y * ROTATE_DEG_PER_PX),
                    y: Some(current.y + delta.x * ROTATE_DEG_PER_PX),
                    z: None,
                });
            }
            Gesture::Fold(dx) => {
                let angle = (self.fold_angle + dx * FOLD_DEG_PER_PX).clamp(0.0, MAX_FOLD_ANGLE);
                self.fold(angle);
            }
        }
        debug!(?gesture, "pointer gesture");
    }

    pub fn on_pointer_up(&mut self) {
        self.input.on_pointer_up();
    }

    /// One wheel notch over a face. Ignored until inserted.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let Some(map) = &mut self.map else {
            return;
        };
        let level = wheel_zoom(map.zoom(), delta_y);
        map.set_zoom(level);
        debug!(delta_y, zoom = map.zoom(), "wheel zoom");
    }

    pub fn snapshot(&self) -> AtlasSnapshot {
        AtlasSnapshot {
            options: self.options.clone(),
            fold_angle: self.fold_angle,
            geometry: self.world.snapshot(),
            map: self.map.as_ref().map(VirtualMap::snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Atlas, MAX_FOLD_ANGLE};
    use crate::error::AtlasError;
    use crate::input::{KEY_META, KEY_SHIFT};
    use crate::options::AtlasOptions;
    use crate::viewport::{RecordingViewport, ViewportOptions};
    use foundation::math::{GeoCoordinate, Vec2, folding_gap};
    use scene::components::{Axis3, AxisUpdate};
    use scene::{RecordingElement, TRANSFORM_PROPERTY};

    type TestAtlas = Atlas<RecordingElement, RecordingViewport>;

    fn element(class: &str) -> Result<RecordingElement, AtlasError> {
        Ok(RecordingElement::new(class))
    }

    fn viewport(_: &RecordingElement, options: &ViewportOptions) -> Result<RecordingViewport, AtlasError> {
        Ok(RecordingViewport::new(options))
    }

    fn atlas() -> TestAtlas {
        Atlas::new(RecordingElement::new("root"), AtlasOptions::default(), element)
            .expect("default options are valid")
    }

    fn inserted() -> TestAtlas {
        let mut atlas = atlas();
        atlas.insert(viewport).expect("first insert");
        atlas
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn rejects_invalid_options() {
        let options = AtlasOptions {
            panels: 0,
            ..AtlasOptions::default()
        };
        let result: Result<TestAtlas, _> = Atlas::new(RecordingElement::new("root"), options, element);
        assert!(matches!(result, Err(AtlasError::InvalidOptions(_))));
    }

    #[test]
    fn viewport_failure_leaves_atlas_detached() {
        let mut atlas = atlas();
        let err = atlas
            .insert(|_, _| Err(AtlasError::Viewport("google is not defined".to_string())))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to create map viewport: google is not defined"
        );
        assert!(!atlas.is_inserted());
        assert!(atlas.container().children().is_empty());
    }

    #[test]
    fn insert_attaches_map_and_creates_viewports() {
        let atlas = inserted();
        let children = atlas.container().children();
        assert_eq!(children.len(), 1);
        assert!(children[0].same_node(atlas.world().map().element()));

        let map = atlas.virtual_map().expect("inserted");
        assert_eq!(map.viewports().len(), 6);
        assert_eq!(map.center(), AtlasOptions::default().center);
        assert_eq!(map.zoom(), 10.0);
    }

    #[test]
    fn second_insert_fails() {
        let mut atlas = inserted();
        let err = atlas.insert(viewport).unwrap_err();
        assert!(matches!(err, AtlasError::AlreadyInserted));
        assert_eq!(atlas.container().children().len(), 1);
    }

    #[test]
    fn rotate_and_fold_reach_the_elements() {
        let mut atlas = atlas();
        atlas.fold(20.0);
        atlas.rotate(AxisUpdate {
            x: Some(380.0),
            ..AxisUpdate::default()
        });

        assert_eq!(*atlas.world().map().rotation(), Axis3::new(20.0, 0.0, 0.0));
        assert_eq!(atlas.fold_angle(), 20.0);
        let first_face = atlas.world().faces()[0].element();
        assert!(
            first_face
                .style(TRANSFORM_PROPERTY)
                .unwrap_or_default()
                .starts_with("rotateX(0deg) rotateY(-20deg) ")
        );
    }

    #[test]
    fn plain_drag_moves_every_viewport() {
        let mut atlas = inserted();
        let before = atlas.virtual_map().map(|m| m.center()).expect("inserted");

        atlas.on_pointer_down(Vec2::new(200.0, 200.0));
        atlas.on_pointer_move(Vec2::new(150.0, 230.0));
        atlas.on_pointer_up();
        atlas.on_pointer_move(Vec2::new(0.0, 0.0));

        let map = atlas.virtual_map().expect("inserted");
        assert!(map.center().lng > before.lng);
        assert!(map.center().lat > before.lat);
        assert!(map.viewports().iter().all(|v| v.center_writes == 1));
    }

    #[test]
    fn shift_drag_rotates_instead_of_panning() {
        let mut atlas = inserted();
        atlas.on_key_down(KEY_SHIFT);
        atlas.on_pointer_down(Vec2::new(0.0, 0.0));
        atlas.on_pointer_move(Vec2::new(20.0, -10.0));

        assert_eq!(*atlas.world().map().rotation(), Axis3::new(5.0, 10.0, 0.0));
        let map = atlas.virtual_map().expect("inserted");
        assert_eq!(map.center(), AtlasOptions::default().center);
    }

    #[test]
    fn meta_drag_refolds_within_bounds() {
        let mut atlas = inserted();
        atlas.on_key_down(KEY_META);
        atlas.on_pointer_down(Vec2::new(0.0, 0.0));
        atlas.on_pointer_move(Vec2::new(40.0, 0.0));
        assert_eq!(atlas.fold_angle(), 20.0);
        assert_close(
            atlas.world().pairs()[0].translation().x,
            folding_gap(100.0, 20.0),
            1e-12,
        );

        atlas.on_pointer_move(Vec2::new(1000.0, 0.0));
        assert_eq!(atlas.fold_angle(), MAX_FOLD_ANGLE);
        atlas.on_pointer_move(Vec2::new(-1000.0, 0.0));
        assert_eq!(atlas.fold_angle(), 0.0);
    }

    #[test]
    fn wheel_zoom_respects_both_floors() {
        let mut atlas = inserted();
        atlas.on_wheel(-1.0);
        assert_eq!(atlas.virtual_map().map(|m| m.zoom()), Some(11.0));

        for _ in 0..20 {
            atlas.on_wheel(1.0);
        }
        assert_eq!(atlas.virtual_map().map(|m| m.zoom()), Some(4.0));
        assert!(
            atlas
                .virtual_map()
                .expect("inserted")
                .viewports()
                .iter()
                .all(|v| v.zoom == 4.0)
        );
    }

    #[test]
    fn map_input_before_insert_is_ignored() {
        let mut atlas = atlas();
        atlas.on_wheel(1.0);
        atlas.on_pointer_down(Vec2::new(0.0, 0.0));
        atlas.on_pointer_move(Vec2::new(10.0, 10.0));
        assert!(atlas.virtual_map().is_none());
        assert!(atlas.snapshot().map.is_none());
    }

    #[test]
    fn snapshot_serializes_geometry_and_map() {
        let mut atlas = inserted();
        atlas.fold(30.0);
        let json = serde_json::to_value(atlas.snapshot()).expect("serializable");
        assert_eq!(json["fold_angle"], 30.0);
        assert_eq!(json["geometry"]["faces"][1]["rotate"]["y"], 30.0);
        assert_eq!(json["map"]["zoom"], 10.0);
        assert_eq!(
            json["map"]["face_centers"].as_array().map(Vec::len),
            Some(6)
        );
        let center: GeoCoordinate =
            serde_json::from_value(json["map"]["center"].clone()).expect("coordinate");
        assert_eq!(center, AtlasOptions::default().center);
    }
}
