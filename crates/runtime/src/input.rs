//! Keyboard, pointer and wheel handling for the folding map.
//!
//! Raw events are reduced to [`Gesture`]s:
//! - plain drag pans the map
//! - Shift + drag rotates the whole map
//! - Meta + drag changes the fold angle

use foundation::math::Vec2;

/// `keyCode` of the Shift key.
pub const KEY_SHIFT: u32 = 16;

/// `keyCode` of the left Meta (Command / Windows) key.
pub const KEY_META: u32 = 91;

/// Lowest zoom level a wheel step may request.
pub const MIN_WHEEL_ZOOM: f64 = 4.0;

/// Zoom levels per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.0;

/// Map rotation per dragged pixel with Shift held (degrees).
pub const ROTATE_DEG_PER_PX: f64 = 0.5;

/// Fold angle change per dragged pixel with Meta held (degrees).
pub const FOLD_DEG_PER_PX: f64 = 0.5;

/// What a pointer move while dragging asks for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Gesture {
    /// Map displacement in pixels: `x` east, `y` north.
    Pan(Vec2),
    /// Raw pointer displacement in screen pixels.
    Rotate(Vec2),
    /// Raw horizontal pointer displacement in screen pixels.
    Fold(f64),
}

/// Modifier keys and drag state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    shift: bool,
    meta: bool,
    dragging: bool,
    last_pos_px: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn shift(&self) -> bool {
        self.shift
    }

    pub fn meta(&self) -> bool {
        self.meta
    }

    pub fn on_key_down(&mut self, key_code: u32) {
        self.set_modifier(key_code, true);
    }

    pub fn on_key_up(&mut self, key_code: u32) {
        self.set_modifier(key_code, false);
    }

    /// Pointer pressed on the map element.
    pub fn on_pointer_down(&mut self, pos_px: Vec2) {
        self.dragging = true;
        self.last_pos_px = pos_px;
    }

    /// Pointer moved anywhere in the document.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn on_pointer_move(&mut self, pos_px: Vec2) -> Option<Gesture> {
        if !self.dragging {
            return None;
        }

        let delta = pos_px - self.last_pos_px;
        self.last_pos_px = pos_px;

        let gesture = if self.shift {
            Gesture::Rotate(delta)
        } else if self.meta {
            Gesture::Fold(delta.x)
        } else {
            // Dragging right reveals what lies west; screen y grows southwards.
            Gesture::Pan(Vec2::new(-delta.x, delta.y))
        };
        Some(gesture)
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    fn set_modifier(&mut self, key_code: u32, pressed: bool) {
        match key_code {
            KEY_SHIFT => self.shift = pressed,
            KEY_META => self.meta = pressed,
            _ => {}
        }
    }
}

/// Zoom level requested by one wheel notch.
///
/// - `delta_y`: wheel delta (positive = zoom out, otherwise zoom in).
pub fn wheel_zoom(current: f64, delta_y: f64) -> f64 {
    let step = if delta_y > 0.0 {
        -WHEEL_ZOOM_STEP
    } else {
        WHEEL_ZOOM_STEP
    };
    (current + step).max(MIN_WHEEL_ZOOM)
}
