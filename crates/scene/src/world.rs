use serde::Serialize;
use tracing::debug;

use crate::components::{Axis, AxisUpdate, Channel, Transform};
use crate::element::Element;
use crate::geometry::Geometry;
use foundation::math::{face_fold_angle, folding_gap, pair_translation};

/// Faces per folding pair.
pub const FACES_PER_PAIR: usize = 2;

/// Geometry tree of a folding map: one root, its pairs, and two faces per pair.
///
/// Faces are stored flat in pair order; face `i` belongs to pair `i / 2`.
#[derive(Debug)]
pub struct World<E> {
    map: Geometry<E>,
    pairs: Vec<Geometry<E>>,
    faces: Vec<Geometry<E>>,
    face_width: f64,
}

/// Transform state of every geometry in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub map: Transform,
    pub pairs: Vec<Transform>,
    pub faces: Vec<Transform>,
}

impl<E: Element> World<E> {
    /// Assemble a tree from already-linked geometries.
    pub fn from_parts(
        map: Geometry<E>,
        pairs: Vec<Geometry<E>>,
        faces: Vec<Geometry<E>>,
        face_width: f64,
    ) -> Self {
        debug_assert_eq!(faces.len(), pairs.len() * FACES_PER_PAIR);
        Self {
            map,
            pairs,
            faces,
            face_width,
        }
    }

    pub fn map(&self) -> &Geometry<E> {
        &self.map
    }

    pub fn pairs(&self) -> &[Geometry<E>] {
        &self.pairs
    }

    pub fn faces(&self) -> &[Geometry<E>] {
        &self.faces
    }

    pub fn face_width(&self) -> f64 {
        self.face_width
    }

    pub fn face_elements(&self) -> Vec<&E> {
        self.faces.iter().map(Geometry::element).collect()
    }

    /// Rotate the root geometry. Provided angles are stored modulo 360 (sign
    /// follows the input); absent axes keep their current value.
    pub fn rotate(&mut self, angles: AxisUpdate) {
        for axis in Axis::ALL {
            if let Some(angle) = angles.get(axis) {
                self.map.set(Channel::Rotate, axis, angle % 360.0);
            }
        }
    }

    /// Fold faces into an accordion at `angle_deg` and pull the pairs together
    /// so their edges stay adjacent.
    pub fn fold(&mut self, angle_deg: f64) {
        let gap = folding_gap(self.face_width, angle_deg);

        for (index, face) in self.faces.iter_mut().enumerate() {
            face.set_rotate(Axis::Y, face_fold_angle(angle_deg, index));
        }

        let pair_count = self.pairs.len();
        for (index, pair) in self.pairs.iter_mut().enumerate() {
            pair.set_translate(Axis::X, pair_translation(gap, pair_count, index));
        }

        debug!(angle_deg, gap, pair_count, "folded");
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            map: *self.map.transform(),
            pairs: self.pairs.iter().map(|g| *g.transform()).collect(),
            faces: self.faces.iter().map(|g| *g.transform()).collect(),
        }
    }
}
