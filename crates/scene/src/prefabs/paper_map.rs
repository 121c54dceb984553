use tracing::info;

use crate::World;
use crate::element::Element;
use crate::geometry::Geometry;
use crate::world::FACES_PER_PAIR;

pub const MAP_CLASS: &str = "map";
pub const PAIR_CLASS: &str = "pair";
pub const FACE_CLASS: &str = "face";

/// Size of one face in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceLayout {
    pub width: f64,
    /// Face height as a multiple of its width.
    pub height_ratio: f64,
}

impl FaceLayout {
    pub fn new(width: f64, height_ratio: f64) -> Self {
        Self {
            width,
            height_ratio,
        }
    }

    pub fn height(&self) -> f64 {
        self.width * self.height_ratio
    }
}

/// Build the map -> pairs -> faces tree, style every element, and link
/// children to their parents in order.
///
/// `create_element` is called with the class name of each new element; the
/// first failure aborts assembly.
pub fn spawn_paper_map<E, F, X>(
    layout: &FaceLayout,
    pair_count: usize,
    mut create_element: F,
) -> Result<World<E>, X>
where
    E: Element,
    F: FnMut(&str) -> Result<E, X>,
{
    let map = Geometry::new(create_element(MAP_CLASS)?);
    let mut pairs = Vec::with_capacity(pair_count);
    let mut faces = Vec::with_capacity(pair_count * FACES_PER_PAIR);

    for _ in 0..pair_count {
        let pair = Geometry::new(create_element(PAIR_CLASS)?);
        pair.element().set_style("display", "inline-block");
        pair.element().set_style("transform-style", "preserve-3d");

        for side in 0..FACES_PER_PAIR {
            let face = Geometry::new(create_element(FACE_CLASS)?);
            let el = face.element();
            el.set_style("display", "inline-block");
            el.set_style("width", &format!("{}px", layout.width));
            el.set_style("height", &format!("{}px", layout.height()));
            // Hinge on the edge shared with the other face of the pair.
            el.set_style(
                "transform-origin",
                if side % 2 == 0 { "right" } else { "left" },
            );
            pair.element().append_child(el);
            faces.push(face);
        }

        map.element().append_child(pair.element());
        pairs.push(pair);
    }

    info!(pair_count, face_width = layout.width, "assembled paper map");
    Ok(World::from_parts(map, pairs, faces, layout.width))
}
