pub mod components;
pub mod element;
pub mod geometry;
pub mod prefabs;
pub mod world;

pub use element::*;
pub use geometry::*;
pub use world::*;
