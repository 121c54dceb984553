pub mod fold;
pub mod geo;
pub mod strip;
pub mod vec;

pub use fold::*;
pub use geo::*;
pub use strip::*;
pub use vec::*;
