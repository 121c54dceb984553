pub mod axis;
pub mod transform;

pub use axis::*;
pub use transform::*;
