pub mod math;

// Foundation crate: pure coordinate and folding math only.
pub use math::*;
