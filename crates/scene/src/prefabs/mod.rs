pub mod paper_map;

pub use paper_map::*;
