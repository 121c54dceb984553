pub mod atlas;
pub mod error;
pub mod input;
pub mod options;
pub mod viewport;
pub mod virtual_map;

pub use atlas::*;
pub use error::*;
pub use input::*;
pub use options::*;
pub use viewport::*;
pub use virtual_map::*;
