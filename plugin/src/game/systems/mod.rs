mod input;
mod render;
mod types;

pub use input::*;
pub use render::*;
pub use types::*;
