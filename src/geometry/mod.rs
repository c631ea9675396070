mod mesh;
mod triangle;

pub use mesh::{Face, Mesh};
pub use triangle::Triangle;
