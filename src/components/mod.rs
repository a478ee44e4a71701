pub mod canvas2d;
pub mod drawing_surface;

pub use canvas2d::Canvas2d;
pub use drawing_surface::{DrawingSurface, DrawingSurfaceProps};
