pub mod painter;

pub use painter::{FrameView, Painter};
