pub use crate::display::{frame_to_sdl_texture, Display};

mod display;
