use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use chipvm::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm::FrameBuffer;

/// Intensity of a lit pixel
const ON: u8 = 0xFF;

/// # Display
/// The display is composed of 64x32 black/white pixels.
/// Each row of the frame buffer is a 64-bit mask whose most significant bit is the leftmost pixel.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chipvm",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a snapshot of the frame buffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (y, row) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[y * pitch..y * pitch + row.len()].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

/// Formats a FrameBuffer for rendering as an SDL2 texture.
///
/// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
///
/// This creates a black and white rendering by:
/// - Expanding each row mask into 64 pixels, most significant bit first
/// - Triplicating each pixel to represent its RGB values
/// - Using 0 for unlit pixels and 255 for lit ones
pub fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .iter()
        .flat_map(|&row| (0..DISPLAY_WIDTH).rev().map(move |bit| (row >> bit) & 1))
        .flat_map(|pixel| std::iter::repeat(pixel as u8 * ON).take(3))
        .collect()
}
