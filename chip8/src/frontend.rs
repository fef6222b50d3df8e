use log::error;
use sdl2::event::Event;
use sdl2::EventPump;

use chipvm::{Control, FrameBuffer, Frontend, Keypad};
use display::Display;

use crate::keymap::keymap;

/// SDL2 window and keyboard
pub struct SdlFrontend {
    display: Display,
    events: EventPump,
}

impl SdlFrontend {
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        Ok(SdlFrontend {
            display: Display::new(sdl, scale)?,
            events: sdl.event_pump()?,
        })
    }
}

impl Frontend for SdlFrontend {
    fn render(&mut self, frame: &FrameBuffer) {
        if let Err(e) = self.display.render(frame) {
            error!("unable to render frame: {}", e);
        }
    }

    fn poll_input(&mut self, keypad: &mut Keypad) -> Control {
        let mut control = Control::Continue;
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. } => control = Control::Quit,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(digit) = keymap(key) {
                        keypad.press(digit);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(digit) = keymap(key) {
                        keypad.release(digit);
                    }
                }
                _ => continue,
            };
        }
        control
    }
}
