//! Host engine interface
//!
//! The engine owns the window, the run loop and presentation. It drives the
//! game through [`GameCallbacks`] once per frame, in this order:
//! input events, `update`, `render`, `render_imgui`.

use crate::config::CanvasConfig;

/// An RGB palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub mod color {
    use super::Color;

    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);

    /// PICO-8 palette
    pub mod pico8 {
        use super::Color;

        pub const BLACK: Color = Color(0x00, 0x00, 0x00);
        pub const DARK_BLUE: Color = Color(0x1D, 0x2B, 0x53);
        pub const DARK_PURPLE: Color = Color(0x7E, 0x25, 0x53);
        pub const DARK_GREEN: Color = Color(0x00, 0x87, 0x51);
        pub const BROWN: Color = Color(0xAB, 0x52, 0x36);
        pub const DARK_GRAY: Color = Color(0x5F, 0x57, 0x4F);
        pub const LIGHT_GRAY: Color = Color(0xC2, 0xC3, 0xC7);
        pub const WHITE: Color = Color(0xFF, 0xF1, 0xE8);
        pub const RED: Color = Color(0xFF, 0x00, 0x4D);
        pub const ORANGE: Color = Color(0xFF, 0xA3, 0x00);
        pub const YELLOW: Color = Color(0xFF, 0xEC, 0x27);
        pub const GREEN: Color = Color(0x00, 0xE4, 0x36);
        pub const BLUE: Color = Color(0x29, 0xAD, 0xFF);
        pub const INDIGO: Color = Color(0x83, 0x76, 0x9C);
        pub const PINK: Color = Color(0xFF, 0x77, 0xA8);
        pub const PEACH: Color = Color(0xFF, 0xCC, 0xAA);
    }
}

/// Press state of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Pressed,
    Released,
    /// OS key repeat while held
    Repeat,
}

/// A device event forwarded by the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    Key { keycode: i32, trigger: TriggerState },
    MouseButton { button: u8, trigger: TriggerState },
    MouseMotion { x: f32, y: f32 },
}

impl InputCommand {
    pub fn key_pressed(keycode: i32) -> Self {
        InputCommand::Key {
            keycode,
            trigger: TriggerState::Pressed,
        }
    }

    pub fn key_released(keycode: i32) -> Self {
        InputCommand::Key {
            keycode,
            trigger: TriggerState::Released,
        }
    }
}

/// Sprite canvas the engine rasterises and presents
pub trait Canvas {
    /// (Re)initialise to the given size, dropping any pending drawing
    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Color);
    fn sprite(&mut self, index: u32, x: i32, y: i32, color: Color);
    /// Rectangle outline, corners inclusive
    fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);
    fn text(&mut self, text: &str, x: i32, y: i32, color: Color);
}

/// Services the engine offers back to the game
pub trait Engine {
    /// Ask the run loop to stop after the current frame
    fn terminate(&mut self);

    /// Whether the run loop is still going
    fn is_running(&self) -> bool;

    /// Prepare a canvas for a new level
    fn init_canvas(&mut self, canvas: &mut dyn Canvas, config: &CanvasConfig) {
        canvas.resize(config.width, config.height);
    }

    /// Present a finished canvas
    fn render_canvas(&mut self, canvas: &dyn Canvas);

    /// Debug overlay line; ignored by engines without an overlay
    fn debug_text(&mut self, _line: &str) {}
}

/// The game as seen from the engine's frame loop
pub trait GameCallbacks {
    fn on_input(&mut self, engine: &mut dyn Engine, input: &InputCommand);
    fn update(&mut self, engine: &mut dyn Engine, t: f32, dt: f32);
    fn render(&mut self, engine: &mut dyn Engine);
    fn render_imgui(&mut self, _engine: &mut dyn Engine) {}
    /// The engine was asked to close (window close, signal)
    fn on_shutdown(&mut self, engine: &mut dyn Engine);
}
