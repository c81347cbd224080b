//! Headless engine stand-in
//!
//! Drives a [`GameCallbacks`] implementation frame by frame without a window
//! and records canvas draw calls. Used by the binary's demo run and by tests.

use crate::engine::{Canvas, Color, Engine, GameCallbacks, InputCommand};

/// A recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite {
        index: u32,
        x: i32,
        y: i32,
        color: Color,
    },
    Rect {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
    },
}

/// Canvas that keeps the draw calls issued since the last clear
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    resets: u32,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `resize` calls (one per level start)
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.resets += 1;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn sprite(&mut self, index: u32, x: i32, y: i32, color: Color) {
        self.commands.push(DrawCommand::Sprite { index, x, y, color });
    }

    fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}

/// Fixed-step frame driver
#[derive(Debug)]
pub struct HeadlessEngine {
    running: bool,
    /// Seconds since start
    time: f32,
    frame: u64,
    presented: u64,
    /// Debug overlay lines from the last frame
    debug_lines: Vec<String>,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            running: true,
            time: 0.0,
            frame: 0,
            presented: 0,
            debug_lines: Vec::new(),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn debug_lines(&self) -> &[String] {
        &self.debug_lines
    }

    /// Run one frame: inputs, update, render, debug render
    pub fn step<G: GameCallbacks>(&mut self, game: &mut G, inputs: &[InputCommand], dt: f32) {
        self.debug_lines.clear();
        for input in inputs {
            game.on_input(self, input);
        }
        self.time += dt;
        let t = self.time;
        game.update(self, t, dt);
        game.render(self);
        game.render_imgui(self);
        self.frame += 1;
    }

    /// Run until the game terminates or `max_frames` have passed
    ///
    /// `script` supplies the input events for each frame. Hitting the frame
    /// limit asks the game to shut down, as closing the window would.
    pub fn run<G, F>(&mut self, game: &mut G, dt: f32, max_frames: u64, mut script: F) -> u64
    where
        G: GameCallbacks,
        F: FnMut(u64) -> Vec<InputCommand>,
    {
        while self.running && self.frame < max_frames {
            let inputs = script(self.frame);
            self.step(game, &inputs, dt);
        }
        if self.running {
            log::info!("Frame limit reached after {} frames", self.frame);
            game.on_shutdown(self);
        }
        self.frame
    }
}

impl Engine for HeadlessEngine {
    fn terminate(&mut self) {
        if self.running {
            log::info!("Engine terminating at frame {}", self.frame);
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn render_canvas(&mut self, canvas: &dyn Canvas) {
        let (w, h) = canvas.size();
        log::trace!("Presenting {}x{} canvas", w, h);
        self.presented += 1;
    }

    fn debug_text(&mut self, line: &str) {
        self.debug_lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::color;

    /// Counts callbacks and quits on demand
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        quit_at: Option<u64>,
        updates: u64,
        last_t: f32,
    }

    impl GameCallbacks for Recorder {
        fn on_input(&mut self, _engine: &mut dyn Engine, _input: &InputCommand) {
            self.calls.push("input");
        }

        fn update(&mut self, engine: &mut dyn Engine, t: f32, _dt: f32) {
            self.calls.push("update");
            self.updates += 1;
            self.last_t = t;
            if Some(self.updates) == self.quit_at {
                engine.terminate();
            }
        }

        fn render(&mut self, _engine: &mut dyn Engine) {
            self.calls.push("render");
        }

        fn render_imgui(&mut self, _engine: &mut dyn Engine) {
            self.calls.push("imgui");
        }

        fn on_shutdown(&mut self, engine: &mut dyn Engine) {
            self.calls.push("shutdown");
            engine.terminate();
        }
    }

    #[test]
    fn test_frame_order() {
        let mut engine = HeadlessEngine::new();
        let mut recorder = Recorder::default();
        engine.step(&mut recorder, &[InputCommand::key_pressed(27)], 0.5);
        assert_eq!(recorder.calls, vec!["input", "update", "render", "imgui"]);
        assert_eq!(recorder.last_t, 0.5);
        assert_eq!(engine.frame(), 1);
    }

    #[test]
    fn test_run_stops_on_terminate() {
        let mut engine = HeadlessEngine::new();
        let mut recorder = Recorder {
            quit_at: Some(3),
            ..Default::default()
        };
        let frames = engine.run(&mut recorder, 0.1, 100, |_| Vec::new());
        assert_eq!(frames, 3);
        assert!(!engine.is_running());
        assert!(!recorder.calls.contains(&"shutdown"));
    }

    #[test]
    fn test_run_frame_limit_requests_shutdown() {
        let mut engine = HeadlessEngine::new();
        let mut recorder = Recorder::default();
        let frames = engine.run(&mut recorder, 0.1, 5, |_| Vec::new());
        assert_eq!(frames, 5);
        assert_eq!(recorder.calls.last(), Some(&"shutdown"));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_recording_canvas_clear_resets() {
        let mut canvas = RecordingCanvas::new(8, 8);
        canvas.sprite(1, 0, 0, color::WHITE);
        canvas.clear(color::BLACK);
        canvas.text("hi", 1, 1, color::WHITE);
        assert_eq!(canvas.commands().len(), 2);
        assert_eq!(canvas.commands()[0], DrawCommand::Clear(color::BLACK));

        canvas.resize(16, 4);
        assert!(canvas.commands().is_empty());
        assert_eq!(canvas.size(), (16, 4));
        assert_eq!(canvas.resets(), 1);
    }
}
