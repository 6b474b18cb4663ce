//! Rendering seam
//!
//! The simulation never draws anything itself. Each frame it hands the front
//! end a flat list of [`Drawable`]s, each carrying enough to blit one rotated
//! sprite.

use serde::{Deserialize, Serialize};

/// Opaque sprite handle assigned by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(pub u32);

/// One rotated sprite placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    /// Top-left pixel of the unrotated box
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub length: i32,
    pub sprite: SpriteId,
    /// Clockwise rotation about the box center (degrees)
    pub angle: f64,
}

/// A frame presenter (window, terminal, recorder...)
pub trait Renderer {
    type Error;

    /// Draw one complete frame
    fn present(&mut self, frame: &[Drawable]) -> Result<(), Self::Error>;
}

/// Renderer that only logs frame contents
///
/// Used by the headless binary and handy when debugging level layouts.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    type Error = serde_json::Error;

    fn present(&mut self, frame: &[Drawable]) -> Result<(), Self::Error> {
        self.frames += 1;
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("frame {}: {}", self.frames, serde_json::to_string(frame)?);
        }
        Ok(())
    }
}
