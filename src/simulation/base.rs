//! The scrolling ground.

use serde::{Deserialize, Serialize};

use super::sprites::BASE_WIDTH;

/// Two ground strips laid end to end that leapfrog each other while scrolling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base {
    /// Top of the ground.
    pub y: f32,
    /// Left edge of the first strip.
    pub x1: f32,
    /// Left edge of the second strip.
    pub x2: f32,
}

impl Base {
    /// Creates the ground with its first strip at the left border.
    pub fn new(y: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: BASE_WIDTH as f32,
        }
    }

    /// Scrolls both strips and moves a strip that left the screen behind the other.
    pub fn advance(&mut self, speed: f32) {
        let width = BASE_WIDTH as f32;
        self.x1 -= speed;
        self.x2 -= speed;

        if self.x1 + width < 0.0 {
            self.x1 = self.x2 + width;
        }
        if self.x2 + width < 0.0 {
            self.x2 = self.x1 + width;
        }
    }
}
