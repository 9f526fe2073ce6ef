//! Pixel bitmasks for silhouette-accurate collision tests.

use super::sprites::{Sprite, SpriteSheet};

/// Alpha values above this count as opaque.
pub const ALPHA_THRESHOLD: u8 = 127;

/// A 2D bitmask of opaque pixels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    /// Builds a mask from a predicate over pixel coordinates.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let bits = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    /// Builds a mask from the alpha channel of a sprite.
    pub fn from_sprite(sprite: &Sprite) -> Self {
        Self::from_fn(sprite.width(), sprite.height(), |x, y| {
            sprite.get(x, y).3 > ALPHA_THRESHOLD
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` is set. Coordinates outside the mask are unset.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Finds the first pixel set in both masks, with `other`'s origin placed
    /// at `offset` in this mask's coordinates.
    ///
    /// Returns the shared pixel in this mask's coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(usize, usize)> {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width as i32).min(dx + other.width as i32);
        let y_end = (self.height as i32).min(dy + other.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (sx, sy) = (x as usize, y as usize);
                let (ox, oy) = ((x - dx) as usize, (y - dy) as usize);
                if self.get(sx, sy) && other.get(ox, oy) {
                    return Some((sx, sy));
                }
            }
        }
        None
    }
}

/// Collision masks for every sprite that takes part in collisions.
#[derive(Debug, Clone)]
pub struct Silhouettes {
    /// Bird outline, shared by all wing frames.
    pub bird: Mask,
    /// Upper pipe piece.
    pub pipe_top: Mask,
    /// Lower pipe piece.
    pub pipe_bottom: Mask,
}

impl Silhouettes {
    /// Derives the masks from a sprite sheet.
    pub fn from_sheet(sheet: &SpriteSheet) -> Self {
        Self {
            bird: Mask::from_sprite(&sheet.bird[0]),
            pipe_top: Mask::from_sprite(&sheet.pipe_top),
            pipe_bottom: Mask::from_sprite(&sheet.pipe_bottom),
        }
    }
}
