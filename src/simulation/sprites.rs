//! Procedural RGBA sprites for the bird, pipes and ground.
//!
//! The sprite sheet is built once and handed to whoever needs it: the
//! simulation derives collision silhouettes from the alpha channel, the
//! renderer uploads the same pixels as textures.

/// Width of the bird sprite in pixels.
pub const BIRD_WIDTH: usize = 68;
/// Height of the bird sprite in pixels.
pub const BIRD_HEIGHT: usize = 48;
/// Width of a pipe piece in pixels.
pub const PIPE_WIDTH: usize = 104;
/// Height of a pipe piece in pixels.
pub const PIPE_HEIGHT: usize = 640;
/// Height of the wider cap at the open end of a pipe.
pub const PIPE_CAP_HEIGHT: usize = 48;
/// Horizontal inset of the pipe body relative to its cap.
pub const PIPE_BODY_INSET: usize = 4;
/// Width of one ground strip in pixels.
pub const BASE_WIDTH: usize = 672;
/// Height of one ground strip in pixels.
pub const BASE_HEIGHT: usize = 224;
/// Number of wing animation frames.
pub const BIRD_FRAMES: usize = 3;

/// An RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    /// Fully transparent black.
    pub const CLEAR: Rgba = Rgba(0, 0, 0, 0);

    const fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba(r, g, b, 255)
    }

    fn lerp(a: Rgba, b: Rgba, t_256: u16) -> Rgba {
        let t = i32::from(t_256);
        let mix = |x: u8, y: u8| (i32::from(x) + (i32::from(y) - i32::from(x)) * t / 256) as u8;
        Rgba(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2), mix(a.3, b.3))
    }
}

const PIPE_L: Rgba = Rgba::opaque(74, 122, 26);
const PIPE_M: Rgba = Rgba::opaque(100, 170, 40);
const PIPE_R: Rgba = Rgba::opaque(115, 191, 46);
const PIPE_HI: Rgba = Rgba::opaque(145, 215, 62);
const CAP_DARK: Rgba = Rgba::opaque(60, 100, 20);
const BIRD_Y: Rgba = Rgba::opaque(245, 200, 66);
const BIRD_HI: Rgba = Rgba::opaque(255, 225, 100);
const BIRD_WING: Rgba = Rgba::opaque(215, 165, 35);
const BIRD_EYE: Rgba = Rgba::opaque(255, 255, 255);
const BIRD_PUPIL: Rgba = Rgba::opaque(20, 20, 20);
const BIRD_BEAK: Rgba = Rgba::opaque(225, 75, 35);
const GRASS: Rgba = Rgba::opaque(84, 168, 55);
const GRASS_LIGHT: Rgba = Rgba::opaque(110, 200, 70);
const DIRT: Rgba = Rgba::opaque(210, 185, 110);
const DIRT_DARK: Rgba = Rgba::opaque(185, 160, 90);

/// A rectangular RGBA image stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Sprite {
    /// Creates a fully transparent sprite.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::CLEAR; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)`, or transparent outside the sprite.
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Rgba::CLEAR
        }
    }

    /// Sets the pixel at `(x, y)`. Writes outside the sprite are ignored.
    pub fn set(&mut self, x: usize, y: usize, c: Rgba) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = c;
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, c: Rgba) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Returns a copy mirrored top to bottom.
    pub fn flipped_vertically(&self) -> Self {
        let mut flipped = Sprite::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                flipped.set(x, self.height - 1 - y, self.get(x, y));
            }
        }
        flipped
    }

    /// Flattens the pixels into `[r, g, b, a, r, g, b, a, ...]` bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.0, p.1, p.2, p.3])
            .collect()
    }
}

/// Whether pixel `(x, y)` lies inside the bird's elliptical body.
fn in_bird_body(x: usize, y: usize) -> bool {
    let rx = BIRD_WIDTH as f32 / 2.0;
    let ry = BIRD_HEIGHT as f32 / 2.0;
    let nx = (x as f32 + 0.5 - rx) / rx;
    let ny = (y as f32 + 0.5 - ry) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Draws one wing frame of the bird.
///
/// Frames differ only in where the wing sits inside the body, so every frame
/// shares the same silhouette.
pub fn bird(frame: usize) -> Sprite {
    let mut sprite = Sprite::new(BIRD_WIDTH, BIRD_HEIGHT);
    for y in 0..BIRD_HEIGHT {
        for x in 0..BIRD_WIDTH {
            if in_bird_body(x, y) {
                let c = if y < BIRD_HEIGHT / 4 { BIRD_HI } else { BIRD_Y };
                sprite.set(x, y, c);
            }
        }
    }

    // wing: up, level, down
    let wing_y = [14, 20, 26][frame % BIRD_FRAMES];
    for y in wing_y..wing_y + 10 {
        for x in 8..30 {
            if in_bird_body(x, y) {
                sprite.set(x, y, BIRD_WING);
            }
        }
    }

    sprite.fill_rect(44, 8, 12, 12, BIRD_EYE);
    sprite.fill_rect(50, 12, 4, 6, BIRD_PUPIL);

    for y in 24..34 {
        for x in 50..BIRD_WIDTH {
            if in_bird_body(x, y) {
                sprite.set(x, y, BIRD_BEAK);
            }
        }
    }
    sprite
}

fn pipe_shade(x: usize, total_w: usize) -> Rgba {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f32 / (total_w - 1) as f32 * 256.0) as u16;
    if t < 64 {
        Rgba::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgba::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgba::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgba::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

/// Draws the lower pipe piece: a full-width cap on top of a narrower body.
pub fn pipe() -> Sprite {
    let mut sprite = Sprite::new(PIPE_WIDTH, PIPE_HEIGHT);
    for x in 0..PIPE_WIDTH {
        let c = pipe_shade(x, PIPE_WIDTH);
        for y in 0..PIPE_CAP_HEIGHT {
            sprite.set(x, y, c);
        }
        sprite.set(x, 0, CAP_DARK);
        sprite.set(x, PIPE_CAP_HEIGHT - 1, CAP_DARK);
    }

    let body_w = PIPE_WIDTH - 2 * PIPE_BODY_INSET;
    for x in 0..body_w {
        let c = pipe_shade(x, body_w);
        for y in PIPE_CAP_HEIGHT..PIPE_HEIGHT {
            sprite.set(PIPE_BODY_INSET + x, y, c);
        }
    }
    sprite
}

/// Draws one ground strip: striped grass over diagonal dirt bands.
pub fn base() -> Sprite {
    let mut sprite = Sprite::new(BASE_WIDTH, BASE_HEIGHT);
    for x in 0..BASE_WIDTH {
        for y in 0..8 {
            let alt = (x / 12) % 2 == 0;
            sprite.set(x, y, if alt { GRASS } else { GRASS_LIGHT });
        }
        for y in 8..BASE_HEIGHT {
            let stripe = (x + y * 2) % 48 < 24;
            sprite.set(x, y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
    sprite
}

/// Every sprite the game draws, built once per owner.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Wing animation frames of the bird.
    pub bird: [Sprite; BIRD_FRAMES],
    /// Upper pipe piece, opening downwards.
    pub pipe_top: Sprite,
    /// Lower pipe piece, opening upwards.
    pub pipe_bottom: Sprite,
    /// Ground strip.
    pub base: Sprite,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteSheet {
    /// Draws all sprites.
    pub fn new() -> Self {
        let pipe_bottom = pipe();
        Self {
            bird: [bird(0), bird(1), bird(2)],
            pipe_top: pipe_bottom.flipped_vertically(),
            pipe_bottom,
            base: base(),
        }
    }
}
