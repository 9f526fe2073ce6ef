use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::sprites::{BIRD_FRAMES, Sprite, SpriteSheet};
use flappy_evo::simulation::world::Snapshot;
use macroquad::prelude::*;

const SKY_TOP: Color = Color::new(70.0 / 255.0, 180.0 / 255.0, 200.0 / 255.0, 1.0);
const SKY_BOT: Color = Color::new(190.0 / 255.0, 232.0 / 255.0, 245.0 / 255.0, 1.0);
const SKY_BANDS: usize = 32;

/// GPU copies of the sprite sheet.
pub struct Textures {
    bird: [Texture2D; BIRD_FRAMES],
    pipe_top: Texture2D,
    pipe_bottom: Texture2D,
    base: Texture2D,
}

impl Textures {
    pub fn new(sheet: &SpriteSheet) -> Self {
        Self {
            bird: [
                to_texture(&sheet.bird[0]),
                to_texture(&sheet.bird[1]),
                to_texture(&sheet.bird[2]),
            ],
            pipe_top: to_texture(&sheet.pipe_top),
            pipe_bottom: to_texture(&sheet.pipe_bottom),
            base: to_texture(&sheet.base),
        }
    }
}

fn to_texture(sprite: &Sprite) -> Texture2D {
    let texture = Texture2D::from_rgba8(
        sprite.width() as u16,
        sprite.height() as u16,
        &sprite.to_rgba8(),
    );
    texture.set_filter(FilterMode::Nearest);
    texture
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        1.0,
    )
}

fn draw_sky(params: &Params) {
    let band_h = params.ground_y / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        draw_rectangle(
            0.0,
            i as f32 * band_h,
            params.window_width,
            band_h + 1.0,
            lerp_color(SKY_TOP, SKY_BOT, t),
        );
    }
}

/// Draws one frame of the game area: sky, pipes, ground, birds and score.
pub fn draw_scene(snapshot: &Snapshot<'_>, textures: &Textures, params: &Params) {
    clear_background(BLACK);
    draw_sky(params);

    for pipe in snapshot.pipes {
        draw_texture(&textures.pipe_top, pipe.x, pipe.top, WHITE);
        draw_texture(&textures.pipe_bottom, pipe.x, pipe.bottom, WHITE);
    }

    draw_texture(&textures.base, snapshot.base.x1, snapshot.base.y, WHITE);
    draw_texture(&textures.base, snapshot.base.x2, snapshot.base.y, WHITE);

    for bird in snapshot.birds {
        // sprites rotate about their centre; positive tilt is counter-clockwise on screen
        draw_texture_ex(
            &textures.bird[bird.wing_frame(snapshot.tick)],
            bird.x,
            bird.y,
            WHITE,
            DrawTextureParams {
                rotation: -bird.tilt.to_radians(),
                ..Default::default()
            },
        );
    }

    let text = format!("Score: {}", snapshot.score);
    let font_size = 40.0;
    let size = measure_text(&text, None, font_size as u16, 1.0);
    draw_text(
        &text,
        params.window_width - 10.0 - size.width,
        10.0 + size.height,
        font_size,
        WHITE,
    );
}
