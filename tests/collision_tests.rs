#![allow(missing_docs)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::collision::collides;
use flappy_evo::simulation::mask::{Mask, Silhouettes};
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::pipe::Pipe;
use flappy_evo::simulation::sprites::{
    BIRD_HEIGHT, BIRD_WIDTH, PIPE_BODY_INSET, PIPE_CAP_HEIGHT, PIPE_HEIGHT, PIPE_WIDTH,
    SpriteSheet,
};

fn create_test_silhouettes() -> Silhouettes {
    Silhouettes::from_sheet(&SpriteSheet::new())
}

#[test]
fn test_mask_overlap_offsets() {
    let a = Mask::from_fn(4, 4, |_, _| true);
    let b = Mask::from_fn(2, 2, |_, _| true);

    assert_eq!(a.overlap(&b, (0, 0)), Some((0, 0)));
    assert_eq!(a.overlap(&b, (3, 3)), Some((3, 3)));
    assert_eq!(a.overlap(&b, (-1, -1)), Some((0, 0)));
    assert_eq!(a.overlap(&b, (4, 0)), None);
    assert_eq!(a.overlap(&b, (-2, 0)), None);
}

#[test]
fn test_mask_overlap_needs_shared_pixel() {
    let left = Mask::from_fn(4, 4, |x, _| x < 2);
    let right = Mask::from_fn(4, 4, |x, _| x >= 2);

    assert_eq!(left.overlap(&right, (0, 0)), None);
    assert_eq!(left.overlap(&right, (-1, 0)), Some((1, 0)));
}

#[test]
fn test_bird_silhouette_is_an_ellipse() {
    let silhouettes = create_test_silhouettes();
    let bird = &silhouettes.bird;

    assert_eq!(bird.width(), BIRD_WIDTH);
    assert_eq!(bird.height(), BIRD_HEIGHT);
    assert!(bird.get(BIRD_WIDTH / 2, BIRD_HEIGHT / 2));
    assert!(!bird.get(0, 0));
    assert!(!bird.get(BIRD_WIDTH - 1, BIRD_HEIGHT - 1));
}

#[test]
fn test_wing_frames_share_silhouette() {
    let sheet = SpriteSheet::new();
    let first = Mask::from_sprite(&sheet.bird[0]);
    for frame in &sheet.bird[1..] {
        assert_eq!(Mask::from_sprite(frame), first);
    }
}

#[test]
fn test_pipe_silhouettes() {
    let silhouettes = create_test_silhouettes();
    let bottom = &silhouettes.pipe_bottom;
    let top = &silhouettes.pipe_top;

    assert_eq!(bottom.width(), PIPE_WIDTH);
    assert_eq!(bottom.height(), PIPE_HEIGHT);
    // cap spans the full width, the body is inset
    assert!(bottom.get(0, 0));
    assert!(bottom.get(0, PIPE_CAP_HEIGHT - 1));
    assert!(!bottom.get(0, PIPE_CAP_HEIGHT));
    assert!(bottom.get(PIPE_BODY_INSET, PIPE_CAP_HEIGHT));

    // the upper piece is the lower one mirrored
    assert!(top.get(0, PIPE_HEIGHT - 1));
    assert!(!top.get(0, PIPE_HEIGHT - 1 - PIPE_CAP_HEIGHT));
    assert_eq!(top.count(), bottom.count());
}

#[test]
fn test_bounding_boxes_touch_without_collision() {
    let params = Params::default();
    let silhouettes = create_test_silhouettes();
    let bird = Bird::new(0, 230.0, 300.0);
    // bottom piece starts inside the bird's box, at its transparent corner
    let pipe = Pipe::with_height(0, 292.0, 142.0, &params);
    assert_eq!(pipe.bottom, 342.0);

    assert!(!collides(&bird, &pipe, &silhouettes));
}

#[test]
fn test_opaque_overlap_collides() {
    let params = Params::default();
    let silhouettes = create_test_silhouettes();
    let bird = Bird::new(0, 230.0, 300.0);
    let pipe = Pipe::with_height(0, 282.0, 130.0, &params);
    assert_eq!(pipe.bottom, 330.0);

    assert!(silhouettes.bird.get(52, 30));
    assert!(collides(&bird, &pipe, &silhouettes));
}

#[test]
fn test_bird_inside_gap_is_clear() {
    let params = Params::default();
    let silhouettes = create_test_silhouettes();
    let pipe = Pipe::with_height(0, 200.0, 250.0, &params);

    for y in [255.0, 300.0, 350.0, 400.0] {
        let bird = Bird::new(0, 230.0, y);
        assert!(!collides(&bird, &pipe, &silhouettes), "y = {y}");
    }
}

#[test]
fn test_top_piece_collides() {
    let params = Params::default();
    let silhouettes = create_test_silhouettes();
    let pipe = Pipe::with_height(0, 230.0, 250.0, &params);
    let bird = Bird::new(0, 230.0, 230.0);

    assert!(collides(&bird, &pipe, &silhouettes));
}
