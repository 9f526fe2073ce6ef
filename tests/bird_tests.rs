#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::{Bird, MIN_TILT};
use flappy_evo::simulation::params::Params;

fn create_test_params() -> Params {
    Params {
        rng_seed: Some(7),
        ..Params::default()
    }
}

#[test]
fn test_free_fall_reaches_terminal_velocity() {
    let params = create_test_params();
    let mut bird = Bird::new(0, params.bird_x, params.bird_start_y);

    let displacements: Vec<f32> = (0..8).map(|_| bird.advance(&params)).collect();

    assert_eq!(displacements, vec![1.5, 6.0, 13.5, 16.0, 16.0, 16.0, 16.0, 16.0]);
    // displacement never shrinks while falling
    for pair in displacements.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
    assert_eq!(bird.y, params.bird_start_y + 101.0);
}

#[test]
fn test_jump_arc() {
    let params = create_test_params();
    let mut bird = Bird::new(0, params.bird_x, 400.0);
    bird.jump(&params);

    assert_eq!(bird.tick_count, 0);
    assert_eq!(bird.vel, params.jump_velocity);
    assert_eq!(bird.jump_height, 400.0);

    let displacements: Vec<f32> = (0..9).map(|_| bird.advance(&params)).collect();
    assert_eq!(
        displacements,
        vec![-11.0, -17.0, -20.0, -20.0, -17.0, -11.0, 0.0, 12.0, 16.0]
    );
    assert_eq!(bird.y, 400.0 - 96.0 + 28.0);
}

#[test]
fn test_jump_resets_tick_count() {
    let params = create_test_params();
    let mut bird = Bird::new(0, params.bird_x, params.bird_start_y);
    for _ in 0..5 {
        bird.advance(&params);
    }
    assert_eq!(bird.tick_count, 5);

    bird.jump(&params);
    assert_eq!(bird.tick_count, 0);
    assert_eq!(bird.jump_height, bird.y);
    assert_eq!(bird.advance(&params), -11.0);
}

#[test]
fn test_tilt_snaps_up_while_climbing() {
    let params = create_test_params();
    let mut bird = Bird::new(0, params.bird_x, 400.0);
    bird.tilt = -60.0;
    bird.jump(&params);
    bird.advance(&params);

    assert_eq!(bird.tilt, params.max_rotation);
}

#[test]
fn test_tilt_drops_and_clamps_when_falling() {
    let params = create_test_params();
    let mut bird = Bird::new(0, params.bird_x, 100.0);

    // within the margin below the start height the bird keeps its nose up
    bird.advance(&params);
    assert_eq!(bird.tilt, params.max_rotation);

    for _ in 0..30 {
        bird.advance(&params);
        assert!(bird.tilt >= MIN_TILT);
        assert!(bird.tilt <= params.max_rotation);
    }
    assert_eq!(bird.tilt, MIN_TILT);
}

#[test]
fn test_out_of_bounds() {
    let params = create_test_params();
    let mut bird = Bird::new(0, params.bird_x, 100.0);
    assert!(!bird.is_out_of_bounds(48.0, params.ground_y));

    bird.y = params.ground_y - 48.0;
    assert!(bird.is_out_of_bounds(48.0, params.ground_y));

    bird.y = params.ground_y - 48.5;
    assert!(!bird.is_out_of_bounds(48.0, params.ground_y));

    bird.y = -0.5;
    assert!(bird.is_out_of_bounds(48.0, params.ground_y));
}

#[test]
fn test_wing_frame_cycle() {
    let bird = Bird::new(0, 230.0, 350.0);
    let frames: Vec<usize> = [0, 4, 5, 9, 10, 15, 20].iter().map(|&t| bird.wing_frame(t)).collect();
    assert_eq!(frames, vec![0, 0, 1, 1, 2, 1, 0]);
}

#[test]
fn test_diving_bird_glides() {
    let mut bird = Bird::new(0, 230.0, 350.0);
    bird.tilt = -85.0;
    for tick in 0..20 {
        assert_eq!(bird.wing_frame(tick), 1);
    }
}
