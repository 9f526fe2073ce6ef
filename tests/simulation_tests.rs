#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::controller::Member;
use flappy_evo::simulation::events::SimulationEvent;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::world::{Simulation, Status};

fn create_test_params() -> Params {
    Params {
        rng_seed: Some(42),
        ..Params::default()
    }
}

/// Pins every pipe opening to `height`.
fn fixed_gap_params(height: i32) -> Params {
    Params {
        gap_min: height,
        gap_max: height + 1,
        ..create_test_params()
    }
}

fn never_jump(_inputs: &[f32; 3]) -> f32 {
    0.0
}

/// Jumps once the bird sinks well below the top of the gap and is nearer the bottom.
fn gap_follower(inputs: &[f32; 3]) -> f32 {
    let [_, dist_top, dist_bottom] = *inputs;
    if dist_top > 120.0 && dist_top > dist_bottom {
        1.0
    } else {
        0.0
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_simulation_creation() {
    let params = create_test_params();
    let simulation = Simulation::new(&params, 5).unwrap();

    assert_eq!(simulation.birds().len(), 5);
    assert_eq!(simulation.pipes().len(), 1);
    assert_eq!(simulation.pipes()[0].x, params.first_pipe_x);
    assert_eq!(simulation.score(), 0);
    assert_eq!(simulation.ticks(), 0);
    assert_eq!(simulation.status(), Status::Running);
    for (i, bird) in simulation.birds().iter().enumerate() {
        assert_eq!(bird.member, i);
        assert_eq!(bird.x, params.bird_x);
        assert_eq!(bird.y, params.bird_start_y);
    }
}

#[test]
fn test_invalid_params_rejected() {
    let params = Params {
        gap_min: 300,
        gap_max: 300,
        ..create_test_params()
    };
    assert!(Simulation::new(&params, 1).is_err());
}

#[test]
fn test_idle_bird_hits_ground() {
    let params = create_test_params();
    let mut simulation = Simulation::new(&params, 1).unwrap();
    let mut controller = never_jump;
    let mut fitness = 0.0;
    let mut members = vec![Member::new(&mut controller, &mut fitness)];

    let mut status = Status::Running;
    while status == Status::Running {
        status = simulation.tick(&mut members);
        assert!(simulation.ticks() <= 23);
    }
    drop(members);

    assert_eq!(simulation.ticks(), 23);
    assert_eq!(simulation.score(), 0);
    assert!(simulation.birds().is_empty());
    assert!(matches!(
        simulation.last_events(),
        [SimulationEvent::OutOfBounds { member: 0, .. }]
    ));
    // leaving the playfield carries no penalty
    assert_close(fitness, 23.0 * 0.03);
}

#[test]
fn test_gap_follower_reaches_score_cap() {
    let params = Params {
        score_cap: 9,
        ..fixed_gap_params(250)
    };
    let mut simulation = Simulation::new(&params, 1).unwrap();
    let mut controller = gap_follower;
    let mut fitness = 0.0;
    let mut members = vec![Member::new(&mut controller, &mut fitness)];

    let mut cleared = Vec::new();
    while simulation.tick(&mut members) == Status::Running {
        assert!(simulation.ticks() < 1000);
        for bird in simulation.birds() {
            assert!(bird.y >= 275.0 && bird.y <= 383.0, "bird left the gap: {}", bird.y);
        }
        for event in simulation.last_events() {
            if let SimulationEvent::PipeCleared { pipe } = event {
                cleared.push((*pipe, simulation.ticks()));
            }
        }
    }
    for event in simulation.last_events() {
        if let SimulationEvent::PipeCleared { pipe } = event {
            cleared.push((*pipe, simulation.ticks()));
        }
    }
    drop(members);

    assert_eq!(simulation.score(), 10);
    assert_eq!(simulation.ticks(), 390);
    assert_eq!(simulation.birds().len(), 1);

    // each pipe scores exactly once, 39 ticks apart
    let ids: Vec<u64> = cleared.iter().map(|&(id, _)| id).collect();
    assert_eq!(ids, (0..10).collect::<Vec<u64>>());
    let ticks: Vec<u64> = cleared.iter().map(|&(_, tick)| tick).collect();
    assert_eq!(ticks, (1..=10).map(|n| n * 39).collect::<Vec<u64>>());

    assert_close(fitness, 390.0 * 0.03 + 10.0 * 2.0);
}

#[test]
fn test_collision_penalty_and_pass_bonus() {
    let params = Params {
        first_pipe_x: 300.0,
        ..fixed_gap_params(240)
    };
    let mut simulation = Simulation::new(&params, 2).unwrap();
    let mut idle = never_jump;
    let mut follower = gap_follower;
    let mut idle_fitness = 0.0;
    let mut follower_fitness = 0.0;
    let mut members = vec![
        Member::new(&mut idle, &mut idle_fitness),
        Member::new(&mut follower, &mut follower_fitness),
    ];

    for tick in 1..=50u64 {
        assert_eq!(simulation.tick(&mut members), Status::Running);
        match tick {
            5 => {
                assert!(
                    simulation
                        .last_events()
                        .contains(&SimulationEvent::Collided { member: 0, pipe: 0 })
                );
                assert_eq!(simulation.birds().len(), 1);
                assert_eq!(simulation.birds()[0].member, 1);
            }
            9 => assert_eq!(simulation.score(), 1),
            48 => assert_eq!(simulation.score(), 2),
            _ => {}
        }
    }
    drop(members);

    assert_eq!(simulation.score(), 2);
    assert_close(idle_fitness, 5.0 * 0.03 - 1.0);
    assert_close(follower_fitness, 50.0 * 0.03 + 2.0 * 2.0);
}

#[test]
fn test_pipe_spawned_on_clear() {
    let params = Params {
        first_pipe_x: 300.0,
        ..fixed_gap_params(240)
    };
    let mut simulation = Simulation::new(&params, 1).unwrap();
    let mut controller = gap_follower;
    let mut fitness = 0.0;
    let mut members = vec![Member::new(&mut controller, &mut fitness)];

    for _ in 0..9 {
        simulation.tick(&mut members);
    }

    let events = simulation.last_events();
    assert!(events.contains(&SimulationEvent::PipeCleared { pipe: 0 }));
    assert!(events.contains(&SimulationEvent::PipeSpawned {
        pipe: 1,
        height: 240.0
    }));
    assert_eq!(simulation.pipes().len(), 2);
    assert_eq!(simulation.pipes()[1].x, params.spawn_x);
    assert!(simulation.pipes()[0].passed);
}

#[test]
fn test_offscreen_pipes_retired() {
    let params = Params {
        first_pipe_x: 300.0,
        ..fixed_gap_params(240)
    };
    let mut simulation = Simulation::new(&params, 1).unwrap();
    let mut controller = gap_follower;
    let mut fitness = 0.0;
    let mut members = vec![Member::new(&mut controller, &mut fitness)];

    let mut retired = Vec::new();
    for _ in 0..60 {
        simulation.tick(&mut members);
        for event in simulation.last_events() {
            if let SimulationEvent::PipeRetired { pipe } = event {
                retired.push(*pipe);
            }
        }
        for pipe in simulation.pipes() {
            assert!(!pipe.is_offscreen());
        }
    }

    assert_eq!(retired, vec![0]);
    assert!(simulation.pipes().iter().all(|pipe| pipe.id != 0));
}

#[test]
fn test_adjacent_birds_eliminated_together() {
    let params = create_test_params();
    let mut simulation = Simulation::new(&params, 3).unwrap();
    let mut controllers = [never_jump, never_jump, never_jump];
    let mut fitness = [0.0f64; 3];
    let mut members: Vec<Member<'_>> = controllers
        .iter_mut()
        .zip(fitness.iter_mut())
        .map(|(controller, fitness)| Member::new(controller, fitness))
        .collect();

    for _ in 0..22 {
        simulation.tick(&mut members);
    }
    assert_eq!(simulation.birds().len(), 3);

    assert_eq!(simulation.tick(&mut members), Status::Terminated);
    drop(members);

    let eliminated: Vec<usize> = simulation
        .last_events()
        .iter()
        .filter_map(SimulationEvent::eliminated_member)
        .collect();
    assert_eq!(eliminated, vec![0, 1, 2]);
    for value in fitness {
        assert_close(value, 23.0 * 0.03);
    }
}

#[test]
fn test_birds_without_members_still_fall() {
    let params = create_test_params();
    let mut simulation = Simulation::new(&params, 1).unwrap();

    let mut status = Status::Running;
    while status == Status::Running {
        status = simulation.tick(&mut []);
    }
    assert_eq!(simulation.ticks(), 23);
}

#[test]
fn test_empty_population_terminates_without_ticking() {
    let params = create_test_params();
    let mut simulation = Simulation::new(&params, 0).unwrap();

    assert_eq!(simulation.tick(&mut []), Status::Terminated);
    assert_eq!(simulation.ticks(), 0);
}

#[test]
fn test_termination_is_sticky() {
    let params = create_test_params();
    let mut simulation = Simulation::new(&params, 1).unwrap();
    while simulation.tick(&mut []) == Status::Running {}

    let ticks = simulation.ticks();
    let base_x = simulation.base().x1;
    for _ in 0..5 {
        assert_eq!(simulation.tick(&mut []), Status::Terminated);
    }
    assert_eq!(simulation.ticks(), ticks);
    assert_eq!(simulation.base().x1, base_x);
}

#[test]
fn test_controller_sees_target_gap() {
    let params = fixed_gap_params(250);
    let mut simulation = Simulation::new(&params, 1).unwrap();
    let mut seen = Vec::new();
    let mut controller = |inputs: &[f32; 3]| {
        seen.push(*inputs);
        0.0
    };
    let mut fitness = 0.0;
    let mut members = vec![Member::new(&mut controller, &mut fitness)];

    simulation.tick(&mut members);
    drop(members);

    assert_eq!(seen, vec![[351.5, 101.5, 98.5]]);
}

#[test]
fn test_seeded_runs_repeat() {
    let params = create_test_params();
    let heights = |params: &Params| {
        let mut simulation = Simulation::new(params, 1).unwrap();
        let mut controller = gap_follower;
        let mut fitness = 0.0;
        let mut members = vec![Member::new(&mut controller, &mut fitness)];
        let mut heights = vec![simulation.pipes()[0].height];
        for _ in 0..100 {
            simulation.tick(&mut members);
            for event in simulation.last_events() {
                if let SimulationEvent::PipeSpawned { height, .. } = event {
                    heights.push(*height);
                }
            }
        }
        heights
    };

    assert_eq!(heights(&params), heights(&params));
}
