use std::time::Duration;

use approx::assert_relative_eq;
use ljbox::{
    compute::Energies,
    output::{read_trajectory, Discard},
    run::unit_rng,
    Cluster, Communicator, ForceField, LocalGlobal, MemoryTrajectory, Mode, PairwiseSymmetric,
    Params, Simulation, SingleProcess, Stage, TrajectoryWriter,
};

fn params() -> Params {
    Params {
        npart: 40,
        nframes: 4,
        npframe: 10,
        t0: 0.0,
        seed: Some(5),
        ..Params::default()
    }
}

fn serial_sim(params: &Params) -> Simulation<SingleProcess, PairwiseSymmetric> {
    let field = ForceField::from_params(params);
    Simulation::new(params.clone(), SingleProcess, PairwiseSymmetric::new(field)).unwrap()
}

#[test]
fn touching_pair_repels() {
    let params = Params {
        npart: 2,
        gravity: 0.0,
        t0: 0.0,
        ..Params::default()
    };
    let mut sim = serial_sim(&params);
    sim.place_at(vec![[0.5, 0.5], [0.5, 0.5 + params.sigma]]);
    sim.distribute(&mut unit_rng(Some(1), 0)).unwrap();
    sim.start(&mut Discard).unwrap();
    sim.step().unwrap();

    let x = sim.local().positions();
    let dist = ((x[1][0] - x[0][0]).powi(2) + (x[1][1] - x[0][1]).powi(2)).sqrt();
    assert!(dist > params.sigma);
    assert_eq!(x[0][0], 0.5);
    assert_eq!(x[1][0], 0.5);
}

#[test]
fn free_fall_velocity() {
    let params = Params {
        npart: 1,
        eps: 0.0,
        gravity: 1.0,
        t0: 0.0,
        ..Params::default()
    };
    let mut sim = serial_sim(&params);
    sim.place_at(vec![[0.5, 0.5]]);
    sim.distribute(&mut unit_rng(Some(1), 0)).unwrap();
    sim.start(&mut Discard).unwrap();
    sim.step().unwrap();

    let v = sim.local().velocities()[0];
    assert_eq!(v[0], 0.0);
    assert_eq!(v[1], -params.gravity * params.dt);
    assert_eq!(sim.stage(), Stage::Stepping { frame: 1, substep: 1 });
}

#[test]
fn particle_stays_in_the_box() {
    let params = Params {
        npart: 1,
        nframes: 50,
        npframe: 20,
        eps: 0.0,
        gravity: 1.0,
        t0: 0.0,
        ..Params::default()
    };
    let mut sim = serial_sim(&params);
    sim.place_at(vec![[0.5, 0.001]]);
    sim.distribute(&mut unit_rng(Some(1), 0)).unwrap();
    let mut out = MemoryTrajectory::new();
    sim.run(&mut out).unwrap();

    assert_eq!(out.frames.len(), params.nframes);
    for frame in &out.frames {
        assert!((0.0..=1.0).contains(&frame[0][1]));
    }
    assert_eq!(sim.stage(), Stage::Done);
}

#[test]
fn modes_agree() {
    let params = params();
    let mut reference = MemoryTrajectory::new();
    let summary = ljbox::run(&params, Mode::Serial, &mut reference).unwrap();
    assert_eq!(summary.particles, params.npart);
    assert_eq!(summary.steps, params.total_steps());
    assert!(summary.elapsed > Duration::ZERO);
    assert_eq!(reference.frames.len(), params.nframes);

    for mode in [
        Mode::Threaded { threads: 3 },
        Mode::Distributed {
            ranks: 3,
            threads_per_rank: 1,
        },
        Mode::Distributed {
            ranks: 2,
            threads_per_rank: 2,
        },
    ] {
        let mut out = MemoryTrajectory::new();
        let summary = ljbox::run(&params, mode, &mut out).unwrap();
        assert_eq!(summary.particles, params.npart, "{:?}", mode);
        assert_eq!(out.num_particles, Some(params.npart));
        assert_eq!(out.frames.len(), reference.frames.len());
        // Placement happens on the root alone, so frame 0 is bit-identical
        assert_eq!(out.frames[0], reference.frames[0]);
        for (frame, expected) in out.frames.iter().zip(&reference.frames) {
            for (x, y) in frame.iter().zip(expected) {
                assert_relative_eq!(x[0], y[0], epsilon = 1e-9);
                assert_relative_eq!(x[1], y[1], epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn more_ranks_than_particles() {
    let params = Params {
        npart: 3,
        nframes: 3,
        npframe: 5,
        ..params()
    };
    let mut out = MemoryTrajectory::new();
    let mode = Mode::Distributed {
        ranks: 5,
        threads_per_rank: 1,
    };
    let summary = ljbox::run(&params, mode, &mut out).unwrap();
    assert_eq!(summary.particles, 3);
    assert_eq!(out.frames.len(), 3);
}

#[test]
fn crowded_box_runs_with_fewer_particles() {
    let params = Params {
        npart: 200,
        sigma: 0.2,
        nframes: 2,
        npframe: 2,
        ..params()
    };
    let mut out = MemoryTrajectory::new();
    let summary = ljbox::run(&params, Mode::Serial, &mut out).unwrap();
    assert!(summary.particles > 0);
    assert!(summary.particles < summary.requested);
    assert_eq!(out.num_particles, Some(summary.particles));
    assert_eq!(out.last_frame().unwrap().len(), summary.particles);
}

#[test]
fn trajectory_file_layout() {
    let params = params();
    let mut writer = TrajectoryWriter::new(Vec::new());
    ljbox::run(&params, Mode::Serial, &mut writer).unwrap();
    let bytes = writer.into_inner();
    assert_eq!(&bytes[..8], b"NBView00");
    assert_eq!(bytes.len(), 16 + params.nframes * params.npart * 8);

    let (n, frames) = read_trajectory(bytes.as_slice()).unwrap();
    assert_eq!(n, params.npart);
    assert_eq!(frames.len(), params.nframes);
    for p in frames.iter().flatten() {
        assert!((0.0..=1.0).contains(&p[0]));
        assert!((0.0..=1.0).contains(&p[1]));
    }
}

#[test]
fn distributed_energies_match_serial() {
    let params = Params {
        t0: 0.5,
        ..params()
    };
    let field = ForceField::from_params(&params);

    let mut serial = serial_sim(&params);
    let mut rng = unit_rng(params.seed, 0);
    serial.place(&mut rng);
    serial.distribute(&mut rng).unwrap();
    serial.start(&mut Discard).unwrap();
    let expected = serial.energies().unwrap();

    let energies: Vec<Energies> = Cluster::new(3)
        .unwrap()
        .run(|domain| {
            let mut rng = unit_rng(params.seed, domain.rank());
            let mut sim = Simulation::new(params.clone(), domain, LocalGlobal::new(field))?;
            sim.place(&mut rng);
            sim.distribute(&mut rng)?;
            sim.start(&mut Discard)?;
            sim.energies()
        })
        .unwrap();

    for e in &energies {
        assert_eq!(e, &energies[0]);
        assert_relative_eq!(e.potential, expected.potential, max_relative = 1e-10);
        assert!(e.kinetic > 0.0);
    }
}

#[test]
fn zero_particles_is_fatal() {
    let params = params();
    let mut sim = serial_sim(&params);
    sim.place_at(Vec::new());
    assert!(matches!(
        sim.distribute(&mut unit_rng(Some(1), 0)),
        Err(ljbox::Error::NoParticles)
    ));
}
