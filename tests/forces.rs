use approx::assert_relative_eq;
use ljbox::{
    parallel::build_pool, particles::init_particles_random, region::Rect, ForceEvaluator,
    ForceField, LocalGlobal, PairwiseSymmetric, Params, Partition, ThreadedSymmetric,
};
use rand::{rngs::StdRng, SeedableRng};

fn system(n: usize) -> (ForceField, Vec<[f64; 2]>) {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(11);
    let positions = init_particles_random(&Rect::unit(), n, params.sigma, &mut rng);
    assert_eq!(positions.len(), n);
    (ForceField::from_params(&params), positions)
}

fn serial(field: ForceField, positions: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut out = vec![[0.0; 2]; positions.len()];
    PairwiseSymmetric::new(field)
        .accelerations(positions, 0..positions.len(), &mut out)
        .unwrap();
    out
}

fn assert_close(a: &[[f64; 2]], b: &[[f64; 2]]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert_relative_eq!(x[0], y[0], epsilon = 1e-9, max_relative = 1e-9);
        assert_relative_eq!(x[1], y[1], epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn threaded_matches_serial() {
    let (field, positions) = system(300);
    let expected = serial(field, &positions);

    let force = ThreadedSymmetric::new(field, build_pool(3, "test").unwrap());
    let mut out = vec![[0.0; 2]; positions.len()];
    // Twice, so the reused accumulators are exercised
    for _ in 0..2 {
        force
            .accelerations(&positions, 0..positions.len(), &mut out)
            .unwrap();
        assert_close(&out, &expected);
    }
}

#[test]
fn local_rows_match_serial() {
    let (field, positions) = system(300);
    let expected = serial(field, &positions);

    let partition = Partition::new(positions.len(), 4);
    for force in [
        LocalGlobal::new(field),
        LocalGlobal::with_pool(field, build_pool(2, "test").unwrap()),
    ] {
        let mut assembled = vec![[0.0; 2]; positions.len()];
        for range in partition.ranges() {
            force
                .accelerations(&positions, range.clone(), &mut assembled[range])
                .unwrap();
        }
        assert_close(&assembled, &expected);
    }
}

#[test]
fn field_only_when_particles_are_far_apart() {
    let params = Params::default();
    let field = ForceField::from_params(&params);
    let positions = vec![[0.1, 0.1], [0.9, 0.9]];
    assert_eq!(serial(field, &positions), vec![[0.0, -1.0], [0.0, -1.0]]);
}

#[test]
fn symmetric_evaluation_needs_the_whole_system() {
    let (field, positions) = system(10);
    let mut out = vec![[0.0; 2]; 5];
    assert!(PairwiseSymmetric::new(field)
        .accelerations(&positions, 0..5, &mut out)
        .is_err());
}
