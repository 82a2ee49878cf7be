use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::transform::Rpy;

/// Fixed seed so that failures can be reproduced.
pub(crate) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(4121)
}

/// Random angles with pitch kept clear of ±90°.
pub(crate) fn random_rpy(rng: &mut StdRng) -> Rpy {
    [
        rng.gen_range(-3.1..3.1),
        rng.gen_range(-1.5..1.5),
        rng.gen_range(-3.1..3.1),
    ]
}

pub(crate) fn random_vec(rng: &mut StdRng, len: usize, range: f64) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-range..range)).collect()
}

pub(crate) fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= tolerance,
                "element {} differs: {} vs {} (actual {:?}, expected {:?})", i, a, e, actual, expected);
    }
}
