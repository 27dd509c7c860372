use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Uniform;

/// Input sequences for the fused kernel `b * c + d / e - 3.14`.
pub struct Operands {
    pub b: Vec<f64>,
    pub c: Vec<f64>,
    pub d: Vec<f64>,
    pub e: Vec<f64>,
}

impl Operands {
    /// Draw `len` values per sequence uniformly from [-1, 1).
    ///
    /// Sequences are filled element by element, interleaved b, c, d, e,
    /// so a given seed always produces the same four sequences.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let dist = Uniform::new(-1.0, 1.0);
        let mut ops = Operands {
            b: Vec::with_capacity(len),
            c: Vec::with_capacity(len),
            d: Vec::with_capacity(len),
            e: Vec::with_capacity(len),
        };
        for _ in 0..len {
            ops.b.push(rng.sample(dist));
            ops.c.push(rng.sample(dist));
            ops.d.push(rng.sample(dist));
            ops.e.push(rng.sample(dist));
        }
        ops
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }
}

/// Seeded generator when `seed` is given, OS entropy otherwise.
pub fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
