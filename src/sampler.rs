use rand::{rngs::StdRng, Rng, SeedableRng};

/// A point in the 32-bit identifier space shared by servers and keys.
pub type Identifier = u32;

/// Draws identifiers uniformly from `[0, 2^32 - 1]`.
///
/// The random source is owned by the sampler, so two samplers built from
/// the same seed produce the same identifier stream.
pub struct IdentifierSampler<R = StdRng> {
    rng: R,
    seed: Option<u64>,
}

impl IdentifierSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        IdentifierSampler {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Picks a fresh seed from the OS. The seed is kept so the run can be
    /// replayed with [`IdentifierSampler::seeded`].
    pub fn from_entropy() -> Self {
        let seed = StdRng::from_os_rng().random::<u64>();
        Self::seeded(seed)
    }
}

impl<R: Rng> IdentifierSampler<R> {
    pub fn from_rng(rng: R) -> Self {
        IdentifierSampler { rng, seed: None }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn next_identifier(&mut self) -> Identifier {
        self.rng.random::<Identifier>()
    }

    pub fn sample(&mut self, count: usize) -> Vec<Identifier> {
        (0..count).map(|_| self.next_identifier()).collect()
    }
}
