use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::types::Element;

/// Deterministic RNG factory for match setup.
///
/// Derives the stream from `seed ^ salt` with PCG 64 (`rand_pcg::Pcg64`), so
/// equal inputs reproduce the same sequence on every platform.
#[inline]
pub fn rng_for_seed(seed: u64, salt: u64) -> impl Rng {
    Pcg64::seed_from_u64(seed ^ salt)
}

const TERRAIN_SALT: u64 = 0x7E22_A1B0_0000_0009;

/// Elemental terrain for the nine cells, uniform over {none} ∪ elements.
pub fn random_terrain(seed: u64) -> [Option<Element>; 9] {
    let mut rng = rng_for_seed(seed, TERRAIN_SALT);
    let mut arr: [Option<Element>; 9] = [None; 9];
    for cell in &mut arr {
        let k = rng.gen_range(0..=Element::ALL.len());
        *cell = k.checked_sub(1).map(|i| Element::ALL[i]);
    }
    arr
}
