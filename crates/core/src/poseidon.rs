//! Poseidon compression over the BN254 scalar field.
//!
//! Parameters are derived with the Grain LFSR search shipped with arkworks,
//! so the round constants and MDS matrix are reproducible from the field
//! size and round counts alone.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{
    find_poseidon_ark_and_mds, PoseidonConfig, PoseidonSponge,
};
use ark_crypto_primitives::sponge::CryptographicSponge;
use ark_ff::PrimeField;

use crate::hasher::HashOracle;

/// Number of full rounds (beginning + end)
const FULL_ROUNDS: usize = 8;

/// Number of partial rounds
const PARTIAL_ROUNDS: usize = 57;

/// S-box exponent
const ALPHA: u64 = 5;

/// Absorption rate: two field elements per permutation.
const RATE: usize = 2;

const CAPACITY: usize = 1;

/// Build the Poseidon configuration for the BN254 scalar field.
///
/// - Rate: 2, Capacity: 1
/// - Full rounds: 8 (4 at start, 4 at end)
/// - Partial rounds: 57
/// - Alpha: 5 (x^5 S-box)
pub fn poseidon_config() -> PoseidonConfig<Fr> {
    let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
        Fr::MODULUS_BIT_SIZE as u64,
        RATE,
        FULL_ROUNDS as u64,
        PARTIAL_ROUNDS as u64,
        0,
    );

    PoseidonConfig::new(FULL_ROUNDS, PARTIAL_ROUNDS, ALPHA, mds, ark, RATE, CAPACITY)
}

/// `HashOracle` backed by a Poseidon sponge.
///
/// Holds its configuration so the parameter search runs once per instance.
#[derive(Clone, Debug)]
pub struct PoseidonOracle {
    config: PoseidonConfig<Fr>,
}

impl PoseidonOracle {
    pub fn new() -> Self {
        Self::with_config(poseidon_config())
    }

    pub fn with_config(config: PoseidonConfig<Fr>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PoseidonConfig<Fr> {
        &self.config
    }

    /// Hash a single field element.
    pub fn hash_one(&self, input: Fr) -> Fr {
        let mut sponge = PoseidonSponge::new(&self.config);
        sponge.absorb(&input);
        let out: Vec<Fr> = sponge.squeeze_field_elements(1);
        out[0]
    }

    /// Hash two field elements: absorb `a`, absorb `b`, squeeze one.
    pub fn hash_two(&self, a: Fr, b: Fr) -> Fr {
        let mut sponge = PoseidonSponge::new(&self.config);
        sponge.absorb(&a);
        sponge.absorb(&b);
        let out: Vec<Fr> = sponge.squeeze_field_elements(1);
        out[0]
    }

    /// Derive leaves as `H(v)` for each raw value.
    pub fn leaves_from_values(&self, values: &[u64]) -> Vec<Fr> {
        values.iter().map(|&v| self.hash_one(Fr::from(v))).collect()
    }
}

impl Default for PoseidonOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl HashOracle for PoseidonOracle {
    type Element = Fr;

    fn compress(&self, left: &Fr, right: &Fr) -> Fr {
        self.hash_two(*left, *right)
    }
}
