use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::contract::{LocationRecord, UPDATED_CITY_NAME, UPDATED_STATE_NAME};

pub const SUFFIX_MIN: u16 = 1_000;
pub const SUFFIX_MAX: u16 = 9_999;
pub const PINCODE_BASE: u32 = 100_000;

/// Supplies the 4-digit suffixes synthetic records are derived from.
pub trait SuffixSource {
    fn next_suffix(&mut self) -> u16;
}

pub struct RandomSuffixSource {
    rng: StdRng,
}

impl RandomSuffixSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SuffixSource for RandomSuffixSource {
    fn next_suffix(&mut self) -> u16 {
        self.rng.gen_range(SUFFIX_MIN..=SUFFIX_MAX)
    }
}

/// Replays a scripted suffix sequence, then falls back to `SUFFIX_MIN`.
#[derive(Debug, Clone, Default)]
pub struct FixedSuffixSource {
    suffixes: VecDeque<u16>,
}

impl FixedSuffixSource {
    pub fn new(suffixes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            suffixes: suffixes.into_iter().collect(),
        }
    }
}

impl SuffixSource for FixedSuffixSource {
    fn next_suffix(&mut self) -> u16 {
        self.suffixes.pop_front().unwrap_or(SUFFIX_MIN)
    }
}

pub fn generate_location(suffix: u16) -> LocationRecord {
    LocationRecord {
        country: format!("Country{suffix}"),
        city_id: format!("City{suffix}"),
        city_name: format!("CityName{suffix}"),
        pincode: PINCODE_BASE + u32::from(suffix),
        state_name: format!("State{suffix}"),
    }
}

/// Copy of `record` with the city and state names overwritten; identity is kept.
pub fn apply_fixed_update(record: &LocationRecord) -> LocationRecord {
    LocationRecord {
        city_name: UPDATED_CITY_NAME.to_string(),
        state_name: UPDATED_STATE_NAME.to_string(),
        ..record.clone()
    }
}
