use crate::error::GeneratorError;
use crate::Generator;
use pocketlink_core::ShortCode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use typed_builder::TypedBuilder;

/// Digits plus upper and lower case ASCII letters.
pub const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Symbols codes are drawn from. Must be non-empty, ASCII alphanumeric,
    /// without repeats.
    #[builder(default = ALPHANUMERIC.to_string(), setter(into))]
    pub alphabet: String,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws each symbol uniformly from the alphabet.
///
/// Not cryptographically meaningful; short codes are not secrets.
#[derive(Debug, Clone)]
pub struct RandomGenerator<R = StdRng> {
    alphabet: Vec<u8>,
    rng: R,
}

impl RandomGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a reproducible generator, mainly for tests.
    pub fn seeded(settings: RandomGeneratorSettings, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomGenerator<R> {
    pub fn with_rng(settings: RandomGeneratorSettings, rng: R) -> Result<Self, GeneratorError> {
        let alphabet = validate_alphabet(&settings.alphabet)?;
        Ok(Self { alphabet, rng })
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }
}

impl<R: Rng + Send + 'static> Generator for RandomGenerator<R> {
    fn generate(&mut self, length: usize) -> ShortCode {
        let code: String = (0..length)
            .map(|_| {
                let idx = self.rng.gen_range(0..self.alphabet.len());
                char::from(self.alphabet[idx])
            })
            .collect();
        ShortCode::new_unchecked(code)
    }
}

fn validate_alphabet(alphabet: &str) -> Result<Vec<u8>, GeneratorError> {
    if alphabet.is_empty() {
        return Err(GeneratorError::EmptyAlphabet);
    }

    let mut seen = HashSet::new();
    for c in alphabet.chars() {
        if !c.is_ascii_alphanumeric() {
            return Err(GeneratorError::InvalidSymbol(c));
        }
        if !seen.insert(c) {
            return Err(GeneratorError::DuplicateSymbol(c));
        }
    }

    Ok(alphabet.as_bytes().to_vec())
}
