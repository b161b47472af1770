use crate::error::GeneratorError;
use crate::Generator;
use pocketlink_core::ShortCode;
use tracing::{trace, warn};
use typed_builder::TypedBuilder;

/// Configures how hard a [`CodeAllocator`] tries before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct AllocatorSettings {
    /// Length of regular generated codes.
    #[builder(default = 6)]
    pub length: usize,
    /// Draws per length before moving on.
    #[builder(default = 32)]
    pub max_attempts: u32,
    /// Length used once `max_attempts` draws at `length` all collided.
    #[builder(default = 12)]
    pub fallback_length: usize,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AllocatorSettings {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.length == 0 {
            return Err(GeneratorError::InvalidSettings(
                "length must be positive".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(GeneratorError::InvalidSettings(
                "max_attempts must be positive".to_string(),
            ));
        }
        if self.fallback_length < self.length {
            return Err(GeneratorError::InvalidSettings(format!(
                "fallback_length ({}) must not be shorter than length ({})",
                self.fallback_length, self.length
            )));
        }
        Ok(())
    }
}

/// Draws codes from a [`Generator`] until one is free.
///
/// Retries are bounded: `max_attempts` draws at the regular length, then the
/// same number at the fallback length, then [`GeneratorError::Exhausted`].
#[derive(Debug, Clone)]
pub struct CodeAllocator<G> {
    generator: G,
    settings: AllocatorSettings,
}

impl<G: Generator> CodeAllocator<G> {
    /// Creates an allocator with the default settings.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            settings: AllocatorSettings::default(),
        }
    }

    pub fn with_settings(generator: G, settings: AllocatorSettings) -> Result<Self, GeneratorError> {
        settings.validate()?;
        Ok(Self {
            generator,
            settings,
        })
    }

    pub fn settings(&self) -> &AllocatorSettings {
        &self.settings
    }

    /// Returns a code for which `is_taken` is false.
    pub fn allocate<F>(&mut self, mut is_taken: F) -> Result<ShortCode, GeneratorError>
    where
        F: FnMut(&ShortCode) -> bool,
    {
        let AllocatorSettings {
            length,
            max_attempts,
            fallback_length,
        } = self.settings;

        for length in [length, fallback_length] {
            for attempt in 1..=max_attempts {
                let code = self.generator.generate(length);
                if !is_taken(&code) {
                    return Ok(code);
                }
                trace!(code = %code, attempt, "generated short code already taken");
            }
            warn!(length, max_attempts, "no free short code at this length");
        }

        Err(GeneratorError::Exhausted {
            attempts: max_attempts.saturating_mul(2),
        })
    }
}
