//! Short code generation.
//!
//! Generators only draw candidate codes; [`CodeAllocator`] turns draws into a
//! code that is free with respect to a caller-supplied "taken" check.

pub mod allocator;
pub mod error;
pub mod random;
pub mod seq;

pub use allocator::{AllocatorSettings, CodeAllocator};
pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomGeneratorSettings, ALPHANUMERIC};
pub use seq::SeqGenerator;

use pocketlink_core::ShortCode;

/// Trait for drawing candidate short codes.
///
/// Implementations are pure generators that don't interact with storage and
/// make no uniqueness promise; collisions are the allocator's concern.
pub trait Generator: Send + 'static {
    /// Draws one candidate code of exactly `length` characters.
    fn generate(&mut self, length: usize) -> ShortCode;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&mut self, length: usize) -> ShortCode {
        (**self).generate(length)
    }
}
