use crate::Generator;
use pocketlink_core::ShortCode;

/// A deterministic generator using a sequential counter.
///
/// Produces `prefix` followed by the zero-padded counter, e.g. "pl0000",
/// "pl0001" for a length of 6. Handy wherever reproducible codes matter more
/// than unpredictability, such as tests and fixtures.
#[derive(Debug, Clone)]
pub struct SeqGenerator {
    counter: u64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: offset,
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&mut self, length: usize) -> ShortCode {
        let count = self.counter;
        self.counter = self.counter.wrapping_add(1);

        let width = length.saturating_sub(self.prefix.len());
        let mut code = format!("{}{:0width$}", self.prefix, count, width = width);
        // counters that outgrow the width keep their low digits
        if code.len() > length {
            code = code.split_off(code.len() - length);
        }
        ShortCode::new_unchecked(code)
    }
}
