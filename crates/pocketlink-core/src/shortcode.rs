use crate::error::ShortCodeError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt::Display;

/// The token identifying one shortened URL.
///
/// User supplied codes go through [`ShortCode::new`], which enforces 3-12
/// ASCII alphanumeric characters. Generated codes come from trusted
/// generators and use [`ShortCode::new_unchecked`]. Comparison is exact and
/// case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(SmolStr);

pub const MIN_LENGTH: usize = 3;
pub const MAX_LENGTH: usize = 12;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    ///
    /// Valid codes match `^[a-zA-Z0-9]{3,12}$`.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ShortCodeError> {
        let code = code.as_ref();
        Self::validate(code)?;
        Ok(Self(SmolStr::new(code)))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code.as_ref()))
    }

    /// Builds the full short URL by appending the code to `prefix` verbatim.
    pub fn to_url(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(code: &str) -> Result<(), ShortCodeError> {
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ShortCodeError::Characters(code.to_string()));
        }

        // all ASCII from here on, so byte length equals char count
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(ShortCodeError::Length {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                actual: code.len(),
            });
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ShortCode {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}
