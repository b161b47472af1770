use std::num::NonZeroU32;
use typed_builder::TypedBuilder;

pub const DEFAULT_SHORT_URL_PREFIX: &str = "https://sho.rt/";

pub const DEFAULT_VALIDITY_MINUTES: NonZeroU32 = match NonZeroU32::new(30) {
    Some(minutes) => minutes,
    None => panic!("default validity must be positive"),
};

/// One hundred years.
pub const MAX_VALIDITY_MINUTES: NonZeroU32 = match NonZeroU32::new(100 * 365 * 24 * 60) {
    Some(minutes) => minutes,
    None => panic!("max validity must be positive"),
};

/// Configures a [`LinkRegistry`][crate::LinkRegistry].
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RegistrySettings {
    /// Prepended verbatim to every short code to form the short URL.
    #[builder(default = DEFAULT_SHORT_URL_PREFIX.to_string(), setter(into))]
    pub short_url_prefix: String,
    /// Used when the validity field is blank, non-numeric or not positive.
    #[builder(default = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: NonZeroU32,
    /// Larger validities are clamped to this.
    #[builder(default = MAX_VALIDITY_MINUTES)]
    pub max_validity_minutes: NonZeroU32,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = RegistrySettings::default();
        assert_eq!(settings.short_url_prefix, "https://sho.rt/");
        assert_eq!(settings.default_validity_minutes.get(), 30);
        assert_eq!(settings.max_validity_minutes.get(), 52_560_000);
    }

    #[test]
    fn builder_overrides() {
        let settings = RegistrySettings::builder()
            .short_url_prefix("http://localhost:8080/s/")
            .default_validity_minutes(NonZeroU32::new(5).unwrap())
            .build();
        assert_eq!(settings.short_url_prefix, "http://localhost:8080/s/");
        assert_eq!(settings.default_validity_minutes.get(), 5);
    }
}
