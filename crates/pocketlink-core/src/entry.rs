use crate::error::{ErrorKind, FormError};
use url::Url;

/// Number of entry slots in one submission form.
pub const MAX_BATCH_SIZE: usize = 5;

/// One slot of the entry form, exactly as the user typed it.
///
/// Editing any field clears the error left by the previous submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateEntry {
    original_url: String,
    custom_code: String,
    validity: String,
    error: Option<ErrorKind>,
}

impl CandidateEntry {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.set_custom_code(code);
        self
    }

    pub fn with_validity(mut self, validity: impl Into<String>) -> Self {
        self.set_validity(validity);
        self
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn custom_code(&self) -> &str {
        &self.custom_code
    }

    pub fn validity(&self) -> &str {
        &self.validity
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// The message to display next to this entry, if it was rejected.
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|kind| kind.to_string())
    }

    pub fn set_original_url(&mut self, value: impl Into<String>) {
        self.original_url = value.into();
        self.error = None;
    }

    pub fn set_custom_code(&mut self, value: impl Into<String>) {
        self.custom_code = value.into();
        self.error = None;
    }

    pub fn set_validity(&mut self, value: impl Into<String>) {
        self.validity = value.into();
        self.error = None;
    }

    /// Marks the entry as rejected, leaving its input untouched.
    pub fn reject(&mut self, kind: ErrorKind) {
        self.error = Some(kind);
    }

    /// Resets the slot to blank after its link was accepted.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// A blank entry was never submitted and is skipped without error.
    pub fn is_blank(&self) -> bool {
        trim_field(&self.original_url).is_empty()
    }
}

/// The five-slot entry form submitted as one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenForm {
    slots: [CandidateEntry; MAX_BATCH_SIZE],
}

impl ShortenForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the form from the front; remaining slots stay blank.
    pub fn from_entries<I>(entries: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = CandidateEntry>,
    {
        let entries: Vec<CandidateEntry> = entries.into_iter().collect();
        if entries.len() > MAX_BATCH_SIZE {
            return Err(FormError::TooManyEntries {
                max: MAX_BATCH_SIZE,
                actual: entries.len(),
            });
        }

        let mut form = Self::default();
        for (slot, entry) in form.slots.iter_mut().zip(entries) {
            *slot = entry;
        }
        Ok(form)
    }

    pub fn slot(&self, index: usize) -> Option<&CandidateEntry> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut CandidateEntry> {
        self.slots.get_mut(index)
    }

    pub fn slots(&self) -> &[CandidateEntry] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [CandidateEntry] {
        &mut self.slots
    }

    /// Number of non-blank slots.
    pub fn submitted(&self) -> usize {
        self.slots.iter().filter(|entry| !entry.is_blank()).count()
    }

    pub fn is_blank(&self) -> bool {
        self.submitted() == 0
    }
}

/// Trims whitespace and byte order marks from both ends of a form field.
pub fn trim_field(raw: &str) -> &str {
    raw.trim_matches(is_padding)
}

fn is_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Parses a trimmed original URL, requiring a non-empty host.
pub fn parse_original_url(raw: &str) -> Result<Url, ErrorKind> {
    let url = Url::parse(trim_field(raw)).map_err(|_| ErrorKind::InvalidUrl)?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ErrorKind::InvalidUrl),
    }
}

/// Reads the leading integer of a validity field.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, so `"15min"` reads as 15 and `"2.5"` as 2. Returns `None`
/// when no digit leads the input. Values beyond `i64` saturate.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start_matches(is_padding);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_clears_error() {
        let mut entry = CandidateEntry::new("not a url");
        entry.reject(ErrorKind::InvalidUrl);
        assert_eq!(entry.error_message().as_deref(), Some("Invalid URL"));

        entry.set_original_url("https://example.com");
        assert_eq!(entry.error(), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut entry = CandidateEntry::new("https://example.com")
            .with_custom_code("abc")
            .with_validity("10");
        entry.clear();
        assert_eq!(entry, CandidateEntry::default());
        assert!(entry.is_blank());
    }

    #[test]
    fn whitespace_url_is_blank() {
        assert!(CandidateEntry::new("   ").is_blank());
        assert!(!CandidateEntry::new(" x ").is_blank());
    }

    #[test]
    fn byte_order_mark_counts_as_padding() {
        assert!(CandidateEntry::new("\u{feff}").is_blank());
        assert!(CandidateEntry::new(" \u{feff}\t").is_blank());
        assert_eq!(trim_field("\u{feff} abc123 "), "abc123");
        assert!(parse_original_url("\u{feff}https://example.com").is_ok());
        assert_eq!(parse_leading_integer("\u{feff}12"), Some(12));
    }

    #[test]
    fn form_rejects_more_than_five_entries() {
        let entries = (0..6).map(|i| CandidateEntry::new(format!("https://e{i}.com")));
        assert_eq!(
            ShortenForm::from_entries(entries),
            Err(FormError::TooManyEntries { max: 5, actual: 6 })
        );
    }

    #[test]
    fn form_pads_with_blank_slots() {
        let form = ShortenForm::from_entries([
            CandidateEntry::new("https://a.com"),
            CandidateEntry::new("https://b.com"),
        ])
        .unwrap();
        assert_eq!(form.slots().len(), MAX_BATCH_SIZE);
        assert_eq!(form.submitted(), 2);
        assert!(form.slot(4).unwrap().is_blank());
        assert!(form.slot(5).is_none());
    }

    #[test]
    fn url_requires_host() {
        assert!(parse_original_url("https://example.com").is_ok());
        assert!(parse_original_url("  http://example.com/path?q=1  ").is_ok());
        assert!(parse_original_url("ftp://files.example.com").is_ok());
        assert_eq!(parse_original_url("not a url"), Err(ErrorKind::InvalidUrl));
        assert_eq!(parse_original_url("example.com"), Err(ErrorKind::InvalidUrl));
        assert_eq!(parse_original_url("mailto:a@b.com"), Err(ErrorKind::InvalidUrl));
        assert_eq!(parse_original_url("file:///etc/hosts"), Err(ErrorKind::InvalidUrl));
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(parse_leading_integer("45"), Some(45));
        assert_eq!(parse_leading_integer("  7"), Some(7));
        assert_eq!(parse_leading_integer("-5"), Some(-5));
        assert_eq!(parse_leading_integer("+12"), Some(12));
        assert_eq!(parse_leading_integer("15min"), Some(15));
        assert_eq!(parse_leading_integer("2.5"), Some(2));
        assert_eq!(parse_leading_integer("0"), Some(0));
        assert_eq!(parse_leading_integer(""), None);
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer("-"), None);
        assert_eq!(parse_leading_integer("99999999999999999999999"), Some(i64::MAX));
    }
}
