//! Text helpers for uploaded vocabulary and catalog names.

use unicode_normalization::UnicodeNormalization;

/// Trim and convert to NFC so equal-looking strings compare equal.
///
/// Half-width/full-width forms are left alone; only canonical composition is applied.
pub fn normalize_field(s: &str) -> String {
  s.trim().nfc().collect()
}

/// URL slug for an anime name. Non-ASCII letters (kana, kanji) are kept.
pub fn slugify(text: &str) -> String {
  let lowered = text.trim().to_lowercase();

  let mut slug = String::with_capacity(lowered.len());
  let mut pending_dash = false;
  for c in lowered.chars() {
    if c.is_whitespace() || c == '_' || c == '-' {
      pending_dash = true;
    } else if c.is_alphanumeric() {
      if pending_dash && !slug.is_empty() {
        slug.push('-');
      }
      pending_dash = false;
      slug.push(c);
    }
  }

  if slug.is_empty() {
    "anime".to_string()
  } else {
    slug
  }
}
