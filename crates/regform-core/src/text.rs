// crates/regform-core/src/text.rs

/// Convert a string into a folded key suitable for loose comparison.
///
/// Transliterates Unicode to ASCII with `deunicode` (e.g. `Łódź` -> `Lodz`),
/// then lowercases and trims.
///
/// ```rust
/// use regform_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("  Straße "), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// `true` when the value is empty or whitespace only.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
