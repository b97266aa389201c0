// crates/regform-core/src/traits.rs
use crate::geo::{City, Country, State};
use crate::text::fold_key;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Comparisons are accent-insensitive and case-insensitive, based on
/// [`fold_key`]. Selection in the form engine never uses this: dropdown values
/// are matched exactly. It backs the loose name resolution of the CLI only.
///
/// # Examples
/// ```rust
/// use regform_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Łódź").is_named("lodz"));
/// assert!(!Place("Zürich").is_named("zuri"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Equality on the folded form.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for State {
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        self.name()
    }
}
