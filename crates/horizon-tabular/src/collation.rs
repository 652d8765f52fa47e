//! Locale-aware string comparison.
//!
//! Every user-facing ordering in this crate (the sort comparator and the
//! distinct-value lists) compares display strings under the collation rules
//! of a locale, the way the host application's list screens do. The locale
//! is resolved from the system at construction and can be overridden per
//! instance (the host application runs its screens under `fr-FR`).

use std::cmp::Ordering;
use std::fmt;

/// The system locale as a BCP 47 identifier, falling back to `en-US`.
fn system_locale() -> String {
    sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string())
}

/// Locale-aware string comparator backed by the ICU4X collator.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use horizon_tabular::Collation;
///
/// let collation = Collation::with_locale("fr-FR");
/// assert_eq!(collation.compare("École", "Zèbre"), Ordering::Less);
/// // Digits compare lexicographically, not numerically
/// assert_eq!(collation.compare("10", "2"), Ordering::Less);
/// ```
pub struct Collation {
    locale: icu::locale::Locale,
    collator: icu::collator::CollatorBorrowed<'static>,
}

impl Collation {
    /// Create a collation using the system locale.
    pub fn new() -> Self {
        Self::with_locale(&system_locale())
    }

    /// Create a collation for a specific locale.
    ///
    /// # Arguments
    ///
    /// * `locale` - A BCP 47 locale identifier (e.g., "fr-FR", "en-US").
    ///   Unparseable identifiers fall back to `en-US`.
    pub fn with_locale(locale: &str) -> Self {
        use icu::collator::Collator;
        use icu::collator::options::CollatorOptions;
        use icu::locale::Locale;

        let locale: Locale = locale
            .parse()
            .unwrap_or_else(|_| "en-US".parse().unwrap());

        let collator = Collator::try_new(locale.clone().into(), CollatorOptions::default())
            .unwrap_or_else(|_| {
                let default_locale: Locale = "en-US".parse().unwrap();
                Collator::try_new(default_locale.into(), CollatorOptions::default())
                    .expect("default locale should always work")
            });

        Self { locale, collator }
    }

    /// Compare two strings under this locale's collation rules.
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }

    /// Get the locale identifier being used.
    pub fn locale(&self) -> String {
        self.locale.to_string()
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale", &self.locale.to_string())
            .finish_non_exhaustive()
    }
}
