//! Ordering record collections by a named field.
//!
//! Comparison is always lexicographic on the field's *display string*, under
//! the locale rules of a [`Collation`], regardless of the underlying value
//! type. Numeric fields therefore sort as their string representation ("10"
//! before "2"). This mirrors the host application's behavior exactly; do not
//! change it to numeric comparison, downstream screens depend on the
//! existing order.
//!
//! Records with a missing or falsy sort field (see [`Value::is_falsy`])
//! never reach the collator: they sort after every real value ascending and
//! before every real value descending, comparing equal to each other. The
//! sort is stable, so equal records keep their relative order.
//!
//! [`Value::is_falsy`]: crate::Value::is_falsy

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collation::Collation;
use crate::record::Record;

/// Sort direction.
///
/// Serializes as the `"asc"` / `"desc"` tokens the host's query-string
/// plumbing uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest first; missing values last.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first; missing values first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// The "asc" / "desc" token for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Parse an "asc" / "desc" token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

/// The string a record contributes to the comparison, or `None` when the
/// field is absent or falsy (the missing placement applies).
fn sort_key(record: &Record, key: &str) -> Option<String> {
    let value = record.get_or_null(key);
    if value.is_falsy() {
        None
    } else {
        Some(value.to_string())
    }
}

fn compare_keys(
    a: Option<&str>,
    b: Option<&str>,
    order: SortOrder,
    collation: &Collation,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match order {
            SortOrder::Ascending => Ordering::Greater,
            SortOrder::Descending => Ordering::Less,
        },
        (Some(_), None) => match order {
            SortOrder::Ascending => Ordering::Less,
            SortOrder::Descending => Ordering::Greater,
        },
        (Some(a), Some(b)) => {
            let ordering = collation.compare(a, b);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        }
    }
}

/// Stable in-place sort of an owned collection.
///
/// Display strings are computed once per record, not once per comparison.
pub(crate) fn sort_in_place(
    records: &mut Vec<Record>,
    key: &str,
    order: SortOrder,
    collation: &Collation,
) {
    let mut keyed: Vec<(Option<String>, Record)> = std::mem::take(records)
        .into_iter()
        .map(|record| (sort_key(&record, key), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_deref(), b.as_deref(), order, collation));

    records.extend(keyed.into_iter().map(|(_, record)| record));
}

/// Returns a new collection ordered by the field `key`.
///
/// The input is not mutated. Never fails: absent fields are treated as
/// missing values.
///
/// # Example
///
/// ```
/// use horizon_tabular::{sorted, Collation, Record, SortOrder};
///
/// let records = vec![
///     Record::new().with("theme", "École"),
///     Record::new().with("theme", "Avenir"),
///     Record::new().with("theme", "Zèbre"),
/// ];
/// let collation = Collation::with_locale("fr-FR");
///
/// let by_theme = sorted(&records, "theme", SortOrder::Ascending, &collation);
/// let order: Vec<_> = by_theme
///     .iter()
///     .map(|r| r.get_or_null("theme").to_string())
///     .collect();
/// assert_eq!(order, vec!["Avenir", "École", "Zèbre"]);
/// ```
pub fn sorted(
    records: &[Record],
    key: &str,
    order: SortOrder,
    collation: &Collation,
) -> Vec<Record> {
    let mut out = records.to_vec();
    sort_in_place(&mut out, key, order, collation);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn collation() -> Collation {
        Collation::with_locale("fr-FR")
    }

    fn themed(values: &[&str]) -> Vec<Record> {
        values
            .iter()
            .map(|v| Record::new().with("theme", *v))
            .collect()
    }

    fn themes_of(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get_or_null("theme").to_string())
            .collect()
    }

    #[test]
    fn test_ascending_locale_order() {
        let records = themed(&["Zèbre", "École", "Avenir"]);
        let out = sorted(&records, "theme", SortOrder::Ascending, &collation());
        assert_eq!(themes_of(&out), vec!["Avenir", "École", "Zèbre"]);
        // Input untouched
        assert_eq!(themes_of(&records), vec!["Zèbre", "École", "Avenir"]);
    }

    #[test]
    fn test_numeric_fields_sort_lexicographically() {
        let records: Vec<Record> = [10, 2, 1]
            .iter()
            .map(|n| Record::new().with("duree", *n))
            .collect();
        let out = sorted(&records, "duree", SortOrder::Ascending, &collation());
        let durations: Vec<Option<i64>> = out
            .iter()
            .map(|r| r.get_or_null("duree").as_int())
            .collect();
        // "1" < "10" < "2" as strings
        assert_eq!(durations, vec![Some(1), Some(10), Some(2)]);
    }

    #[test]
    fn test_missing_values_last_ascending_first_descending() {
        let records = vec![
            Record::new().with("theme", "B"),
            Record::new().with("theme", Value::Null),
            Record::new().with("theme", "A"),
            Record::new(), // field absent entirely
        ];

        let asc = sorted(&records, "theme", SortOrder::Ascending, &collation());
        assert_eq!(themes_of(&asc), vec!["A", "B", "", ""]);

        let desc = sorted(&records, "theme", SortOrder::Descending, &collation());
        assert_eq!(themes_of(&desc), vec!["", "", "B", "A"]);
    }

    #[test]
    fn test_falsy_values_take_missing_placement() {
        let records = vec![
            Record::new().with("note", 0),
            Record::new().with("note", "présent"),
            Record::new().with("note", false),
            Record::new().with("note", ""),
        ];
        let asc = sorted(&records, "note", SortOrder::Ascending, &collation());
        assert_eq!(asc[0].get_or_null("note"), &Value::from("présent"));
        // The three falsy records compare equal; stable sort keeps 0, false, ""
        assert_eq!(asc[1].get_or_null("note"), &Value::from(0));
        assert_eq!(asc[2].get_or_null("note"), &Value::from(false));
        assert_eq!(asc[3].get_or_null("note"), &Value::from(""));
    }

    #[test]
    fn test_descending_reverses_non_missing_subset() {
        let records = themed(&["Gestion", "Avenir", "Sécurité", "Budget"]);
        let asc = sorted(&records, "theme", SortOrder::Ascending, &collation());
        let desc = sorted(&records, "theme", SortOrder::Descending, &collation());

        let mut reversed = themes_of(&asc);
        reversed.reverse();
        assert_eq!(reversed, themes_of(&desc));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = themed(&["C", "A", "B"]);
        let once = sorted(&records, "theme", SortOrder::Ascending, &collation());
        let twice = sorted(&once, "theme", SortOrder::Ascending, &collation());
        assert_eq!(themes_of(&once), themes_of(&twice));
    }

    #[test]
    fn test_empty_collection() {
        let out = sorted(&[], "theme", SortOrder::Ascending, &collation());
        assert!(out.is_empty());
    }

    #[test]
    fn test_order_tokens() {
        assert_eq!(SortOrder::Ascending.as_str(), "asc");
        assert_eq!(SortOrder::Descending.as_str(), "desc");
        assert_eq!(SortOrder::from_token("asc"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::from_token("desc"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::from_token("sideways"), None);
        assert_eq!(SortOrder::Ascending.reversed(), SortOrder::Descending);
    }
}
