//! Query engine
//!
//! Turns the full record set plus the current filter state into the ordered
//! list of records to display. Everything here is pure: inputs are never
//! mutated and the same inputs always give the same output.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::UnknownValue;
use crate::models::Official;
use crate::normalize::normalize;

/// Sentinel category that matches every record
pub const ALL_CATEGORIES: &str = "all";

/// Alternate spelling of the sentinel accepted from user input
const ALL_CATEGORIES_ALIAS: &str = "todas";

/// Quick-filter categories offered regardless of the loaded data
pub const FEATURED_CATEGORIES: &[&str] = &[
    ALL_CATEGORIES,
    "Autoridades Ediles",
    "Alta Dirección",
    "Gerencias y Subgerencias",
    "IAL-DIS 2024",
];

/// Ordering applied to the visible records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending `orden`, missing ranks last
    #[default]
    Priority,
    /// Ascending by name
    Name,
    /// Ascending by position
    Position,
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "priority" | "orden" => Ok(SortKey::Priority),
            "name" | "nombre" => Ok(SortKey::Name),
            "position" | "cargo" => Ok(SortKey::Position),
            _ => Err(UnknownValue {
                kind: "sort key",
                value: s.to_string(),
                expected: "priority, name, position",
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Priority => "priority",
            SortKey::Name => "name",
            SortKey::Position => "position",
        };
        write!(f, "{}", name)
    }
}

/// Category restriction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction
    #[default]
    All,
    /// Only records whose `categoria` equals this value exactly
    Only(String),
}

impl CategoryFilter {
    /// Whether a record passes the category restriction
    pub fn matches(&self, official: &Official) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => official.category() == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s == ALL_CATEGORIES || s == ALL_CATEGORIES_ALIAS {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        CategoryFilter::from(s.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Current filter and sort state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Free-text search
    pub query: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

/// Produce the filtered, ordered view of `records`
///
/// A record is kept when it passes the category restriction and the
/// normalized search text occurs in its normalized
/// `name position department email phone` haystack. The sort is stable.
pub fn query<'a>(records: &'a [Official], filter: &Filter) -> Vec<&'a Official> {
    let needle = normalize(&filter.query);

    let mut visible: Vec<&Official> = records
        .iter()
        .filter(|official| filter.category.matches(official))
        .filter(|official| needle.is_empty() || haystack(official).contains(&needle))
        .collect();

    match filter.sort {
        SortKey::Priority => visible.sort_by_key(|official| official.priority()),
        SortKey::Name => visible.sort_by(|a, b| collate(a.name(), b.name())),
        SortKey::Position => visible.sort_by(|a, b| collate(a.position(), b.position())),
    }

    visible
}

/// Normalized text searched by the free-text filter
fn haystack(official: &Official) -> String {
    normalize(&format!(
        "{} {} {} {} {}",
        official.name(),
        official.position(),
        official.department(),
        official.email(),
        official.phone()
    ))
}

/// All categories for the filter UI
///
/// The sentinel first, then every distinct non-empty `categoria` in the
/// order it is first seen.
pub fn categories(records: &[Official]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for category in records.iter().map(Official::category) {
        if !category.is_empty() && seen.insert(category) {
            out.push(category.to_string());
        }
    }
    out
}

/// Display label for a category: first character upper-cased
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Locale-style string comparison
///
/// Letters compare ignoring case and accents first, with `ñ` as a letter of
/// its own between `n` and `o`; accents then break ties (unaccented first),
/// then case (lower-case first), then code points, which makes the order
/// total.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_weights(a)
        .cmp(&primary_weights(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            let case_a = a.chars().map(char::is_uppercase);
            let case_b = b.chars().map(char::is_uppercase);
            case_a.cmp(case_b)
        })
        .then_with(|| a.cmp(b))
}

/// Base-letter weights of `s`: accents and case dropped, except the tilde
/// on `n`, which sorts right after `n`
fn primary_weights(s: &str) -> Vec<u32> {
    let lower = s.to_lowercase();
    let mut chars = lower.nfd().peekable();
    let mut weights = Vec::with_capacity(lower.len());
    while let Some(c) = chars.next() {
        if is_combining_mark(c) {
            continue;
        }
        let mut weight = u32::from(c) * 2;
        if c == 'n' && chars.peek() == Some(&COMBINING_TILDE) {
            weight += 1;
        }
        weights.push(weight);
    }
    weights
}

const COMBINING_TILDE: char = '\u{0303}';

#[cfg(test)]
mod tests {
    use super::*;

    fn official(id: &str, name: &str, category: &str, rank: Option<i64>) -> Official {
        Official {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            rank,
            ..Official::default()
        }
    }

    fn sample() -> Vec<Official> {
        vec![
            official("1", "Ana Ruiz", "X", Some(2)),
            official("2", "Beto Paz", "Y", Some(1)),
        ]
    }

    fn ids(records: &[&Official]) -> Vec<String> {
        records.iter().map(|o| o.identity_key()).collect()
    }

    #[test]
    fn test_category_and_priority() {
        let records = sample();
        let filter = Filter {
            category: CategoryFilter::from("Y"),
            ..Filter::default()
        };
        assert_eq!(ids(&query(&records, &filter)), vec!["2"]);
    }

    #[test]
    fn test_search_and_name_sort() {
        let records = sample();
        let filter = Filter {
            query: "ana".to_string(),
            sort: SortKey::Name,
            ..Filter::default()
        };
        assert_eq!(ids(&query(&records, &filter)), vec!["1"]);
    }

    #[test]
    fn test_all_category_keeps_everything() {
        let records = sample();
        let all = query(&records, &Filter::default());
        assert_eq!(all.len(), records.len());
        // Default priority sort
        assert_eq!(ids(&all), vec!["2", "1"]);
    }

    #[test]
    fn test_category_match_is_exact() {
        let records = vec![official("1", "Ana", "Alta Dirección", None)];
        let filter = Filter {
            category: CategoryFilter::from("alta dirección"),
            ..Filter::default()
        };
        assert!(query(&records, &filter).is_empty());
    }

    #[test]
    fn test_search_ignores_case_and_accents() {
        let records = vec![
            official("1", "José Rodríguez", "X", None),
            official("2", "Maria Lopez", "X", None),
        ];
        for q in ["jose", "JOSÉ", "rodriguez", "sé rod"] {
            let filter = Filter {
                query: q.to_string(),
                ..Filter::default()
            };
            assert_eq!(ids(&query(&records, &filter)), vec!["1"], "query {:?}", q);
        }

        // Accented query matches unaccented data too
        let filter = Filter {
            query: "maría".to_string(),
            ..Filter::default()
        };
        assert_eq!(ids(&query(&records, &filter)), vec!["2"]);
    }

    #[test]
    fn test_search_covers_all_haystack_fields() {
        let record = Official {
            id: Some("1".to_string()),
            name: Some("Ana".to_string()),
            position: Some("Gerente Municipal".to_string()),
            department: Some("GDSySM".to_string()),
            email: Some("gerencia@munismf.gob.pe".to_string()),
            phone: Some("073-000010".to_string()),
            location: Some("Palacio Municipal".to_string()),
            ..Official::default()
        };
        let records = vec![record];
        for q in ["gerente", "gdsysm", "@munismf", "073-0000"] {
            let filter = Filter {
                query: q.to_string(),
                ..Filter::default()
            };
            assert_eq!(query(&records, &filter).len(), 1, "query {:?}", q);
        }

        // Location is not searched
        let filter = Filter {
            query: "palacio".to_string(),
            ..Filter::default()
        };
        assert!(query(&records, &filter).is_empty());
    }

    #[test]
    fn test_search_spans_field_boundary() {
        let mut record = official("1", "Ana", "X", None);
        record.position = Some("Alcaldesa".to_string());
        let records = vec![record];
        let filter = Filter {
            query: "ana alcal".to_string(),
            ..Filter::default()
        };
        assert_eq!(query(&records, &filter).len(), 1);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let records = vec![
            official("a", "A", "X", None),
            official("b", "B", "X", Some(5)),
            official("c", "C", "X", None),
            official("d", "D", "X", Some(5)),
            official("e", "E", "X", Some(1)),
        ];
        let visible = query(&records, &Filter::default());
        assert_eq!(ids(&visible), vec!["e", "b", "d", "a", "c"]);
    }

    #[test]
    fn test_explicit_999_ties_with_missing_rank() {
        let records = vec![
            official("a", "A", "X", None),
            official("b", "B", "X", Some(999)),
        ];
        assert_eq!(ids(&query(&records, &Filter::default())), vec!["a", "b"]);
    }

    #[test]
    fn test_name_sort_independent_of_input_order() {
        let mut records = vec![
            official("1", "Óscar", "X", None),
            official("2", "beto", "X", None),
            official("3", "Ana", "X", None),
            official("4", "Álvaro", "X", None),
            official("5", "Zoe", "X", None),
            official("6", "Beto", "X", None),
        ];
        let filter = Filter {
            sort: SortKey::Name,
            ..Filter::default()
        };
        let forward = ids(&query(&records, &filter));
        records.reverse();
        let backward = ids(&query(&records, &filter));

        assert_eq!(forward, backward);
        assert_eq!(forward, vec!["4", "3", "2", "6", "1", "5"]);
    }

    #[test]
    fn test_position_sort() {
        let mut a = official("1", "A", "X", None);
        a.position = Some("Subgerente".to_string());
        let mut b = official("2", "B", "X", None);
        b.position = Some("Alcalde".to_string());
        let c = official("3", "C", "X", None);
        let records = vec![a, b, c];
        let filter = Filter {
            sort: SortKey::Position,
            ..Filter::default()
        };
        // Missing position sorts as empty string
        assert_eq!(ids(&query(&records, &filter)), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_query_does_not_mutate_input() {
        let records = sample();
        let before = records.clone();
        let filter = Filter {
            sort: SortKey::Name,
            ..Filter::default()
        };
        let _ = query(&records, &filter);
        assert_eq!(records, before);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let records = vec![
            official("1", "A", "Alta Dirección", None),
            official("2", "B", "", None),
            official("3", "C", "Autoridades Ediles", None),
            official("4", "D", "Alta Dirección", None),
            Official::new("5", "E"),
        ];
        assert_eq!(
            categories(&records),
            vec!["all", "Alta Dirección", "Autoridades Ediles"]
        );
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from("todas"), CategoryFilter::All);
        assert_eq!(
            "IAL-DIS 2024".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("IAL-DIS 2024".to_string())
        );
        assert_eq!(CategoryFilter::All.to_string(), "all");
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("priority".parse::<SortKey>().unwrap(), SortKey::Priority);
        assert_eq!("Nombre".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!("cargo".parse::<SortKey>().unwrap(), SortKey::Position);
        assert!("salary".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::Priority);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("all"), "All");
        assert_eq!(category_label("alta Dirección"), "Alta Dirección");
        assert_eq!(category_label("ñandú"), "Ñandú");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("a", "B"), Ordering::Less);
        assert_eq!(collate("é", "f"), Ordering::Less);
        assert_eq!(collate("e", "é"), Ordering::Less);
        assert_eq!(collate("beto", "Beto"), Ordering::Less);
        assert_eq!(collate("Ana", "Ana"), Ordering::Equal);
    }

    #[test]
    fn test_collate_enye_is_its_own_letter() {
        assert_eq!(collate("Núñez", "Nuñez"), Ordering::Greater);
        assert_eq!(collate("Nuñez", "Nuzco"), Ordering::Less);
        assert_eq!(collate("Ñandú", "Nuñez"), Ordering::Greater);
        assert_eq!(collate("Ñandú", "Oscar"), Ordering::Less);
        assert_eq!(collate("ñandú", "Ñandú"), Ordering::Less);

        let mut names = vec!["Oscar", "Ñandú", "Nora", "Nuria"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["Nora", "Nuria", "Ñandú", "Oscar"]);
    }

    #[test]
    fn test_featured_categories_start_with_sentinel() {
        assert_eq!(FEATURED_CATEGORIES[0], ALL_CATEGORIES);
        assert_eq!(FEATURED_CATEGORIES.len(), 5);
    }
}
