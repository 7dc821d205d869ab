// WHY: order-sensitive list primitives: deduplication, fixed-size packing, empty-element trimming

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::config::ValuePolicy;
use crate::error::{Result, SiftError};

/// Default pack size used by `chunk` callers that do not choose one
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Whether an element counts as "empty" for trimming
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

/// Falsy JSON values: null, false, zero, empty string, empty array, empty object
impl Blank for serde_json::Value {
    fn is_blank(&self) -> bool {
        use serde_json::Value;
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }
}

/// Which empty elements `trim` removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrimCategory {
    /// Every empty element, wherever it is
    All,
    /// Leading and trailing empty runs
    #[default]
    Both,
    /// Leading empty run only
    Left,
    /// Trailing empty run only
    Right,
}

impl TrimCategory {
    pub const NAMES: &[&str] = &["All", "Both", "Left", "Right"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "All" => Some(TrimCategory::All),
            "Both" => Some(TrimCategory::Both),
            "Left" => Some(TrimCategory::Left),
            "Right" => Some(TrimCategory::Right),
            _ => None,
        }
    }

    /// Parse a category name. `Ok(None)` is the lenient fallback for unknown names
    pub fn resolve(name: &str, policy: ValuePolicy) -> Result<Option<Self>> {
        match Self::from_name(name) {
            Some(category) => Ok(Some(category)),
            None => policy.reject_or("trim category", name, Self::NAMES, None),
        }
    }
}

impl fmt::Display for TrimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrimCategory::All => "All",
            TrimCategory::Both => "Both",
            TrimCategory::Left => "Left",
            TrimCategory::Right => "Right",
        };
        f.write_str(name)
    }
}

/// Remove duplicates. With `preserve_order` the first occurrence of each element keeps its
/// position; otherwise the order of the result is unspecified.
pub fn dedupe<T: Eq + Hash + Clone>(items: &[T], preserve_order: bool) -> Vec<T> {
    if !preserve_order {
        return items.iter().cloned().collect::<HashSet<T>>().into_iter().collect();
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut result = Vec::new();
    for item in items {
        if seen.insert(item) {
            result.push(item.clone());
        }
    }
    result
}

/// Split `items` into consecutive packs of `size`; the last pack may be shorter
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(SiftError::invalid("chunk size must be positive"));
    }
    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Remove empty elements according to `category`
pub fn trim<T: Blank + Clone>(items: &[T], category: TrimCategory) -> Vec<T> {
    let bounds = non_blank_bounds(items);
    match (category, bounds) {
        (TrimCategory::All, _) => items.iter().filter(|item| !item.is_blank()).cloned().collect(),
        // All-empty input trims to nothing for every boundary category
        (_, None) => Vec::new(),
        (TrimCategory::Both, Some((first, last))) => items[first..=last].to_vec(),
        (TrimCategory::Left, Some((first, _))) => items[first..].to_vec(),
        (TrimCategory::Right, Some((_, last))) => items[..=last].to_vec(),
    }
}

/// Positions of the first and last non-empty elements
fn non_blank_bounds<T: Blank>(items: &[T]) -> Option<(usize, usize)> {
    let first = items.iter().position(|item| !item.is_blank())?;
    let last = items.iter().rposition(|item| !item.is_blank())?;
    Some((first, last))
}

/// Trim with a category given by name; unknown names yield an empty result under the lenient policy
pub fn trim_by_name<T: Blank + Clone>(items: &[T], category: &str, policy: ValuePolicy) -> Result<Vec<T>> {
    Ok(match TrimCategory::resolve(category, policy)? {
        Some(category) => trim(items, category),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ordered_dedupe_keeps_first_occurrence() {
        let items = ["b", "a", "b", "c", "a"];
        assert_eq!(dedupe(&items, true), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unordered_dedupe_has_same_elements() {
        let items = [3, 1, 3, 2, 1];
        let mut result = dedupe(&items, false);
        result.sort();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_chunk_reconstructs_input() {
        let items: Vec<u32> = (0..11).collect();
        let packs = chunk(&items, 4).unwrap();
        assert_eq!(packs.len(), 3);
        assert!(packs[..2].iter().all(|p| p.len() == 4));
        assert_eq!(packs[2], vec![8, 9, 10]);
        assert_eq!(packs.concat(), items);
    }

    #[test]
    fn test_chunk_edge_cases() {
        let empty: Vec<u8> = Vec::new();
        assert!(chunk(&empty, 3).unwrap().is_empty());
        assert_eq!(chunk(&[1, 2], 5).unwrap(), vec![vec![1, 2]]);
        assert!(matches!(chunk(&[1], 0), Err(SiftError::InvalidArgument(_))));
    }

    #[test]
    fn test_trim_categories_on_json_values() {
        let items = vec![
            json!(""), json!(""), json!([]), json!("today"), json!([]),
            json!("is"), json!(""), json!([]), json!("Monday"), json!(""), json!([]),
        ];
        assert_eq!(trim(&items, TrimCategory::All), vec![json!("today"), json!("is"), json!("Monday")]);
        assert_eq!(trim(&items, TrimCategory::Both), items[3..9].to_vec());
        assert_eq!(trim(&items, TrimCategory::Left), items[3..].to_vec());
        assert_eq!(trim(&items, TrimCategory::Right), items[..9].to_vec());
    }

    #[test]
    fn test_trim_empty_and_all_blank() {
        let empty: Vec<String> = Vec::new();
        assert!(trim(&empty, TrimCategory::Both).is_empty());
        assert!(trim(&["", ""], TrimCategory::Left).is_empty());
        assert!(trim(&["", ""], TrimCategory::Right).is_empty());
    }

    #[test]
    fn test_trim_keeps_interior_blanks() {
        let items = ["", "a", "", "b", ""];
        assert_eq!(trim(&items, TrimCategory::Both), vec!["a", "", "b"]);
    }

    #[test]
    fn test_trim_by_unknown_name() {
        let items = ["", "a"];
        assert!(trim_by_name(&items, "Middle", ValuePolicy::Lenient).unwrap().is_empty());
        let err = trim_by_name(&items, "Middle", ValuePolicy::Strict).unwrap_err();
        assert!(err.to_string().ends_with("expected one of [\"All\", \"Both\", \"Left\", \"Right\"]"));
        assert_eq!(trim_by_name(&items, "Left", ValuePolicy::Strict).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_falsy_json_values() {
        assert!(json!(0).is_blank());
        assert!(json!(false).is_blank());
        assert!(json!({}).is_blank());
        assert!(!json!(0.5).is_blank());
        assert!(!json!("x").is_blank());
    }
}
