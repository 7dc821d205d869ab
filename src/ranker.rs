// WHY: frequency counting with a stable ranking; equal counts keep first-seen order

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::warn;

/// Items to count: a flat sequence, or one level of nesting that is flattened before counting
#[derive(Debug, Clone, PartialEq)]
pub enum RankInput<T> {
    Flat(Vec<T>),
    Nested(Vec<Vec<T>>),
}

impl<T> RankInput<T> {
    fn into_flat(self) -> Vec<T> {
        match self {
            RankInput::Flat(items) => items,
            RankInput::Nested(groups) => groups.into_iter().flatten().collect(),
        }
    }
}

impl<T> From<Vec<T>> for RankInput<T> {
    fn from(items: Vec<T>) -> Self {
        RankInput::Flat(items)
    }
}

/// Count each distinct item and sort by count (descending unless `descending` is false)
pub fn rank<T: Eq + Hash + Clone>(input: RankInput<T>, descending: bool) -> Vec<(T, usize)> {
    let mut positions: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in input.into_flat() {
        match positions.get(&item) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in insertion order in both directions
    if descending {
        counts.sort_by(|a, b| b.1.cmp(&a.1));
    } else {
        counts.sort_by(|a, b| a.1.cmp(&b.1));
    }
    counts
}

/// A JSON scalar counted by value and type, so `1` and `"1"` are distinct keys
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonScalar(Value);

impl JsonScalar {
    pub fn value(&self) -> &Value {
        &self.0
    }
}

// serde_json never holds NaN, so Value equality is total
impl Eq for JsonScalar {}

impl Hash for JsonScalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_string().hash(state);
    }
}

/// Rank a JSON array of scalars, or an array of arrays of scalars.
///
/// Anything else is reported and ranks to an empty list.
pub fn rank_json(value: &Value, descending: bool) -> Vec<(JsonScalar, usize)> {
    match classify_json(value) {
        Some(input) => rank(input, descending),
        None => {
            warn!("rank input must be an array of scalars or an array of arrays of scalars");
            Vec::new()
        }
    }
}

fn classify_json(value: &Value) -> Option<RankInput<JsonScalar>> {
    let items = value.as_array()?;
    if !items.is_empty() && items.iter().all(Value::is_array) {
        let groups = items
            .iter()
            .map(|group| group.as_array()?.iter().map(scalar_key).collect::<Option<Vec<_>>>())
            .collect::<Option<Vec<_>>>()?;
        return Some(RankInput::Nested(groups));
    }
    items
        .iter()
        .map(scalar_key)
        .collect::<Option<Vec<_>>>()
        .map(RankInput::Flat)
}

fn scalar_key(value: &Value) -> Option<JsonScalar> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        scalar => Some(JsonScalar(scalar.clone())),
    }
}
