// WHY: reassemble labeled sentences into articles by adjacency of equal labels
// Two runs with the same label separated by another label stay separate articles

use serde::{Deserialize, Serialize};

/// A sentence tagged with an opaque grouping label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSentence<L> {
    pub sentence: String,
    pub label: L,
}

impl<L> LabeledSentence<L> {
    pub fn new(sentence: impl Into<String>, label: L) -> Self {
        Self {
            sentence: sentence.into(),
            label,
        }
    }
}

/// Merge each maximal run of consecutive equal labels into one newline-joined article
pub fn assemble<S, L>(labeled: &[(S, L)]) -> Vec<String>
where
    S: AsRef<str>,
    L: PartialEq,
{
    assemble_iter(labeled.iter().map(|(sentence, label)| (sentence.as_ref(), label)))
}

/// `assemble` over `LabeledSentence` values
pub fn assemble_labeled<L: PartialEq>(labeled: &[LabeledSentence<L>]) -> Vec<String> {
    assemble_iter(labeled.iter().map(|item| (item.sentence.as_str(), &item.label)))
}

fn assemble_iter<'a, L, I>(items: I) -> Vec<String>
where
    L: PartialEq + 'a,
    I: Iterator<Item = (&'a str, &'a L)>,
{
    let mut articles = Vec::new();
    let mut current_label: Option<&L> = None;
    let mut block: Vec<&str> = Vec::new();

    for (sentence, label) in items {
        if current_label != Some(label) {
            if !block.is_empty() {
                articles.push(block.join("\n"));
                block.clear();
            }
            current_label = Some(label);
        }
        block.push(sentence);
    }

    if !block.is_empty() {
        articles.push(block.join("\n"));
    }

    articles
}
