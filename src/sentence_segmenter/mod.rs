// WHY: delimiter-preserving sentence segmentation with dual borrowed/owned API
// Concatenating the segments of a text always reproduces the text exactly

use regex_automata::meta::Regex;
use tracing::debug;

use crate::error::{Result, SiftError};
use crate::locator::Interval;

pub mod normalization;

pub use normalization::{normalize_sentence, normalize_sentence_into};

/// Default terminators: CJK full stop, fullwidth exclamation/question marks, ASCII `.!?`
pub const DEFAULT_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?'];

/// Configuration for sentence boundary detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterRules {
    /// Characters that terminate a sentence; any run of them is a single boundary
    pub terminators: Vec<char>,
}

impl Default for SegmenterRules {
    fn default() -> Self {
        Self {
            terminators: DEFAULT_TERMINATORS.to_vec(),
        }
    }
}

impl SegmenterRules {
    /// Build rules from a string whose characters are the terminators
    pub fn from_chars(terminators: &str) -> Self {
        Self {
            terminators: terminators.chars().collect(),
        }
    }

    /// Character-class pattern matching one or more terminators
    fn pattern(&self) -> String {
        let class: String = self
            .terminators
            .iter()
            .map(|c| format!("\\x{{{:X}}}", *c as u32))
            .collect();
        format!("[{class}]+")
    }
}

/// Borrowed sentence: a slice of the source text plus its byte interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub index: usize,
    pub raw: &'a str,
    pub span: Interval,
}

impl<'a> Sentence<'a> {
    /// Raw content, terminator included
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Whitespace-collapsed copy of the content
    pub fn normalize(&self) -> String {
        normalize_sentence(self.raw)
    }

    /// Normalize content into supplied buffer
    pub fn normalize_into(&self, buffer: &mut String) {
        normalize_sentence_into(self.raw, buffer);
    }
}

/// Splits text into sentences at terminator runs, retaining the terminators
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    rules: SegmenterRules,
    boundary: Regex,
}

impl SentenceSegmenter {
    /// Compile a segmenter for the given rules
    pub fn new(rules: SegmenterRules) -> Result<Self> {
        if rules.terminators.is_empty() {
            return Err(SiftError::invalid("segmenter needs at least one terminator"));
        }
        let pattern = rules.pattern();
        let boundary = Regex::new(&pattern)?;
        debug!(%pattern, "Compiled sentence boundary pattern");
        Ok(Self { rules, boundary })
    }

    /// Segmenter for `。！？.!?`
    pub fn with_default_rules() -> Result<Self> {
        Self::new(SegmenterRules::default())
    }

    pub fn rules(&self) -> &SegmenterRules {
        &self.rules
    }

    /// Segment without allocating per sentence
    pub fn segment_borrowed<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.boundary.find_iter(text) {
            // A leading terminator run has nothing before it and becomes its own sentence
            let end = boundary.end();
            sentences.push(Sentence {
                index: sentences.len(),
                raw: &text[start..end],
                span: Interval::new(start, end),
            });
            start = end;
        }

        if start < text.len() {
            sentences.push(Sentence {
                index: sentences.len(),
                raw: &text[start..],
                span: Interval::new(start, text.len()),
            });
        }

        debug!(sentences = sentences.len(), bytes = text.len(), "Segmented text");
        sentences
    }

    /// Segment into owned strings
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segment_borrowed(text)
            .into_iter()
            .map(|sentence| sentence.raw.to_string())
            .collect()
    }

    /// Segment and normalize each sentence, reusing one buffer
    pub fn segment_normalized(&self, text: &str) -> Vec<String> {
        let mut buffer = String::new();
        self.segment_borrowed(text)
            .into_iter()
            .map(|sentence| {
                sentence.normalize_into(&mut buffer);
                buffer.clone()
            })
            .collect()
    }
}

/// Segment `text` with the default terminator set
pub fn segment(text: &str) -> Result<Vec<String>> {
    Ok(SentenceSegmenter::with_default_rules()?.segment(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> SentenceSegmenter {
        SentenceSegmenter::with_default_rules().unwrap()
    }

    #[test]
    fn test_mixed_script_scenario() {
        let text = "我喜欢算法！I like it.特别是NLP";
        let sentences = segmenter().segment(text);
        assert_eq!(sentences, vec!["我喜欢算法！", "I like it.", "特别是NLP"]);
    }

    #[test]
    fn test_terminator_run_is_one_boundary() {
        let sentences = segmenter().segment("Really?! Yes... ok");
        assert_eq!(sentences, vec!["Really?!", " Yes...", " ok"]);
    }

    #[test]
    fn test_leading_terminator_and_empty_text() {
        assert_eq!(segmenter().segment("!Hi."), vec!["!", "Hi."]);
        assert!(segmenter().segment("").is_empty());
    }

    #[test]
    fn test_concatenation_reconstructs_text() {
        let texts = [
            "Hello world. This is a test. How are you?",
            "。。。开头就是句号",
            "no terminator at all",
            "line one.\nline two!\r\n  line three?",
            "ends with run!!!",
        ];
        for text in texts {
            let joined: String = segmenter().segment(text).concat();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_borrowed_spans_point_into_source() {
        let text = "Un. Deux! Trois";
        let sentences = segmenter().segment_borrowed(text);
        assert_eq!(sentences.len(), 3);
        for (i, sentence) in sentences.iter().enumerate() {
            assert_eq!(sentence.index, i);
            assert_eq!(&text[sentence.span.start..sentence.span.end], sentence.raw());
        }
        assert_eq!(sentences[2].span, Interval::new(9, 15));
    }

    #[test]
    fn test_custom_rules() {
        let segmenter = SentenceSegmenter::new(SegmenterRules::from_chars(";")).unwrap();
        assert_eq!(segmenter.rules().terminators, vec![';']);
        assert_eq!(segmenter.segment("a;b. c;;d"), vec!["a;", "b. c;;", "d"]);
    }

    #[test]
    fn test_empty_rules_rejected() {
        let result = SentenceSegmenter::new(SegmenterRules { terminators: vec![] });
        assert!(matches!(result, Err(SiftError::InvalidArgument(_))));
    }

    #[test]
    fn test_normalized_output() {
        let sentences = segmenter().segment_normalized("First\nline. Second   one.");
        assert_eq!(sentences, vec!["First line.", "Second one."]);
    }
}
