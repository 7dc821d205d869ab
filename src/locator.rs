// WHY: greedy leftmost non-overlapping occurrence search
// The scan resumes at the end of each match, so self-overlapping occurrences are never reported

use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{Result, SiftError};

/// Half-open byte interval `[start, end)` into a UTF-8 text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Every non-overlapping occurrence of `pattern` in `text`, sorted ascending
pub fn locate(text: &str, pattern: &str) -> Result<Vec<Interval>> {
    if pattern.is_empty() {
        return Err(SiftError::invalid("search pattern must not be empty"));
    }

    let finder = Finder::new(pattern.as_bytes());
    let haystack = text.as_bytes();
    let mut intervals = Vec::new();
    let mut begin = 0;

    while begin < haystack.len() {
        match finder.find(&haystack[begin..]) {
            Some(offset) => {
                let start = begin + offset;
                let end = start + pattern.len();
                intervals.push(Interval::new(start, end));
                begin = end;
            }
            None => break,
        }
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_positions() {
        let intervals = locate("abcabcab", "ab").unwrap();
        assert_eq!(
            intervals,
            vec![Interval::new(0, 2), Interval::new(3, 5), Interval::new(6, 8)]
        );
    }

    #[test]
    fn test_self_overlap_not_reported() {
        let intervals = locate("aaaa", "aa").unwrap();
        assert_eq!(intervals, vec![Interval::new(0, 2), Interval::new(2, 4)]);

        let intervals = locate("aaa", "aa").unwrap();
        assert_eq!(intervals, vec![Interval::new(0, 2)]);
    }

    #[test]
    fn test_multibyte_slices_match_pattern() {
        let text = "我喜欢算法，算法很有趣";
        let intervals = locate(text, "算法").unwrap();
        assert_eq!(intervals.len(), 2);
        for interval in &intervals {
            assert_eq!(&text[interval.range()], "算法");
        }
        assert!(intervals[0].end <= intervals[1].start);
    }

    #[test]
    fn test_no_match_and_empty_text() {
        assert!(locate("hello", "xyz").unwrap().is_empty());
        assert!(locate("", "a").unwrap().is_empty());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(locate("abc", ""), Err(SiftError::InvalidArgument(_))));
    }
}
