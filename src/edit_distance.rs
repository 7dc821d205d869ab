// WHY: Levenshtein distance over Unicode scalar values with unit costs
// Keeps one previous row of the DP table; row i holds the cost of turning a[..i] into b[..j]

/// Minimum number of single-character insertions, deletions and substitutions turning `a` into `b`
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }

    // table[0][j] = j: pure insertion
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ch_a) in a.iter().enumerate() {
        // table[i][0] = i: pure deletion
        current[0] = i + 1;
        for (j, ch_b) in b.iter().enumerate() {
            current[j + 1] = if ch_a == ch_b {
                previous[j]
            } else {
                let delete = previous[j + 1];
                let insert = current[j];
                let substitute = previous[j];
                1 + delete.min(insert).min(substitute)
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance("ramble", "rab"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_empty_operands() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abcd", ""), 4);
    }

    #[test]
    fn test_identity_symmetry_and_bound() {
        let words = ["算法", "算术", "algorithm", "altruism", "a", ""];
        for a in words {
            assert_eq!(edit_distance(a, a), 0);
            for b in words {
                let d = edit_distance(a, b);
                assert_eq!(d, edit_distance(b, a));
                assert!(d <= a.chars().count().max(b.chars().count()));
                assert_eq!(d == 0, a == b);
            }
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(edit_distance("我喜欢", "你喜欢"), 1);
        assert_eq!(edit_distance("", "算法"), 2);
    }
}
