//! Unit-cost Levenshtein distance over arbitrary element sequences.

/// Minimum number of single-element insertions, deletions and substitutions
/// turning `source` into `target`.
pub fn levenshtein<T: PartialEq>(source: &[T], target: &[T]) -> usize {
    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    let mut prev: Vec<usize> = (0..=target.len()).collect();
    let mut curr = vec![0; target.len() + 1];

    for (i, s) in source.iter().enumerate() {
        curr[0] = i + 1;
        for (j, t) in target.iter().enumerate() {
            let cost = usize::from(s != t);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[target.len()]
}

/// Edit distance between whitespace-separated tokens.
pub fn word_levenshtein(source: &str, target: &str) -> usize {
    let source: Vec<&str> = source.split_whitespace().collect();
    let target: Vec<&str> = target.split_whitespace().collect();
    levenshtein(&source, &target)
}

/// Edit distance between the characters of two strings.
pub fn char_levenshtein(source: &str, target: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    levenshtein(&source, &target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(levenshtein(&[1, 2, 3], &[1, 2, 3]), 0);
    }

    #[test]
    fn test_empty_sides() {
        let empty: [u8; 0] = [];
        assert_eq!(levenshtein(&empty, &[1, 2]), 2);
        assert_eq!(levenshtein(&[1, 2, 3], &empty), 3);
        assert_eq!(levenshtein(&empty, &empty), 0);
    }

    #[test]
    fn test_classic_pairs() {
        assert_eq!(char_levenshtein("kitten", "sitting"), 3);
        assert_eq!(char_levenshtein("flaw", "lawn"), 2);
        assert_eq!(char_levenshtein("ab cd", "abcd"), 1);
    }

    #[test]
    fn test_word_level() {
        assert_eq!(word_levenshtein("the cat sat", "the cat sat"), 0);
        assert_eq!(word_levenshtein("the cat", "the dog sat"), 2);
        assert_eq!(word_levenshtein("a  b", "a b"), 0);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(
            char_levenshtein("sunday", "saturday"),
            char_levenshtein("saturday", "sunday")
        );
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        assert_eq!(char_levenshtein("naïve", "naive"), 1);
    }
}
