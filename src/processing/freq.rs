//! Token frequencies of a tokenized text corpus (one sentence per line).
//!
//! Used to shrink the vocabulary of a word2vec training corpus by replacing rare tokens with `*UKT*`.
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

use itertools::Itertools;
use twox_hash::XxHash64;

use crate::processing::vocab::UKT;

#[derive(Debug, Default)]
pub struct TokenCounts {
    counts: HashMap<String, u64, BuildHasherDefault<XxHash64>>,
    nb_lines: usize,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count whitespace-separated tokens of `line`.
    pub fn add_line(&mut self, line: &str) {
        for token in line.split_whitespace() {
            self.counts
                .entry(token.to_string())
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
        self.nb_lines += 1;
    }

    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn nb_lines(&self) -> usize {
        self.nb_lines
    }

    /// (token, count) by ascending count, then token.
    pub fn ascending(&self) -> Vec<(&str, u64)> {
        self.counts
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .sorted_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }

    /// Number of distinct tokens seen at least `min_freq` times.
    pub fn nb_at_least(&self, min_freq: u64) -> usize {
        self.counts.values().filter(|&&c| c >= min_freq).count()
    }

    /// Rewrite `line`, replacing tokens seen less than `min_freq` times with `*UKT*`.
    pub fn filter_line(&self, line: &str, min_freq: u64) -> String {
        line.split_whitespace()
            .map(|token| {
                if self.count(token) < min_freq {
                    UKT
                } else {
                    token
                }
            })
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> TokenCounts {
        let mut counts = TokenCounts::new();
        for line in ["the cat sat", "the dog  sat", "the end"] {
            counts.add_line(line);
        }
        counts
    }

    #[test]
    fn count() {
        let counts = counts();
        assert_eq!(counts.nb_lines(), 3);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.count("the"), 3);
        assert_eq!(counts.count("missing"), 0);
        assert_eq!(counts.nb_at_least(2), 2);
    }

    #[test]
    fn ascending() {
        let counts = counts();
        assert_eq!(
            counts.ascending(),
            vec![("cat", 1), ("dog", 1), ("end", 1), ("sat", 2), ("the", 3)]
        );
    }

    #[test]
    fn filter() {
        let counts = counts();
        assert_eq!(counts.filter_line("the dog sat", 2), "the *UKT* sat");
    }
}
