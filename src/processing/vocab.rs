/*! Vocabulary building

Tokens are obtained by replacing every digit with [DIGIT_PLACEHOLDER], then splitting on single spaces
(empty tokens are discarded). [normalized_tokens] is used both when building and when encoding,
so that lookups can't diverge.

Ids are dense and start at 1:

| id | token |
|----|-------|
| 1  | `*EOS*` |
| 2  | `*UKT*` (only with a [VocabFilter]) |
| .. | corpus tokens |

Without filter, corpus tokens get ids in order of first occurrence.
With a filter, they are ranked by decreasing frequency (ties by first occurrence),
and only the most frequent ones are kept.
!*/
use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

use itertools::Itertools;
use log::{debug, info};
use twox_hash::XxHash64;

use crate::config::VocabFilter;
use crate::sources::SentencePair;

pub type TokenId = u32;

pub const EOS: &str = "*EOS*";
pub const UKT: &str = "*UKT*";
pub const EOS_ID: TokenId = 1;
pub const UKT_ID: TokenId = 2;
pub const DIGIT_PLACEHOLDER: char = '#';

/// Token counts.
pub type Frequencies = HashMap<String, u64, BuildHasherDefault<XxHash64>>;

/// Replace ASCII digits with [DIGIT_PLACEHOLDER].
pub fn normalize_digits(sentence: &str) -> Cow<'_, str> {
    if sentence.bytes().any(|b| b.is_ascii_digit()) {
        Cow::Owned(
            sentence
                .chars()
                .map(|c| if c.is_ascii_digit() { DIGIT_PLACEHOLDER } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(sentence)
    }
}

/// Split on single spaces, discarding empty tokens.
pub fn tokenize(sentence: &str) -> impl Iterator<Item = &str> {
    sentence.split(' ').filter(|token| !token.is_empty())
}

/// Digit-normalized tokens of a sentence.
pub fn normalized_tokens(sentence: &str) -> Vec<String> {
    tokenize(&normalize_digits(sentence))
        .map(String::from)
        .collect()
}

/// Frozen token <-> id mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    // tokens[id - 1]
    tokens: Vec<String>,
    ids: HashMap<String, TokenId>,
    unknown: bool,
}

impl Vocabulary {
    /// Build from tokens sorted by id.
    ///
    /// Sentinels are prepended, and tokens equal to a sentinel are ignored.
    fn with_sentinels<I>(tokens: I, unknown: bool) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let sentinels: &[&str] = if unknown { &[EOS, UKT] } else { &[EOS] };
        let tokens: Vec<String> = sentinels
            .iter()
            .map(|s| s.to_string())
            .chain(tokens.into_iter().filter(|t| !sentinels.contains(&t.as_str())))
            .collect();

        let ids = tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| (token.clone(), idx as TokenId + 1))
            .collect();

        Self {
            tokens,
            ids,
            unknown,
        }
    }

    /// Build a vocabulary directly from pairs.
    pub fn from_pairs<'a, I>(pairs: I, filter: Option<VocabFilter>) -> Self
    where
        I: IntoIterator<Item = &'a SentencePair>,
    {
        let mut builder = VocabularyBuilder::new();
        for pair in pairs {
            builder.add_pair(pair);
        }
        builder.build(filter).vocabulary
    }

    /// Number of entries, sentinels included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A vocabulary always holds at least `*EOS*`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.ids.get(token).copied()
    }

    pub fn token(&self, id: TokenId) -> Option<&str> {
        let idx = usize::try_from(id).ok()?.checked_sub(1)?;
        self.tokens.get(idx).map(String::as_str)
    }

    /// `*UKT*` id, if the vocabulary was filtered.
    pub fn unknown_id(&self) -> Option<TokenId> {
        self.unknown.then_some(UKT_ID)
    }

    /// (id, token) by ascending id.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| (idx as TokenId + 1, token.as_str()))
    }
}

/// Result of [VocabularyBuilder::build].
#[derive(Debug)]
pub struct BuiltVocabulary {
    /// Maximum number of tokens of source and target sentences.
    pub max_lengths: [usize; 2],
    pub vocabulary: Vocabulary,
    pub frequencies: Frequencies,
}

/// Accumulates token statistics over sentence pairs.
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    max_lengths: [usize; 2],
    first_seen: Vec<String>,
    frequencies: Frequencies,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pair(&mut self, pair: &SentencePair) {
        for (column, sentence) in pair.sides().iter().enumerate() {
            self.add_sentence(column, sentence);
        }
    }

    /// Add a sentence of `column` (0 for source, 1 for target).
    fn add_sentence(&mut self, column: usize, sentence: &str) {
        let normalized = normalize_digits(sentence);
        let mut nb_tokens = 0;
        for token in tokenize(&normalized) {
            nb_tokens += 1;
            match self.frequencies.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.frequencies.insert(token.to_string(), 1);
                    self.first_seen.push(token.to_string());
                }
            }
        }
        self.max_lengths[column] = self.max_lengths[column].max(nb_tokens);
    }

    /// Freeze into a [Vocabulary].
    pub fn build(self, filter: Option<VocabFilter>) -> BuiltVocabulary {
        debug!("max sentence lengths: {:?}", self.max_lengths);
        let vocabulary = match filter {
            None => Vocabulary::with_sentinels(self.first_seen, false),
            Some(filter) => {
                let frequencies = &self.frequencies;
                let ranked: Vec<String> = self
                    .first_seen
                    .iter()
                    .filter(|token| token.as_str() != EOS && token.as_str() != UKT)
                    .sorted_by(|a, b| frequencies[b.as_str()].cmp(&frequencies[a.as_str()]))
                    .take_while(|token| frequencies[token.as_str()] >= filter.min_freq)
                    .take(filter.max_vocab_size)
                    .cloned()
                    .collect();
                info!(
                    "kept {} out of {} tokens (min_freq: {}, max_vocab_size: {})",
                    ranked.len(),
                    self.first_seen.len(),
                    filter.min_freq,
                    filter.max_vocab_size
                );
                Vocabulary::with_sentinels(ranked, true)
            }
        };

        BuiltVocabulary {
            max_lengths: self.max_lengths,
            vocabulary,
            frequencies: self.frequencies,
        }
    }
}
