/*! Sentence encoding and length bucketing

Each side of a pair is encoded into token ids followed by `*EOS*`.
Targets are then right-padded with `*EOS*` up to a width shared by the whole corpus,
and their unpadded length is kept aside.

Pairs are grouped into [LengthBucket]s by source length, so that sources never need padding.
!*/
use std::collections::BTreeMap;

use itertools::Itertools;
use log::{debug, info};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::error::Error;
use crate::processing::vocab::{normalize_digits, tokenize, TokenId, Vocabulary, EOS_ID};
use crate::sources::SentencePair;

/// An encoded sentence pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPair {
    pub source: Vec<TokenId>,
    /// Padded target.
    pub target: Vec<TokenId>,
    /// Target length before padding, `*EOS*` included.
    pub target_len: usize,
}

/// Maps sentences to ids using a frozen [Vocabulary].
pub struct SentenceEncoder<'a> {
    vocabulary: &'a Vocabulary,
    target_width: usize,
    max_len: Option<usize>,
}

impl<'a> SentenceEncoder<'a> {
    /// `max_target_tokens` is the largest number of tokens of a target sentence in the corpus.
    ///
    /// Targets are padded to `min(max_target_tokens, max_len) + 1`.
    pub fn new(
        vocabulary: &'a Vocabulary,
        max_target_tokens: usize,
        max_len: Option<usize>,
    ) -> Self {
        let target_width = match max_len {
            Some(max_len) => max_target_tokens.min(max_len) + 1,
            None => max_target_tokens + 1,
        };
        Self {
            vocabulary,
            target_width,
            max_len,
        }
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    /// Encode a sentence, appending `*EOS*`.
    ///
    /// Unknown tokens are replaced by `*UKT*`, or fail with [Error::UnknownToken]
    /// when the vocabulary has no such sentinel.
    pub fn encode_sentence(&self, sentence: &str) -> Result<Vec<TokenId>, Error> {
        let normalized = normalize_digits(sentence);
        let mut ids = tokenize(&normalized)
            .map(|token| {
                self.vocabulary
                    .get(token)
                    .or_else(|| self.vocabulary.unknown_id())
                    .ok_or_else(|| Error::UnknownToken(token.to_string()))
            })
            .collect::<Result<Vec<TokenId>, Error>>()?;
        ids.push(EOS_ID);
        Ok(ids)
    }

    /// Encode a pair, returning `None` if either side is longer than `max_len`.
    pub fn encode_pair(&self, pair: &SentencePair) -> Result<Option<EncodedPair>, Error> {
        let source = self.encode_sentence(pair.source())?;
        let mut target = self.encode_sentence(pair.target())?;

        if let Some(max_len) = self.max_len {
            if source.len() > max_len || target.len() > max_len {
                return Ok(None);
            }
        }

        let target_len = target.len();
        if target_len > self.target_width {
            return Err(Error::Custom(format!(
                "target of length {} does not fit in width {}",
                target_len, self.target_width
            )));
        }
        target.resize(self.target_width, EOS_ID);

        Ok(Some(EncodedPair {
            source,
            target,
            target_len,
        }))
    }

    /// Encode every pair, keeping corpus order and dropping pairs that are too long.
    pub fn encode_all(&self, pairs: &[SentencePair]) -> Result<EncodedCorpus, Error> {
        let encoded: Vec<Option<EncodedPair>> = pairs
            .par_iter()
            .map(|pair| self.encode_pair(pair))
            .collect::<Result<_, Error>>()?;

        let kept: Vec<EncodedPair> = encoded.into_iter().flatten().collect();
        info!(
            "encoded {} pairs ({} longer than {:?} dropped)",
            kept.len(),
            pairs.len() - kept.len(),
            self.max_len
        );

        Ok(EncodedCorpus {
            pairs: kept,
            target_width: self.target_width,
        })
    }
}

/// Map ids back to tokens, stopping at the first `*EOS*`.
pub fn decode(vocabulary: &Vocabulary, ids: &[TokenId]) -> Result<Vec<String>, Error> {
    ids.iter()
        .take_while(|&&id| id != EOS_ID)
        .map(|&id| {
            vocabulary
                .token(id)
                .map(String::from)
                .ok_or_else(|| Error::Custom(format!("id {} is out of the vocabulary", id)))
        })
        .collect()
}

fn to_i32(id: usize) -> Result<i32, Error> {
    i32::try_from(id).map_err(|_| Error::Custom(format!("{} does not fit in an i32", id)))
}

/// Row-major `(rows.len(), width)` array.
fn rows_to_array(rows: &[Vec<TokenId>], width: usize) -> Result<Array2<i32>, Error> {
    let flat = rows
        .iter()
        .flat_map(|row| row.iter())
        .map(|&id| to_i32(id as usize))
        .collect::<Result<Vec<i32>, Error>>()?;
    Ok(Array2::from_shape_vec((rows.len(), width), flat)?)
}

/// Encoded pairs of a corpus, in corpus order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCorpus {
    pairs: Vec<EncodedPair>,
    target_width: usize,
}

impl EncodedCorpus {
    pub fn pairs(&self) -> &[EncodedPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    /// Sources padded with `*EOS*` to the longest source, and targets.
    pub fn flat_arrays(&self) -> Result<(Array2<i32>, Array2<i32>), Error> {
        let source_width = self
            .pairs
            .iter()
            .map(|pair| pair.source.len())
            .max()
            .unwrap_or(0);

        let sources: Vec<Vec<TokenId>> = self
            .pairs
            .iter()
            .map(|pair| {
                let mut source = pair.source.clone();
                source.resize(source_width, EOS_ID);
                source
            })
            .collect();
        let targets: Vec<Vec<TokenId>> = self.pairs.iter().map(|p| p.target.clone()).collect();

        Ok((
            rows_to_array(&sources, source_width)?,
            rows_to_array(&targets, self.target_width)?,
        ))
    }

    /// Group pairs by source length.
    ///
    /// Pairs are stably sorted by source length, so that a bucket keeps corpus order.
    pub fn into_buckets(self) -> Buckets {
        let target_width = self.target_width;
        let mut pairs = self.pairs;
        pairs.sort_by_key(|pair| pair.source.len());

        let mut inner = BTreeMap::new();
        for (key, group) in &pairs.into_iter().group_by(|pair| pair.source.len()) {
            let mut bucket = LengthBucket::new(key, target_width);
            for pair in group {
                bucket.push(pair);
            }
            debug!("bucket {}: {} pairs", key, bucket.len());
            inner.insert(key, bucket);
        }

        Buckets {
            inner,
            target_width,
        }
    }
}

/// Pairs whose sources have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthBucket {
    key: usize,
    target_width: usize,
    sources: Vec<Vec<TokenId>>,
    targets: Vec<Vec<TokenId>>,
    target_lengths: Vec<usize>,
}

impl LengthBucket {
    fn new(key: usize, target_width: usize) -> Self {
        Self {
            key,
            target_width,
            sources: Vec::new(),
            targets: Vec::new(),
            target_lengths: Vec::new(),
        }
    }

    fn push(&mut self, pair: EncodedPair) {
        debug_assert_eq!(pair.source.len(), self.key);
        debug_assert_eq!(pair.target.len(), self.target_width);
        self.sources.push(pair.source);
        self.targets.push(pair.target);
        self.target_lengths.push(pair.target_len);
    }

    /// Source length shared by every pair of the bucket.
    pub fn key(&self) -> usize {
        self.key
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[Vec<TokenId>] {
        &self.sources
    }

    pub fn targets(&self) -> &[Vec<TokenId>] {
        &self.targets
    }

    pub fn target_lengths(&self) -> &[usize] {
        &self.target_lengths
    }

    /// `x` `(len, key)`, `y` `(len, target_width)` and `ylen` `(len)` arrays.
    pub fn to_arrays(&self) -> Result<(Array2<i32>, Array2<i32>, Array1<i32>), Error> {
        let x = rows_to_array(&self.sources, self.key)?;
        let y = rows_to_array(&self.targets, self.target_width)?;
        let ylen = self
            .target_lengths
            .iter()
            .map(|&len| to_i32(len))
            .collect::<Result<Array1<i32>, Error>>()?;
        Ok((x, y, ylen))
    }
}

/// Buckets by ascending source length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    inner: BTreeMap<usize, LengthBucket>,
    target_width: usize,
}

impl Buckets {
    pub fn get(&self, key: usize) -> Option<&LengthBucket> {
        self.inner.get(&key)
    }

    /// Source lengths, ascending.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.inner.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LengthBucket> {
        self.inner.values()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of pairs.
    pub fn nb_pairs(&self) -> usize {
        self.inner.values().map(LengthBucket::len).sum()
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }
}

#[cfg(test)]
mod tests {
    use crate::config::VocabFilter;
    use crate::processing::vocab::{VocabularyBuilder, UKT_ID};

    use super::*;

    fn pair(source: &str, target: &str) -> SentencePair {
        SentencePair::new(source.to_string(), target.to_string())
    }

    fn corpus() -> Vec<SentencePair> {
        vec![
            pair("a b c", "a c"),
            pair("d", "d"),
            pair("a b 1", "a b"),
            pair("e f", "f e e"),
            pair("c c c", "c"),
        ]
    }

    fn encode(filter: Option<VocabFilter>, max_len: Option<usize>) -> (Vocabulary, EncodedCorpus) {
        let pairs = corpus();
        let mut builder = VocabularyBuilder::new();
        pairs.iter().for_each(|p| builder.add_pair(p));
        let built = builder.build(filter);
        let encoded = SentenceEncoder::new(&built.vocabulary, built.max_lengths[1], max_len)
            .encode_all(&pairs)
            .unwrap();
        (built.vocabulary, encoded)
    }

    #[test]
    fn sentence() {
        let (vocab, _) = encode(None, None);
        let encoder = SentenceEncoder::new(&vocab, 3, None);
        let ids = encoder.encode_sentence("a b 7").unwrap();
        assert_eq!(ids, vec![2, 3, vocab.get("#").unwrap(), EOS_ID]);
    }

    #[test]
    fn unknown_token() {
        let (vocab, _) = encode(None, None);
        let encoder = SentenceEncoder::new(&vocab, 3, None);
        assert!(matches!(
            encoder.encode_sentence("a zzz"),
            Err(Error::UnknownToken(ref t)) if t == "zzz"
        ));

        let filter = VocabFilter {
            min_freq: 2,
            max_vocab_size: 100,
        };
        let (vocab, _) = encode(Some(filter), None);
        let encoder = SentenceEncoder::new(&vocab, 3, None);
        let ids = encoder.encode_sentence("a zzz").unwrap();
        assert_eq!(ids, vec![vocab.get("a").unwrap(), UKT_ID, EOS_ID]);
    }

    #[test]
    fn padding() {
        let (_, encoded) = encode(None, None);
        assert_eq!(encoded.target_width(), 4);
        for pair in encoded.pairs() {
            assert_eq!(pair.target.len(), 4);
            assert!(pair.target[pair.target_len - 1..].iter().all(|&id| id == EOS_ID));
        }
        assert_eq!(encoded.pairs()[1].target_len, 2);
    }

    #[test]
    fn roundtrip() {
        let (vocab, encoded) = encode(None, None);
        let decoded = decode(&vocab, &encoded.pairs()[2].source).unwrap();
        assert_eq!(decoded, vec!["a", "b", "#"]);
        let decoded = decode(&vocab, &encoded.pairs()[3].target).unwrap();
        assert_eq!(decoded, vec!["f", "e", "e"]);
    }

    #[test]
    fn buckets() {
        let (_, encoded) = encode(None, None);
        let buckets = encoded.into_buckets();

        assert_eq!(buckets.keys().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(buckets.nb_pairs(), 5);
        for bucket in buckets.iter() {
            assert!(!bucket.is_empty());
            assert_eq!(bucket.sources().len(), bucket.targets().len());
            assert_eq!(bucket.sources().len(), bucket.target_lengths().len());
            assert!(bucket.sources().iter().all(|s| s.len() == bucket.key()));
            assert!(bucket
                .targets()
                .iter()
                .all(|t| t.len() == buckets.target_width()));
        }

        // "a b c", "a b 1" and "c c c" keep their corpus order
        let bucket = buckets.get(4).unwrap();
        assert_eq!(bucket.target_lengths(), &[3, 3, 2]);

        let (x, y, ylen) = bucket.to_arrays().unwrap();
        assert_eq!(x.shape(), &[3, 4]);
        assert_eq!(y.shape(), &[3, 4]);
        assert_eq!(ylen.to_vec(), vec![3, 3, 2]);
    }

    #[test]
    fn max_len() {
        let (_, encoded) = encode(None, Some(3));
        // with EOS, "a b c", "a b 1", "c c c" sources and "f e e" target are too long.
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded.target_width(), 4);
        assert!(encoded
            .pairs()
            .iter()
            .all(|p| p.source.len() <= 3 && p.target_len <= 3));
    }

    #[test]
    fn flat() {
        let (_, encoded) = encode(None, None);
        let (x, y) = encoded.flat_arrays().unwrap();
        assert_eq!(x.shape(), &[5, 4]);
        assert_eq!(y.shape(), &[5, 4]);
        assert_eq!(x[[1, 1]], EOS_ID as i32);
    }
}
