/*! Document-scoped alignment deduplication

A source sentence may be aligned with several simplifications inside a document.
Only the candidate with the highest score is kept, and on equal scores the first one seen stays.

Candidates are keyed on `(sentence id, source sentence)`, so that a sentence repeated verbatim
with a different id is considered as another sentence.
!*/
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::debug;

use crate::sources::SentencePair;

/// One candidate simplification of a source sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentCandidate {
    sentence_id: String,
    source: String,
    score: u32,
    target: String,
}

impl AlignmentCandidate {
    pub fn new(sentence_id: &str, source: &str, score: u32, target: &str) -> Self {
        Self {
            sentence_id: sentence_id.to_string(),
            source: source.to_string(),
            score,
            target: target.to_string(),
        }
    }
}

/// Holds the current best candidate for each source sentence of the current document.
#[derive(Debug, Default)]
pub struct DocumentDedup {
    document: Option<String>,
    best: IndexMap<(String, String), (u32, String)>,
}

impl DocumentDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate belonging to `document`.
    ///
    /// If `document` differs from the current one, the surviving pairs of the
    /// current document are returned before the candidate is taken into account.
    pub fn push(&mut self, document: &str, candidate: AlignmentCandidate) -> Vec<SentencePair> {
        let flushed = match &self.document {
            Some(current) if current == document => Vec::new(),
            _ => {
                let flushed = self.flush();
                self.document = Some(document.to_string());
                flushed
            }
        };

        self.offer(candidate);
        flushed
    }

    /// Offer a candidate for the current document.
    pub fn offer(&mut self, candidate: AlignmentCandidate) {
        let AlignmentCandidate {
            sentence_id,
            source,
            score,
            target,
        } = candidate;

        match self.best.entry((sentence_id, source)) {
            Entry::Occupied(mut best) => {
                if score > best.get().0 {
                    best.insert((score, target));
                }
            }
            Entry::Vacant(slot) => {
                slot.insert((score, target));
            }
        }
    }

    /// Emit the surviving pairs of the current document, in first-seen order, and reset.
    pub fn flush(&mut self) -> Vec<SentencePair> {
        if let Some(document) = &self.document {
            debug!("document {}: {} sentences kept", document, self.best.len());
        }

        self.best
            .drain(..)
            .map(|((_, source), (_, target))| SentencePair::new(source, target))
            .collect()
    }

    /// Flush the last document.
    pub fn finish(mut self) -> Vec<SentencePair> {
        self.flush()
    }
}
