/*! Aligned corpus sources

Each supported dataset has its own on-disk layout. Adapters read them into an ordered list of [SentencePair]:

- [newsela]: one tab-separated alignment file, optionally deduplicated by document.
- [pwkp]: blank-line separated paragraphs of two sentences, that are tokenized on the fly.
- [kauchak]: two tab-separated files (`normal.aligned`, `simple.aligned`) read in lockstep.
!*/
pub mod kauchak;
pub mod newsela;
pub mod pwkp;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A (complex, simple) sentence pair.
///
/// Both sides are whitespace-joined token strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SentencePair {
    source: String,
    target: String,
}

impl SentencePair {
    pub fn new(source: String, target: String) -> Self {
        Self { source, target }
    }

    /// Get a reference to the complex side.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get a reference to the simple side.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Both sides, source first.
    pub fn sides(&self) -> [&str; 2] {
        [&self.source, &self.target]
    }
}

impl<S, T> From<(S, T)> for SentencePair
where
    S: Into<String>,
    T: Into<String>,
{
    fn from((source, target): (S, T)) -> Self {
        Self::new(source.into(), target.into())
    }
}

/// Known datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Newsela,
    Pwkp,
    Acl,
}

impl Dataset {
    pub fn names() -> &'static [&'static str] {
        &["newsela", "pwkp", "acl"]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Newsela => "newsela",
            Dataset::Pwkp => "pwkp",
            Dataset::Acl => "acl",
        }
    }

    /// Read the sentence pairs of the dataset located in `folder`.
    ///
    /// `dedup` only has an effect on [Dataset::Newsela].
    pub fn sentence_pairs(&self, folder: &Path, dedup: bool) -> Result<Vec<SentencePair>, Error> {
        if dedup && *self != Dataset::Newsela {
            warn!("deduplication is only available for newsela, ignoring");
        }

        match self {
            Dataset::Newsela => newsela::Newsela::new(folder).sentence_pairs(dedup),
            Dataset::Pwkp => pwkp::Pwkp::new(folder).sentence_pairs(),
            Dataset::Acl => kauchak::Kauchak::new(folder).sentence_pairs(),
        }
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newsela" => Ok(Dataset::Newsela),
            "pwkp" => Ok(Dataset::Pwkp),
            "acl" => Ok(Dataset::Acl),
            other => Err(Error::UnknownDataset(other.to_string())),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
