//! Sentence segmentation of WikiExtractor output.
//!
//! Extracted files hold documents wrapped like this:
//! ```text
//! <doc id="12" url="https://en.wikipedia.org/wiki?curid=12" title="Anarchism">
//! Anarchism
//!
//! Anarchism is a <a href="political%20philosophy">political philosophy</a> ...
//! </doc>
//! ```
//!
//! The title paragraph and the remaining HTML tags are removed,
//! then each line is split into sentences (UAX #29 sentence boundaries) and words (UAX #29 word boundaries).
use std::borrow::Cow;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;

/// A document header on a single line, then its body up to `</doc>`.
const DOC_PATTERN: &str =
    r#"(?s)<doc id="([^"\n]+)" url="([^"\n]+)" title="([^\n]+?)">\n(.*?)</doc>"#;
const TAG_PATTERN: &str = r"<[^>]*>";

/// A document found in an extracted file.
#[derive(Debug, PartialEq, Eq)]
pub struct WikiDocument<'a> {
    pub id: &'a str,
    pub url: &'a str,
    pub title: &'a str,
    pub text: &'a str,
}

/// Compiled document and tag patterns.
///
/// Each tokenizer worker holds its own clone.
#[derive(Debug, Clone)]
pub struct WikiParser {
    document: Regex,
    tag: Regex,
}

impl WikiParser {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            document: Regex::new(DOC_PATTERN)?,
            tag: Regex::new(TAG_PATTERN)?,
        })
    }

    /// Get every well-formed document of `content`.
    ///
    /// Documents with a malformed header or an empty body are ignored.
    pub fn documents<'a>(&self, content: &'a str) -> Vec<WikiDocument<'a>> {
        self.document
            .captures_iter(content)
            .filter_map(|caps| {
                let text = caps.get(4)?.as_str();
                if text.is_empty() {
                    return None;
                }
                Some(WikiDocument {
                    id: caps.get(1)?.as_str(),
                    url: caps.get(2)?.as_str(),
                    title: caps.get(3)?.as_str(),
                    text,
                })
            })
            .collect()
    }

    /// Remove everything between `<` and `>`.
    pub fn strip_tags<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.tag.replace_all(text, "")
    }

    /// Tokenized sentences of a document, joined with spaces.
    ///
    /// Sentences with less than `min_tokens` tokens are dropped.
    pub fn tokenized_sentences(&self, doc: &WikiDocument, min_tokens: usize) -> Vec<String> {
        let text = self.strip_tags(body(doc.text));
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        text.lines()
            .flat_map(|line| line.unicode_sentences())
            .map(word_tokenize)
            .filter(|words| words.len() >= min_tokens)
            .map(|words| words.join(" "))
            .collect()
    }
}

/// Text after the title paragraph, if there is one.
fn body(text: &str) -> &str {
    match text.find("\n\n") {
        Some(idx) => &text[idx + 2..],
        None => text,
    }
}

/// Word tokenization: word boundaries, without whitespace segments.
pub fn word_tokenize(sentence: &str) -> Vec<&str> {
    sentence
        .split_word_bounds()
        .filter(|token| !token.trim().is_empty())
        .collect()
}
