//! Vocabulary files: one `token id` line per entry, by ascending id.
use std::io::Write;

use crate::error::Error;
use crate::processing::Vocabulary;

pub fn write_vocabulary<W: Write>(mut out: W, vocabulary: &Vocabulary) -> Result<(), Error> {
    for (id, token) in vocabulary.iter() {
        writeln!(out, "{} {}", token, id)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocabFilter;
    use crate::sources::SentencePair;

    #[test]
    fn write() {
        let pairs = vec![SentencePair::new("b a b".to_string(), "a 2".to_string())];

        let mut out = Vec::new();
        write_vocabulary(&mut out, &Vocabulary::from_pairs(&pairs, None)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "*EOS* 1\nb 2\na 3\n# 4\n"
        );

        let filter = VocabFilter {
            min_freq: 1,
            max_vocab_size: 1,
        };
        let mut out = Vec::new();
        write_vocabulary(&mut out, &Vocabulary::from_pairs(&pairs, Some(filter))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "*EOS* 1\n*UKT* 2\nb 3\n");
    }
}
