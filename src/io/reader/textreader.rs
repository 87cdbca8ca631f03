/*! Paragraph reader

Yields sequences of lines that are separated by blank (or whitespace-only) lines.

```text
first line of paragraph 1
second line of paragraph 1

only line of paragraph 2
```
!*/
use std::io::{BufRead, Lines};

use crate::error::Error;

/// Reader that yields sequences of strings
/// that are newline separated.
#[derive(Debug)]
pub struct ParagraphReader<R> {
    lines: Lines<R>,
}

impl<R: BufRead> ParagraphReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for ParagraphReader<R> {
    type Item = Result<Vec<String>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut ret = Vec::new();
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };

            // cut at blank line, skipping runs of blank lines
            if line.trim().is_empty() {
                if ret.is_empty() {
                    continue;
                }
                return Some(Ok(ret));
            }
            ret.push(line);
        }

        // close eventual last paragraph
        if ret.is_empty() {
            None
        } else {
            Some(Ok(ret))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_iter() {
        let sentences = Cursor::new(
            "aaa
bbb
ccc

record 2
this is record 2
end of record 2

bye!
record 3",
        );

        let expected = vec![
            vec!["aaa", "bbb", "ccc"],
            vec!["record 2", "this is record 2", "end of record 2"],
            vec!["bye!", "record 3"],
        ];

        let paragraphs: Vec<Vec<String>> = ParagraphReader::new(sentences)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(paragraphs, expected);
    }

    #[test]
    fn test_iter_blank_runs() {
        let sentences = Cursor::new("\n\naaa\n  \n\n\nbbb\nccc\n\n");
        let paragraphs: Vec<Vec<String>> = ParagraphReader::new(sentences)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(paragraphs, vec![vec!["aaa"], vec!["bbb", "ccc"]]);
    }

    #[test]
    fn test_iter_single_record() {
        let sentences = Cursor::new(
            "aaa
bbb
record 1
bye!",
        );

        let mut reader = ParagraphReader::new(sentences);
        assert_eq!(
            reader.next().unwrap().unwrap(),
            vec!["aaa", "bbb", "record 1", "bye!"]
        );
        assert!(reader.next().is_none());
    }
}
