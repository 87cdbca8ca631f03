//! Line-oriented text writers.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::sources::SentencePair;

use super::WriterTrait;

/// Writes `source\ttarget` lines.
pub struct SentsWriter<W: Write> {
    inner: BufWriter<W>,
    nb_pairs: usize,
}

impl SentsWriter<File> {
    pub fn create(dst: &Path) -> Result<Self, Error> {
        debug!("creating {:?}", dst);
        Ok(Self::new(File::create(dst)?))
    }
}

impl<W: Write> SentsWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            nb_pairs: 0,
        }
    }

    /// Number of pairs written so far.
    pub fn nb_pairs(&self) -> usize {
        self.nb_pairs
    }

    /// Flush and get the inner writer back.
    pub fn into_inner(self) -> Result<W, Error> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> WriterTrait for SentsWriter<W> {
    type Item = SentencePair;

    fn write(&mut self, vals: &[SentencePair]) -> Result<(), Error> {
        for pair in vals {
            self.write_single(pair)?;
        }
        Ok(())
    }

    fn write_single(&mut self, pair: &SentencePair) -> Result<(), Error> {
        writeln!(self.inner, "{}\t{}", pair.source(), pair.target())?;
        self.nb_pairs += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(self.inner.flush()?)
    }
}

/// Writes one sentence per line in a worker-private shard file.
pub struct ShardWriter {
    path: PathBuf,
    inner: BufWriter<File>,
    nb_sentences: usize,
}

impl ShardWriter {
    /// Shard of `worker` is `<dst>.<worker>`.
    pub fn create(dst: &Path, worker: usize) -> Result<Self, Error> {
        let mut name = dst.as_os_str().to_owned();
        name.push(format!(".{}", worker));
        let path = PathBuf::from(name);
        debug!("[worker {}] creating {:?}", worker, path);
        let inner = BufWriter::new(File::create(&path)?);
        Ok(Self {
            path,
            inner,
            nb_sentences: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn nb_sentences(&self) -> usize {
        self.nb_sentences
    }
}

impl WriterTrait for ShardWriter {
    type Item = String;

    fn write(&mut self, vals: &[String]) -> Result<(), Error> {
        for sentence in vals {
            self.write_single(sentence)?;
        }
        Ok(())
    }

    fn write_single(&mut self, sentence: &String) -> Result<(), Error> {
        writeln!(self.inner, "{}", sentence)?;
        self.nb_sentences += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(self.inner.flush()?)
    }
}
