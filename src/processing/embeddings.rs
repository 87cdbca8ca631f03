/*! Pretrained word vectors

Reads the word2vec binary format:

```text
<nb words> <dimensions>\n
<word> <dimensions x f32 little endian>
<word> <dimensions x f32 little endian>
...
```

Only the vectors of vocabulary words are loaded, the others are read through and dropped.
!*/
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::error::Error;
use crate::processing::vocab::{TokenId, Vocabulary, EOS_ID};

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Declared table size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct W2vHeader {
    pub nb_words: usize,
    pub dims: usize,
}

impl W2vHeader {
    fn parse(line: &str) -> Result<Self, Error> {
        let mut fields = line.split_whitespace().map(str::parse::<usize>);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(nb_words)), Some(Ok(dims)), None) => Ok(Self { nb_words, dims }),
            _ => Err(Error::W2vFormat(format!("invalid header {:?}", line.trim_end()))),
        }
    }

    /// Size of a vector in bytes.
    pub fn stride(&self) -> usize {
        self.dims * F32_SIZE
    }
}

pub struct W2vReader<R> {
    inner: R,
    header: W2vHeader,
}

impl W2vReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        info!("loading {:?}", path);
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R> W2vReader<R>
where
    R: BufRead,
{
    pub fn new(mut inner: R) -> Result<Self, Error> {
        let mut line = String::new();
        inner.read_line(&mut line)?;
        let header = W2vHeader::parse(&line)?;
        debug!("word2vec header: {:?}", header);
        Ok(Self { inner, header })
    }

    pub fn header(&self) -> &W2vHeader {
        &self.header
    }

    /// Read the next word, skipping newlines that may precede it.
    fn read_word(&mut self, idx: usize) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.inner.read_until(b' ', &mut buf)?;
        if buf.pop() != Some(b' ') {
            return Err(Error::W2vFormat(format!(
                "unexpected end of file at word {} (header declares {})",
                idx, self.header.nb_words
            )));
        }
        buf.retain(|&b| b != b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn read_vector(&mut self, word: &str) -> Result<Array1<f32>, Error> {
        let mut vector = vec![0f32; self.header.dims];
        self.inner
            .read_f32_into::<LittleEndian>(&mut vector)
            .map_err(|e| Error::W2vFormat(format!("truncated vector for {:?}: {}", word, e)))?;
        Ok(Array1::from(vector))
    }

    /// Drop the next vector, through the read buffer.
    fn skip_vector(&mut self, word: &str) -> Result<(), Error> {
        let stride = self.header.stride() as u64;
        let skipped = io::copy(&mut (&mut self.inner).take(stride), &mut io::sink())?;
        if skipped < stride {
            return Err(Error::W2vFormat(format!(
                "truncated vector for {:?}: {} bytes out of {}",
                word, skipped, stride
            )));
        }
        Ok(())
    }

    /// Walk through every entry, keeping the vectors for which `keep` returns `true`.
    fn scan<F>(mut self, keep: F) -> Result<(W2vHeader, HashMap<String, Array1<f32>>), Error>
    where
        F: Fn(&str) -> bool,
    {
        let mut vectors = HashMap::new();
        for idx in 0..self.header.nb_words {
            let word = self.read_word(idx)?;
            if keep(&word) {
                let vector = self.read_vector(&word)?;
                vectors.insert(word, vector);
            } else {
                self.skip_vector(&word)?;
            }
        }
        Ok((self.header, vectors))
    }

    /// Load the vectors of vocabulary words.
    pub fn vectors_for(
        self,
        vocabulary: &Vocabulary,
    ) -> Result<(W2vHeader, HashMap<String, Array1<f32>>), Error> {
        let (header, vectors) = self.scan(|word| vocabulary.get(word).is_some())?;
        info!("load w2v done, {} vocabulary words found", vectors.len());
        Ok((header, vectors))
    }

    /// Only get the words of the table.
    pub fn words(mut self) -> Result<HashSet<String>, Error> {
        let mut words = HashSet::with_capacity(self.header.nb_words);
        for idx in 0..self.header.nb_words {
            let word = self.read_word(idx)?;
            self.skip_vector(&word)?;
            words.insert(word);
        }
        Ok(words)
    }
}

/// Embedding matrix. Row `id - 1` holds the vector of token `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    inner: Array2<f32>,
}

impl EmbeddingMatrix {
    /// `(rows, dims)` matrix drawn from `U(-range, range)`, with a zeroed first row.
    pub fn random<R: Rng>(rows: usize, dims: usize, range: f32, rng: &mut R) -> Self {
        let uniform = Uniform::new_inclusive(-range, range);
        let mut inner = Array2::from_shape_simple_fn((rows, dims), || uniform.sample(rng));
        if rows > 0 {
            inner.row_mut(0).fill(0.0);
        }
        Self { inner }
    }

    /// Build the matrix for `vocabulary`, overwriting random rows with `vectors`.
    ///
    /// The `*EOS*` row stays zeroed, a `*UKT*` vector is used when the table has one.
    pub fn splice(
        vocabulary: &Vocabulary,
        vectors: &HashMap<String, Array1<f32>>,
        dims: usize,
        range: f32,
        seed: Option<u64>,
    ) -> Result<Self, Error> {
        let mut rng = match seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        let mut matrix = Self::random(vocabulary.len(), dims, range, &mut rng);

        let mut nb_spliced = 0;
        for (id, token) in vocabulary.iter() {
            if id == EOS_ID {
                continue;
            }
            if let Some(vector) = vectors.get(token) {
                if vector.len() != dims {
                    return Err(Error::W2vFormat(format!(
                        "vector of {:?} has {} dimensions instead of {}",
                        token,
                        vector.len(),
                        dims
                    )));
                }
                matrix.inner.row_mut(id as usize - 1).assign(vector);
                nb_spliced += 1;
            }
        }
        info!(
            "embedding matrix {:?}, {} pretrained rows",
            matrix.inner.dim(),
            nb_spliced
        );

        Ok(matrix)
    }

    /// Row of token `id`.
    pub fn row_for(&self, id: TokenId) -> Option<ArrayView1<'_, f32>> {
        let idx = (id as usize).checked_sub(1)?;
        (idx < self.inner.nrows()).then(|| self.inner.row(idx))
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.inner.view()
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }
}
