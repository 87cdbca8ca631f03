/*!
Training corpus container.

Arrays are stored in a single `.npz` file (a zip of `.npy` arrays):

| name | shape | content |
|------|-------|---------|
| `w2v` | `(V, D)` | embedding matrix, row `id - 1` for token `id` |
| `x_lens` | `(B)` | bucket source lengths, ascending |
| `x_<len>` | `(N, len)` | sources of bucket `len` |
| `y_<len>` | `(N, T)` | padded targets of bucket `len` |
| `ylen_<len>` | `(N)` | unpadded target lengths of bucket `len` |

The flat layout replaces bucket arrays with `data_x` `(N, S)` and `data_y` `(N, T)`.
!*/
use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use ndarray::{Array1, ArrayBase, Data, Dimension};
use ndarray_npy::{NpzWriter, WritableElement};

use crate::error::Error;
use crate::processing::{Buckets, EmbeddingMatrix, EncodedCorpus};

pub struct CorpusWriter {
    path: PathBuf,
    npz: NpzWriter<File>,
    names: Vec<String>,
}

impl CorpusWriter {
    pub fn create(path: &Path) -> Result<Self, Error> {
        debug!("creating {:?}", path);
        let npz = NpzWriter::new(File::create(path)?);
        Ok(Self {
            path: path.to_path_buf(),
            npz,
            names: Vec::new(),
        })
    }

    fn add<A, S, D>(&mut self, name: String, array: &ArrayBase<S, D>) -> Result<(), Error>
    where
        A: WritableElement,
        S: Data<Elem = A>,
        D: Dimension,
    {
        debug!("writing {} {:?}", name, array.shape());
        self.npz.add_array(name.as_str(), array)?;
        self.names.push(name);
        Ok(())
    }

    pub fn write_embeddings(&mut self, embeddings: &EmbeddingMatrix) -> Result<(), Error> {
        self.add("w2v".to_string(), &embeddings.view())
    }

    pub fn write_buckets(&mut self, buckets: &Buckets) -> Result<(), Error> {
        let lens = buckets
            .keys()
            .map(|key| {
                i32::try_from(key)
                    .map_err(|_| Error::Custom(format!("bucket key {} overflows", key)))
            })
            .collect::<Result<Array1<i32>, Error>>()?;
        self.add("x_lens".to_string(), &lens)?;

        for bucket in buckets.iter() {
            let (x, y, ylen) = bucket.to_arrays()?;
            self.add(format!("x_{}", bucket.key()), &x)?;
            self.add(format!("y_{}", bucket.key()), &y)?;
            self.add(format!("ylen_{}", bucket.key()), &ylen)?;
        }
        info!(
            "wrote {} buckets ({} pairs) in {:?}",
            buckets.len(),
            buckets.nb_pairs(),
            self.path
        );
        Ok(())
    }

    pub fn write_flat(&mut self, corpus: &EncodedCorpus) -> Result<(), Error> {
        let (data_x, data_y) = corpus.flat_arrays()?;
        self.add("data_x".to_string(), &data_x)?;
        self.add("data_y".to_string(), &data_y)?;
        info!("wrote {} pairs in {:?}", corpus.len(), self.path);
        Ok(())
    }

    /// Write the zip central directory. The file is unreadable if this is not called.
    pub fn finish(self) -> Result<Vec<String>, Error> {
        self.npz.finish()?;
        Ok(self.names)
    }
}
