//! Dataset extraction.
use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::io::writer::{SentsWriter, WriterTrait};
use crate::pipelines::Pipeline;
use crate::sources::Dataset;

/// Reads the sentence pairs of a dataset folder and writes them in a `.sents` file.
pub struct Extract {
    dataset: Dataset,
    src: PathBuf,
    dst: PathBuf,
    dedup: bool,
}

impl Extract {
    pub fn new(dataset: Dataset, src: PathBuf, dst: PathBuf, dedup: bool) -> Self {
        Self {
            dataset,
            src,
            dst,
            dedup,
        }
    }
}

impl Pipeline<usize> for Extract {
    /// Returns the number of written pairs.
    fn run(&self) -> Result<usize, Error> {
        info!("extracting {} from {:?}", self.dataset, self.src);
        let pairs = self.dataset.sentence_pairs(&self.src, self.dedup)?;

        let mut writer = SentsWriter::create(&self.dst)?;
        writer.write(&pairs)?;
        writer.flush()?;

        info!("wrote {} pairs in {:?}", writer.nb_pairs(), self.dst);
        Ok(writer.nb_pairs())
    }
}
