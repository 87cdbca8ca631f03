//! Wikipedia dump tokenization
//!
//! Files produced by WikiExtractor are split between a fixed number of workers.
//! Each worker tokenizes its files into its own shard (`<dst>.<worker>`),
//! then reports back to the coordinator with the shard path or the error it hit.
//!
//! The coordinator waits for one report per worker, with a bounded wait for each of them.
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, RecvTimeoutError};
use log::{debug, error, info, warn};

use crate::config::TokenizeConfig;
use crate::error::Error;
use crate::io::writer::{ShardWriter, WriterTrait};
use crate::pipelines::Pipeline;
use crate::processing::segment::WikiParser;

/// Tagged worker report.
type Report = (usize, Result<PathBuf, Error>);

pub struct Tokenize {
    src: PathBuf,
    dst: PathBuf,
    config: TokenizeConfig,
}

impl Tokenize {
    pub fn new(src: PathBuf, dst: PathBuf, config: TokenizeConfig) -> Self {
        Self { src, dst, config }
    }

    /// Every non-directory entry under `src`, recursively, sorted.
    fn files(&self) -> Result<Vec<PathBuf>, Error> {
        let pattern = self.src.join("**").join("*");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| Error::Custom(format!("non UTF-8 path: {:?}", self.src)))?;

        let mut files = Vec::new();
        for entry in glob::glob(pattern)? {
            let path = entry?;
            if !path.is_dir() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Deal files round-robin, capping each worker at `max_files`.
    fn partition(
        files: Vec<PathBuf>,
        workers: usize,
        max_files: Option<usize>,
    ) -> Vec<Vec<PathBuf>> {
        let mut partitions = vec![Vec::new(); workers];
        for (idx, file) in files.into_iter().enumerate() {
            partitions[idx % workers].push(file);
        }
        if let Some(max_files) = max_files {
            for files in partitions.iter_mut() {
                files.truncate(max_files);
            }
        }
        partitions
    }

    /// Tokenize `files` into the shard of `worker`.
    fn work(
        worker: usize,
        parser: &WikiParser,
        files: &[PathBuf],
        dst: &Path,
        min_tokens: usize,
    ) -> Result<PathBuf, Error> {
        let mut writer = ShardWriter::create(dst, worker)?;
        for path in files {
            debug!("[worker {}] tokenizing {:?}", worker, path);
            let content = std::fs::read_to_string(path)?;
            for doc in parser.documents(&content) {
                writer.write(&parser.tokenized_sentences(&doc, min_tokens))?;
            }
        }
        writer.flush()?;
        info!(
            "[worker {}] {} files, {} sentences in {:?}",
            worker,
            files.len(),
            writer.nb_sentences(),
            writer.path()
        );
        Ok(writer.path().to_path_buf())
    }

    fn spawn(
        &self,
        worker: usize,
        parser: WikiParser,
        files: Vec<PathBuf>,
        tx: channel::Sender<Report>,
    ) -> Result<JoinHandle<()>, Error> {
        let dst = self.dst.clone();
        let min_tokens = self.config.min_tokens;
        let handle = thread::Builder::new()
            .name(format!("tokenize-{}", worker))
            .spawn(move || {
                let report = Self::work(worker, &parser, &files, &dst, min_tokens);
                if let Err(e) = &report {
                    error!("[worker {}] {}", worker, e);
                }
                // the coordinator is gone if it already aborted the run
                if tx.send((worker, report)).is_err() {
                    warn!("[worker {}] report not received", worker);
                }
            })?;
        Ok(handle)
    }
}

impl Pipeline<Vec<PathBuf>> for Tokenize {
    /// Returns shard paths, by worker index.
    fn run(&self) -> Result<Vec<PathBuf>, Error> {
        let workers = self.config.workers;
        if workers == 0 {
            return Err(Error::Custom("at least one worker is needed".to_string()));
        }

        let parser = WikiParser::new()?;
        let files = self.files()?;
        info!("{} files to tokenize with {} workers", files.len(), workers);
        if let Some(max_files) = self.config.max_files {
            warn!("debug mode: at most {} files per worker", max_files);
        }

        let (tx, rx) = channel::unbounded();
        let mut handles = Vec::with_capacity(workers);
        for (worker, files) in Self::partition(files, workers, self.config.max_files)
            .into_iter()
            .enumerate()
        {
            handles.push(self.spawn(worker, parser.clone(), files, tx.clone())?);
        }
        drop(tx);

        let mut shards: Vec<Option<PathBuf>> = vec![None; workers];
        for received in 0..workers {
            match rx.recv_timeout(self.config.timeout) {
                Ok((worker, Ok(shard))) => {
                    debug!("[worker {}] done", worker);
                    shards[worker] = Some(shard);
                }
                Ok((worker, Err(e))) => {
                    return Err(Error::Worker {
                        worker,
                        source: Box::new(e),
                    })
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(Error::WorkerTimeout {
                        waited: self.config.timeout,
                        received,
                        expected: workers,
                    })
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(Error::Custom(format!(
                        "workers disconnected after {} of {} reports",
                        received, workers
                    )))
                }
            }
        }

        for handle in handles {
            handle
                .join()
                .map_err(|_| Error::Custom("a worker panicked".to_string()))?;
        }

        let shards: Vec<PathBuf> = shards.into_iter().flatten().collect();
        info!("wrote {} shards", shards.len());
        Ok(shards)
    }
}
