//! # simplecorpus
//!
//! Preparation of sentence simplification training data.
//!
//! ```sh
//! simplecorpus 0.1.0
//! sentence simplification corpus preparation.
//!
//! USAGE:
//!     simplecorpus <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     extract       Extract sentence pairs of a dataset into a .sents file
//!     freq          Token frequencies and rare-token filtering of a tokenized corpus
//!     help          Prints this message or the help of the given subcommand(s)
//!     oov           List tokens of an aligned file missing from word vectors
//!     preprocess    Build vocabulary, embeddings and training arrays from a .sents file
//!     tokenize      Tokenize a WikiExtractor dump into sentence shards
//! ```
use structopt::StructOpt;

use simplecorpus::error::Error;
use simplecorpus::pipelines::{self, Pipeline};

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Simplecorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Simplecorpus::Extract(e) => {
            let p = pipelines::Extract::new(e.dataset, e.src, e.dst, e.dedup);
            p.run()?;
        }
        cli::Simplecorpus::Preprocess(p) => {
            let config = (&p).into();
            let p = pipelines::Preprocess::new(p.src, p.w2v, p.dst, p.name, config);
            let summary = p.run()?;
            info!(
                "{} of {} pairs kept, vocabulary of {} ({} pretrained)",
                summary.nb_kept, summary.nb_pairs, summary.vocabulary_size, summary.nb_pretrained
            );
        }
        cli::Simplecorpus::Tokenize(t) => {
            let config = (&t).into();
            let p = pipelines::Tokenize::new(t.src, t.dst, config);
            for shard in p.run()? {
                println!("{}", shard.display());
            }
        }
        cli::Simplecorpus::Freq(f) => {
            let p = pipelines::Frequencies::new(f.src, f.min_freq);
            p.run()?;
        }
        cli::Simplecorpus::Oov(o) => {
            let p = pipelines::Oov::new(o.src, o.w2v);
            for token in p.run()? {
                println!("{}", token);
            }
        }
    };
    Ok(())
}
