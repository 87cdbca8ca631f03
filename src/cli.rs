//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use simplecorpus::config::{Layout, PreprocessConfig, TokenizeConfig, VocabFilter};
use simplecorpus::sources::Dataset;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "simplecorpus",
    about = "sentence simplification corpus preparation."
)]
/// Holds every command that is callable by the `simplecorpus` command.
pub enum Simplecorpus {
    #[structopt(about = "Extract sentence pairs of a dataset into a .sents file")]
    Extract(Extract),
    #[structopt(about = "Build vocabulary, embeddings and training arrays from a .sents file")]
    Preprocess(Preprocess),
    #[structopt(about = "Tokenize a WikiExtractor dump into sentence shards")]
    Tokenize(Tokenize),
    #[structopt(about = "Token frequencies and rare-token filtering of a tokenized corpus")]
    Freq(Freq),
    #[structopt(about = "List tokens of an aligned file missing from word vectors")]
    Oov(Oov),
}

#[derive(Debug, StructOpt)]
/// Extract command and parameters.
///
/// ```sh
/// simplecorpus-extract 0.1.0
/// Extract sentence pairs of a dataset into a .sents file
///
/// USAGE:
///     simplecorpus extract [FLAGS] <dataset> <src> <dst>
///
/// FLAGS:
///     -d, --dedup      keep the best alignment of each sentence (newsela only)
///     -h, --help       Prints help information
///     -V, --version    Prints version information
///
/// ARGS:
///     <dataset>    one of newsela, pwkp, acl
///     <src>        dataset folder
///     <dst>        destination .sents file
/// ```
pub struct Extract {
    #[structopt(help = "one of newsela, pwkp, acl")]
    pub dataset: Dataset,
    #[structopt(parse(from_os_str), help = "dataset folder")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination .sents file")]
    pub dst: PathBuf,
    #[structopt(
        short = "d",
        long = "dedup",
        help = "keep the best alignment of each sentence (newsela only)"
    )]
    pub dedup: bool,
}

#[derive(Debug, StructOpt)]
pub struct Preprocess {
    #[structopt(parse(from_os_str), help = "source .sents file")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "word2vec binary file")]
    pub w2v: PathBuf,
    #[structopt(parse(from_os_str), help = "destination folder")]
    pub dst: PathBuf,
    #[structopt(long = "name", default_value = "corpus", help = "output file stem")]
    pub name: String,
    #[structopt(
        long = "filter-vocab",
        help = "keep frequent tokens only, others become *UKT*"
    )]
    pub filter_vocab: bool,
    #[structopt(long = "min-freq", default_value = "5")]
    pub min_freq: u64,
    #[structopt(long = "max-vocab-size", default_value = "40000")]
    pub max_vocab_size: usize,
    #[structopt(
        long = "max-len",
        default_value = "100",
        help = "drop pairs with longer sentences (EOS included). 0 keeps everything."
    )]
    pub max_len: usize,
    #[structopt(long = "seed", help = "embedding initialization seed")]
    pub seed: Option<u64>,
    #[structopt(long = "flat", help = "write data_x/data_y instead of length buckets")]
    pub flat: bool,
}

impl From<&Preprocess> for PreprocessConfig {
    fn from(p: &Preprocess) -> Self {
        let mut config = PreprocessConfig::default();
        if p.filter_vocab {
            config = config.with_vocab_filter(VocabFilter {
                min_freq: p.min_freq,
                max_vocab_size: p.max_vocab_size,
            });
        }
        if p.max_len > 0 {
            config = config.with_max_len(p.max_len);
        }
        if let Some(seed) = p.seed {
            config = config.with_seed(seed);
        }
        if p.flat {
            config = config.with_layout(Layout::Flat);
        }
        config
    }
}

#[derive(Debug, StructOpt)]
pub struct Tokenize {
    #[structopt(parse(from_os_str), help = "WikiExtractor output folder")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        help = "shard prefix, worker n writes <dst>.<n>"
    )]
    pub dst: PathBuf,
    #[structopt(short = "n", long = "workers", default_value = "1")]
    pub workers: usize,
    #[structopt(long = "debug", help = "tokenize a single file per worker")]
    pub debug: bool,
    #[structopt(long = "max-files", help = "files per worker cap")]
    pub max_files: Option<usize>,
    #[structopt(long = "min-tokens", default_value = "6")]
    pub min_tokens: usize,
    #[structopt(
        long = "timeout-secs",
        default_value = "21600",
        help = "longest wait for a worker report"
    )]
    pub timeout_secs: u64,
}

impl From<&Tokenize> for TokenizeConfig {
    fn from(t: &Tokenize) -> Self {
        let max_files = match (t.max_files, t.debug) {
            (Some(max_files), _) => Some(max_files),
            (None, true) => Some(1),
            (None, false) => None,
        };
        TokenizeConfig {
            workers: t.workers,
            max_files,
            min_tokens: t.min_tokens,
            timeout: Duration::from_secs(t.timeout_secs),
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Freq {
    #[structopt(parse(from_os_str), help = "tokenized corpus, one sentence per line")]
    pub src: PathBuf,
    #[structopt(long = "min-freq", default_value = "5")]
    pub min_freq: u64,
}

#[derive(Debug, StructOpt)]
pub struct Oov {
    #[structopt(parse(from_os_str), help = "aligned file (title, paragraph, sentence)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "word2vec binary file")]
    pub w2v: PathBuf,
}
