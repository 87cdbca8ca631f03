use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use ndarray::{Array, Array1, Array2, Dimension};
use ndarray_npy::{NpzReader, ReadableElement};

use simplecorpus::config::{Layout, PreprocessConfig, VocabFilter};
use simplecorpus::pipelines::{Pipeline, Preprocess, PreprocessSummary};

const SENTS: &str = "The cat sat on the mat .\tThe cat sat .
Dogs bark loudly .\tDogs bark .
In 2015 , 12 dogs barked .\tDogs barked .
a b c d e f g h i j k l\tshort .
";

const CAT: [f32; 3] = [0.5, -1.0, 2.0];
const DOGS: [f32; 3] = [1.5, 1.5, -0.5];
const UNKNOWN: [f32; 3] = [0.9, 0.9, 0.9];

fn w2v_table(path: &Path) {
    let mut table = Vec::new();
    write!(table, "5 3\n").unwrap();
    for (word, vector) in [
        ("cat", CAT),
        ("*EOS*", [1.0; 3]),
        ("zebra", [3.0; 3]),
        ("dogs", DOGS),
        ("*UKT*", UNKNOWN),
    ] {
        write!(table, "{} ", word).unwrap();
        for v in vector {
            table.write_f32::<LittleEndian>(v).unwrap();
        }
        table.write_all(b"\n").unwrap();
    }
    fs::write(path, table).unwrap();
}

struct Fixture {
    dir: tempfile::TempDir,
    sents: PathBuf,
    w2v: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let sents = dir.path().join("train.sents");
        fs::write(&sents, SENTS).unwrap();
        let w2v = dir.path().join("vectors.bin");
        w2v_table(&w2v);
        Self { dir, sents, w2v }
    }

    fn run(&self, name: &str, config: PreprocessConfig) -> PreprocessSummary {
        Preprocess::new(
            self.sents.clone(),
            self.w2v.clone(),
            self.dir.path().join("out"),
            name.to_string(),
            config,
        )
        .run()
        .unwrap()
    }
}

fn read<A, D>(npz: &mut NpzReader<File>, name: &str) -> Array<A, D>
where
    A: ReadableElement,
    D: Dimension,
{
    match npz.by_name(&format!("{}.npy", name)) {
        Ok(array) => array,
        Err(_) => npz.by_name(name).unwrap(),
    }
}

#[test]
fn bucketed() {
    let fixture = Fixture::new();
    let config = PreprocessConfig::default().with_max_len(10).with_seed(42);
    let summary = fixture.run("corpus", config);

    assert_eq!(summary.nb_pairs, 4);
    assert_eq!(summary.nb_kept, 3);
    assert_eq!(summary.vocabulary_size, 30);
    assert_eq!(summary.nb_pretrained, 2);
    assert_eq!(summary.dims, 3);
    assert_eq!(summary.max_lengths, [12, 4]);
    assert_eq!(summary.target_width, 5);
    assert_eq!(summary.buckets, vec![5, 8]);

    let vocab = fs::read_to_string(&summary.vocabulary_path).unwrap();
    let lines: Vec<&str> = vocab.lines().collect();
    assert_eq!(lines.len(), 30);
    assert_eq!(lines[0], "*EOS* 1");
    assert_eq!(lines[1], "The 2");
    assert_eq!(lines[12], "#### 13");
    assert_eq!(lines[29], "short 30");

    let mut npz = NpzReader::new(File::open(&summary.corpus_path).unwrap()).unwrap();

    let x_lens: Array1<i32> = read(&mut npz, "x_lens");
    assert_eq!(x_lens.to_vec(), vec![5, 8]);

    let x: Array2<i32> = read(&mut npz, "x_8");
    let y: Array2<i32> = read(&mut npz, "y_8");
    let ylen: Array1<i32> = read(&mut npz, "ylen_8");
    assert_eq!(x.dim(), (2, 8));
    assert_eq!(y.dim(), (2, 5));
    assert_eq!(ylen.len(), 2);
    assert_eq!(x.row(0).to_vec(), vec![2, 3, 4, 5, 6, 7, 8, 1]);
    assert_eq!(x.row(1).to_vec(), vec![12, 13, 14, 15, 16, 17, 8, 1]);
    assert_eq!(y.row(0).to_vec(), vec![2, 3, 4, 8, 1]);
    assert_eq!(y.row(1).to_vec(), vec![9, 17, 8, 1, 1]);
    assert_eq!(ylen.to_vec(), vec![5, 4]);

    let x: Array2<i32> = read(&mut npz, "x_5");
    assert_eq!(x.row(0).to_vec(), vec![9, 10, 11, 8, 1]);

    // the long pair is in no bucket
    for key in x_lens.iter() {
        let x: Array2<i32> = read(&mut npz, &format!("x_{}", key));
        assert!(x.ncols() <= 10);
        assert!(x.iter().all(|&id| id <= 17 || id == 30));
    }

    let w2v: Array2<f32> = read(&mut npz, "w2v");
    assert_eq!(w2v.dim(), (30, 3));
    assert!(w2v.row(0).iter().all(|&v| v == 0.0));
    assert_eq!(w2v.row(2).to_vec(), CAT.to_vec());
    assert_eq!(w2v.row(15).to_vec(), DOGS.to_vec());
    for (idx, row) in w2v.outer_iter().enumerate() {
        if idx != 2 && idx != 15 {
            assert!(row.iter().all(|v| (-0.25..=0.25).contains(v)));
        }
    }
}

#[test]
fn flat_layout() {
    let fixture = Fixture::new();
    let config = PreprocessConfig::default()
        .with_max_len(10)
        .with_layout(Layout::Flat);
    let summary = fixture.run("flat", config);
    assert!(summary.buckets.is_empty());
    assert_eq!(
        summary
            .arrays
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["w2v", "data_x", "data_y"]
    );

    let mut npz = NpzReader::new(File::open(&summary.corpus_path).unwrap()).unwrap();
    let data_x: Array2<i32> = read(&mut npz, "data_x");
    let data_y: Array2<i32> = read(&mut npz, "data_y");
    assert_eq!(data_x.dim(), (3, 8));
    assert_eq!(data_y.dim(), (3, 5));
    assert_eq!(data_x.row(1).to_vec(), vec![9, 10, 11, 8, 1, 1, 1, 1]);
}

#[test]
fn filtered_vocabulary() {
    let fixture = Fixture::new();
    let config = PreprocessConfig::default().with_vocab_filter(VocabFilter {
        min_freq: 2,
        max_vocab_size: 4,
    });
    let summary = fixture.run("filtered", config);
    assert_eq!(summary.vocabulary_size, 6);
    assert_eq!(summary.nb_kept, 4);
    assert_eq!(summary.nb_pretrained, 2);

    let vocab = fs::read_to_string(&summary.vocabulary_path).unwrap();
    assert_eq!(vocab, "*EOS* 1\n*UKT* 2\n. 3\nDogs 4\nThe 5\ncat 6\n");

    // ranked by frequency, ties in first occurrence order
    // `cat` and `*UKT*` are spliced, `*EOS*` is not
    let mut npz = NpzReader::new(File::open(&summary.corpus_path).unwrap()).unwrap();
    let w2v: Array2<f32> = read(&mut npz, "w2v");
    assert!(w2v.row(0).iter().all(|&v| v == 0.0));
    assert_eq!(w2v.row(1).to_vec(), UNKNOWN.to_vec());
    assert_eq!(w2v.row(5).to_vec(), CAT.to_vec());
}

#[test]
fn seeded_runs_match() {
    let fixture = Fixture::new();
    let first = fixture.run("a", PreprocessConfig::default().with_seed(7));
    let second = fixture.run("b", PreprocessConfig::default().with_seed(7));

    let mut a = NpzReader::new(File::open(&first.corpus_path).unwrap()).unwrap();
    let mut b = NpzReader::new(File::open(&second.corpus_path).unwrap()).unwrap();
    let a: Array2<f32> = read(&mut a, "w2v");
    let b: Array2<f32> = read(&mut b, "w2v");
    assert_eq!(a, b);

    let summary: PreprocessSummary = serde_json::from_reader(
        File::open(fixture.dir.path().join("out").join("a.summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary, first);
}
