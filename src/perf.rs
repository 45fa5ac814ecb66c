//! Performance measurement for [`OrderedTree`] and [`BalancedTree`].
//!
//! For every configured size:
//! * Generate `size` random keys from `0..size*range_factor`, duplicates
//!   are allowed.
//! * Load a fresh tree of each kind with the keys and measure the time
//!   taken to insert all of them.
//! * Delete the same sequence of keys and measure the time taken.
//!
//! Both kinds are measured with the same key sequence.

use std::{
    cmp,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use log::{debug, info};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::balance::{Avl, Balance, Unbalanced};
use crate::error::Error;
use crate::tree::Tree;

/// Default set of sizes to measure.
pub const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Keys are picked from `0..size*RANGE_FACTOR`.
pub const RANGE_FACTOR: i64 = 10;

/// Configuration for a benchmark [`run`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of keys to generate, one measurement per size.
    pub sizes: Vec<usize>,
    /// Keys for a given size are picked from `0..size*range_factor`.
    pub range_factor: i64,
    /// Seed for the random number generator.
    pub seed: u128,
    /// Validate tree invariants after load and after delete. Validation
    /// time is not included in the measurements.
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            sizes: SIZES.to_vec(),
            range_factor: RANGE_FACTOR,
            seed: make_seed(),
            validate: false,
        }
    }
}

/// Return a seed derived from the wall clock.
pub fn make_seed() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

/// Generate `size` pseudo-random keys from `0..size*range_factor`.
pub fn make_keys<R: Rng>(size: usize, range_factor: i64, rng: &mut R) -> Vec<i64> {
    let high = cmp::max((size as i64).saturating_mul(range_factor), 1);
    (0..size).map(|_| rng.gen_range(0, high)).collect()
}

/// Elapsed durations for a single tree kind and a single size.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Tree kind, identified by its name.
    pub kind: String,
    /// Number of keys inserted and then deleted, including duplicates.
    pub size: usize,
    /// Number of distinct keys, which is the tree's size after load.
    pub distinct: usize,
    /// Height of the tree after load.
    pub height: usize,
    pub insert: Duration,
    pub delete: Duration,
}

/// Measure bulk insert and bulk delete of `keys` on a fresh tree,
/// balanced by policy `B`.
pub fn measure<B>(name: &str, keys: &[i64], validate: bool) -> Result<Sample, Error>
where
    B: Balance,
{
    let mut tree: Tree<B> = Tree::new(name);

    let start = Instant::now();
    let distinct = tree.insert_batch(keys);
    let insert = start.elapsed();
    let height = tree.height();
    debug!("{}: loaded {}/{} keys, height {}", name, distinct, keys.len(), height);
    if validate {
        tree.validate()?;
    }

    let start = Instant::now();
    let removed = tree.delete_batch(keys);
    let delete = start.elapsed();
    debug!("{}: deleted {} keys", name, removed);
    if validate {
        tree.validate()?;
    }
    if removed != distinct || !tree.is_empty() {
        let (counted, expected) = (removed, distinct);
        return Err(Error::CountMismatch { counted, expected });
    }

    Ok(Sample {
        kind: name.to_string(),
        size: keys.len(),
        distinct,
        height,
        insert,
        delete,
    })
}

/// Run the benchmark described by `config`.
pub fn run(config: &Config) -> Result<Report, Error> {
    info!("seed {}", config.seed);
    let mut rng = SmallRng::from_seed(config.seed.to_le_bytes());

    let mut report = Report::new(config.seed);
    for &size in config.sizes.iter() {
        let keys = make_keys(size, config.range_factor, &mut rng);
        for sample in [
            measure::<Unbalanced>("bst", &keys, config.validate)?,
            measure::<Avl>("avl", &keys, config.validate)?,
        ]
        .iter()
        {
            info!(
                "{} size {}: insert {:?} delete {:?} height {}",
                sample.kind, sample.size, sample.insert, sample.delete, sample.height
            );
            report.push(sample.clone());
        }
    }
    Ok(report)
}

/// Collection of [`Sample`]s from a [`run`].
#[derive(Clone, Debug, Default)]
pub struct Report {
    seed: u128,
    samples: Vec<Sample>,
}

impl Report {
    fn new(seed: u128) -> Report {
        Report {
            seed,
            samples: vec![],
        }
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push(sample)
    }

    /// Return the seed used to generate keys.
    pub fn seed(&self) -> u128 {
        self.seed
    }

    /// Return all samples in measurement order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Return samples for tree `kind`, in measurement order.
    pub fn samples_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| s.kind == kind)
    }

    fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = vec![];
        for sample in self.samples.iter() {
            if !kinds.contains(&sample.kind.as_str()) {
                kinds.push(sample.kind.as_str());
            }
        }
        kinds
    }

    /// Pretty print elapsed durations in milliseconds, one line per tree
    /// kind and operation.
    pub fn pretty_print(&self, prefix: &str) {
        println!("{}seed {}", prefix, self.seed);
        for kind in self.kinds() {
            let sizes: Vec<usize> = self.samples_of(kind).map(|s| s.size).collect();
            let inserts: Vec<String> = self.samples_of(kind).map(|s| millis(s.insert)).collect();
            let deletes: Vec<String> = self.samples_of(kind).map(|s| millis(s.delete)).collect();
            println!("{}{} times (ms) for sizes {:?}", prefix, kind, sizes);
            println!("{}  insert: [{}]", prefix, inserts.join(", "));
            println!("{}  delete: [{}]", prefix, deletes.join(", "));
        }
    }

    /// Convert the report to JSON format, useful for plotting.
    pub fn json(&self) -> String {
        let samples: Vec<String> = self
            .samples
            .iter()
            .map(|s| {
                let strs = [
                    format!("\"kind\": \"{}\"", s.kind),
                    format!("\"size\": {}", s.size),
                    format!("\"distinct\": {}", s.distinct),
                    format!("\"height\": {}", s.height),
                    format!("\"insert_ms\": {}", millis(s.insert)),
                    format!("\"delete_ms\": {}", millis(s.delete)),
                ];
                "{ ".to_string() + strs.join(", ").as_str() + " }"
            })
            .collect();
        format!(
            "{{ \"seed\": {}, \"samples\": [{}] }}",
            self.seed,
            samples.join(", ")
        )
    }
}

fn millis(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64() * 1000_f64)
}
