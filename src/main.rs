// Measure insert and delete throughput of OrderedTree and BalancedTree:
// * Generate N random keys for each size, N = 100, 1000, 10000 by default.
// * Bulk load a fresh tree of each kind with the keys, measure elapsed time.
// * Bulk delete the same keys from each tree, measure elapsed time.
//
// Set RUST_LOG=info to log every sample as it is measured.

use std::process;

use clap::{value_t, values_t, App, Arg, ArgMatches};
use log::{debug, error};

use avl_bench::perf::{self, Config};

fn main() {
    env_logger::init();

    let matches = App::new("avl-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Measure bulk insert and delete on unbalanced and AVL trees.")
        .arg(
            Arg::with_name("sizes")
                .long("sizes")
                .value_name("N,..")
                .help("Number of keys to measure with, comma separated")
                .takes_value(true)
                .use_delimiter(true),
        )
        .arg(
            Arg::with_name("range-factor")
                .long("range-factor")
                .value_name("F")
                .help("Keys are picked from 0..N*F")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for random keys, defaults to wall clock")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("validate")
                .long("validate")
                .help("Validate tree invariants after load and delete"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print report in JSON format"),
        )
        .get_matches();

    let config = make_config(&matches);
    debug!("{:?}", config);

    process::exit(match perf::run(&config) {
        Ok(report) => {
            if matches.is_present("json") {
                println!("{}", report.json());
            } else {
                report.pretty_print("");
            }
            0
        }
        Err(err) => {
            error!("{}", err);
            1
        }
    });
}

fn make_config(matches: &ArgMatches) -> Config {
    let mut config = Config::default();
    if matches.is_present("sizes") {
        config.sizes = values_t!(matches, "sizes", usize).unwrap_or_else(|e| e.exit());
    }
    if matches.is_present("range-factor") {
        config.range_factor = value_t!(matches, "range-factor", i64).unwrap_or_else(|e| e.exit());
    }
    if matches.is_present("seed") {
        config.seed = value_t!(matches, "seed", u128).unwrap_or_else(|e| e.exit());
    }
    config.validate = matches.is_present("validate");
    config
}
