extern crate clap;

use self::clap::{ArgGroup, ArgMatches};
use clap::{App, AppSettings, Arg};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Which algorithm family to run: selected on the command line and carried
/// through to the result record returned by the matching `TspSolver`
/// method, so there is exactly one definition of "which algorithm" shared
/// by CLI parsing and solve output.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Algorithm {
    DefaultRandom,
    Greedy,
    BranchAndBound,
    TwoOpt,
    Tournament,
}

#[derive(Debug)]
pub struct Config {
    pub scenario_file: PathBuf,
    pub out_filename: Option<PathBuf>,
    pub out_as_json: bool,
    pub algorithm: Algorithm,
    pub budget: Duration,
    pub seed: u64,
}

impl Config {
    pub fn from_args() -> Self {
        let matches = Self::make_app().get_matches();

        Self::make_config(matches)
    }

    pub fn from_iter<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::make_app().get_matches_from(itr);

        Self::make_config(matches)
    }

    fn make_config(matches: ArgMatches) -> Self {
        let scenario_file = PathBuf::from(matches.value_of("scenario_file").unwrap());
        let out_filename = matches.value_of("out").map(PathBuf::from);
        let out_as_json = matches.is_present("json");
        let algorithm = if matches.is_present("random") {
            Algorithm::DefaultRandom
        } else if matches.is_present("greedy") {
            Algorithm::Greedy
        } else if matches.is_present("branch_and_bound") {
            Algorithm::BranchAndBound
        } else if matches.is_present("two_opt") {
            Algorithm::TwoOpt
        } else if matches.is_present("tournament") {
            Algorithm::Tournament
        } else {
            unreachable!();
        };
        let budget = matches
            .value_of("budget")
            .unwrap()
            .parse()
            .map(Duration::from_secs_f64)
            .unwrap_or_else(|_| Duration::from_secs(600));
        let seed = matches
            .value_of("seed")
            .unwrap()
            .parse()
            .unwrap_or_default();

        Config {
            scenario_file,
            out_filename,
            out_as_json,
            algorithm,
            budget,
            seed,
        }
    }

    fn make_app<'a, 'b>() -> App<'a, 'b> {
        App::new(clap::crate_name!())
            .version(clap::crate_version!())
            .setting(AppSettings::ArgRequiredElseHelp)
            .arg(
                Arg::with_name("scenario_file")
                    .help("Scenario file (JSON cost matrix)")
                    .required(true),
            )
            .arg(
                Arg::with_name("out")
                    .long("out")
                    .value_name("filename")
                    .help("Write result to the specified file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("json")
                    .long("json")
                    .help("Output result as JSON"),
            )
            .arg(
                Arg::with_name("budget")
                    .long("budget")
                    .value_name("seconds")
                    .help("Wall-clock time budget in seconds")
                    .takes_value(true)
                    .default_value("600"),
            )
            .arg(
                Arg::with_name("seed")
                    .long("seed")
                    .value_name("n")
                    .help("PRNG seed, for reproducible randomized runs")
                    .takes_value(true)
                    .default_value("0"),
            )
            .group(
                ArgGroup::with_name("algorithm")
                    .args(&["random", "greedy", "branch_and_bound", "two_opt", "tournament"])
                    .required(true),
            )
            .arg(
                Arg::with_name("random")
                    .help("Baseline: a uniformly random tour")
                    .long("random"),
            )
            .arg(
                Arg::with_name("greedy")
                    .help("Deterministic-sweep nearest-neighbor greedy")
                    .long("greedy")
                    .short("g"),
            )
            .arg(
                Arg::with_name("branch_and_bound")
                    .help("Exact branch-and-bound over reduced cost matrices")
                    .long("branch-and-bound")
                    .short("b"),
            )
            .arg(
                Arg::with_name("two_opt")
                    .help("2-opt from a single greedy-random seed")
                    .long("two-opt")
                    .short("t"),
            )
            .arg(
                Arg::with_name("tournament")
                    .help("2-opt tournament over several seeds, refined with 3-opt")
                    .long("tournament"),
            )
    }
}
