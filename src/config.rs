use crate::scheduler::{Algorithm, DEFAULT_QUANTUM};
use clap::{App, Arg, ArgMatches};
use std::{ffi::OsString, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Priority,
    RoundRobin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub workload: Option<PathBuf>,
    pub policy: Option<Policy>,
    pub quantum: u64,
    pub idle_gaps: bool,
    pub verbosity: u64,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Config::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let policy = match matches.value_of("algorithm") {
            Some("fcfs") => Some(Policy::Fcfs),
            Some("priority") => Some(Policy::Priority),
            Some("rr") => Some(Policy::RoundRobin),
            _ => None,
        };

        Ok(Self {
            workload: matches.value_of_os("workload").map(PathBuf::from),
            policy,
            quantum: parse_quantum(matches.value_of("quantum"))?,
            idle_gaps: matches.is_present("idle-gaps"),
            verbosity: matches.occurrences_of("verbose"),
        })
    }

    /// The algorithm to run once without the terminal UI, if one was chosen.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.policy.map(|policy| match policy {
            Policy::Fcfs => Algorithm::Fcfs {
                idle_gaps: self.idle_gaps,
            },
            Policy::Priority => Algorithm::Priority,
            Policy::RoundRobin => Algorithm::RoundRobin {
                quantum: self.quantum,
            },
        })
    }
}

const DEFAULT_QUANTUM_STR: &str = "3";

fn app() -> App<'static, 'static> {
    App::new("CPU scheduling simulator")
        .version(clap::crate_version!())
        .about("Simulates FCFS, priority and round robin scheduling over a fixed workload")
        .arg(
            Arg::with_name("workload")
                .short("w")
                .long("workload")
                .takes_value(true)
                .value_name("FILE")
                .help("Workload file with one \"pid arrival burst [priority]\" per line"),
        )
        .arg(
            Arg::with_name("algorithm")
                .short("a")
                .long("algorithm")
                .takes_value(true)
                .possible_values(&["fcfs", "priority", "rr"])
                .help("Run one algorithm and print the results instead of starting the UI"),
        )
        .arg(
            Arg::with_name("quantum")
                .short("q")
                .long("quantum")
                .takes_value(true)
                .default_value(DEFAULT_QUANTUM_STR)
                .validator(valid_quantum)
                .help("Time quantum for round robin"),
        )
        .arg(
            Arg::with_name("idle-gaps")
                .long("idle-gaps")
                .help("Let FCFS idle until each process arrives instead of serving back-to-back"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Log more (repeat for debug and trace output)"),
        )
}

fn parse_quantum(value: Option<&str>) -> Result<u64, clap::Error> {
    let value = value.unwrap_or(DEFAULT_QUANTUM_STR);
    value.parse().map_err(|_| {
        clap::Error::with_description(
            &format!("Invalid quantum: {}. Must be a non-negative integer", value),
            clap::ErrorKind::ValueValidation,
        )
    })
}

fn valid_quantum(value: String) -> Result<(), String> {
    value
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("Invalid quantum: {}. Must be a non-negative integer", value))
}
