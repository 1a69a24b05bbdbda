//! Option handling shared by the binaries.

use std::path::Path;
use std::process;

use getopts::Options;
use tracing_subscriber::EnvFilter;

use crate::cedict::Dict;
use crate::config::Config;
use crate::decomp::CjkDecomp;
use crate::error::{Error, Result};

pub const LOG_ENV: &str = "HSK_LEVELS_LOG";

pub struct Invocation {
  pub config: Config,
  pub free: Vec<String>,
}

fn options() -> Options {
  let mut opts = Options::new();
  opts.optopt("c", "config", "YAML config file", "FILE");
  opts.optflag("v", "verbose", "log debug output");
  opts.optflag("h", "help", "print this help");
  opts
}

pub fn init_logging(verbose: bool) {
  let level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
  // a second init (e.g. from tests) is harmless
  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Parses the command line, sets up logging and loads the config. Exits on
/// `--help` and on bad arguments.
pub fn start(usage_args: &str) -> Invocation {
  let args: Vec<String> = std::env::args().collect();
  let program = args.first().map(String::as_str).unwrap_or("hsk_levels");
  let brief = format!("Usage: {} [options]{}", program, usage_args);
  let matches = match options().parse(&args[1.min(args.len())..]) {
    Ok(m) => m,
    Err(e) => {
      eprintln!("{}\n{}", e, options().usage(&brief));
      process::exit(1);
    },
  };
  if matches.opt_present("h") {
    print!("{}", options().usage(&brief));
    process::exit(0);
  }
  init_logging(matches.opt_present("v"));

  let config_path = matches.opt_str("c");
  match Config::load(config_path.as_deref().map(Path::new)) {
    Ok(config) => Invocation { config: config, free: matches.free },
    Err(e) => exit_with(e),
  }
}

/// Loads the decomposition and dictionary data the character generators
/// can't run without.
pub fn load_sources(config: &Config) -> Result<(CjkDecomp, Dict)> {
  let decomp = CjkDecomp::from_files(&config.decomposition_file, &config.radical_names_file)?;
  let dict = Dict::from_file(&config.cedict_file)?;
  Ok((decomp, dict))
}

fn exit_with(e: Error) -> ! {
  eprintln!("error: {}", e);
  process::exit(1);
}

/// Runs `body`, exiting with status 1 and the error message if it fails.
pub fn run<F>(body: F)
    where F: FnOnce() -> Result<()> {
  if let Err(e) = body() {
    exit_with(e);
  }
}
