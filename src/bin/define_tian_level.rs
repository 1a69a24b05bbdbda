use std::process;

use hsk_levels::cli;
use hsk_levels::define::{require_terms, LevelIndex};

fn main() {
  let inv = cli::start(" <term1> [<term2> ...]");
  let terms = match require_terms(&inv.free) {
    Ok(terms) => terms,
    Err(usage) => {
      eprintln!("{}", usage);
      process::exit(1);
    },
  };
  cli::run(|| {
    let index = LevelIndex::build(&inv.config)?;
    for term in terms {
      println!("{}", index.describe(term));
    }
    Ok(())
  });
}
