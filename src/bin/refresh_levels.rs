//! Rebuilds the hanzi and vocabulary tables against the radicals table that
//! is already on disk.

use hsk_levels::{cli, hanzi, vocab};

fn main() {
  let inv = cli::start("");
  cli::run(|| {
    let (decomp, dict) = cli::load_sources(&inv.config)?;
    hanzi::build_hanzi_csv(&inv.config, &decomp, &dict)?;
    vocab::build_vocabulary_csv(&inv.config)?;
    Ok(())
  });
}
