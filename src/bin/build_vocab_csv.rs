use hsk_levels::{cli, vocab};

fn main() {
  let inv = cli::start("");
  cli::run(|| {
    vocab::build_vocabulary_csv(&inv.config)?;
    Ok(())
  });
}
