use hsk_levels::{cli, hanzi};

fn main() {
  let inv = cli::start("");
  cli::run(|| {
    let (decomp, dict) = cli::load_sources(&inv.config)?;
    hanzi::build_hanzi_csv(&inv.config, &decomp, &dict)?;
    Ok(())
  });
}
