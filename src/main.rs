use hsk_levels::{cli, hanzi, radicals, vocab};

fn main() {
  let inv = cli::start("");
  cli::run(|| {
    let (decomp, dict) = cli::load_sources(&inv.config)?;
    // radicals feed hanzi levels, which feed vocabulary levels
    radicals::build_radicals_csv(&inv.config, &decomp)?;
    hanzi::build_hanzi_csv(&inv.config, &decomp, &dict)?;
    vocab::build_vocabulary_csv(&inv.config)?;
    Ok(())
  });
}
