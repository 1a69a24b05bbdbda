use hsk_levels::cli;
use hsk_levels::decomp::CjkDecomp;
use hsk_levels::radicals;

fn main() {
  let inv = cli::start("");
  cli::run(|| {
    let config = &inv.config;
    let decomp = CjkDecomp::from_files(&config.decomposition_file, &config.radical_names_file)?;
    radicals::build_radicals_csv(config, &decomp)?;
    Ok(())
  });
}
