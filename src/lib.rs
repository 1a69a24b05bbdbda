//! Builds the HSK 1-3 radical, character and vocabulary tables with their
//! tian levels.
//!
//! The generators run in dependency order: [`radicals`] writes the radical
//! table, [`hanzi`] reads it to level characters, and [`vocab`] reads the
//! character table to level words.

pub mod anki_export;
pub mod cedict;
pub mod cli;
pub mod config;
pub mod decomp;
pub mod define;
pub mod entries;
pub mod error;
pub mod hanzi;
pub mod lookup;
pub mod pinyin;
pub mod radicals;
pub mod tables;
pub mod vocab;

pub use config::Config;
pub use error::{Error, Result};
pub use lookup::{Decomposer, Dictionary};
