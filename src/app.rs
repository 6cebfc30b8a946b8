//! One run of the assembler from the command line: load, assemble, optionally print the listing,
//! and write. Nothing is written unless the whole program assembles.

use std::path::PathBuf;

use tracing::warn;

use crate::assembler::assemble;
use crate::error::AssemblerError;
use crate::files::{load_program, write_program};
use crate::listing::make_listing_table;

/// Exit code of a run that failed for any reason.
pub const EXIT_FAILURE: i32 = 1;

/// Complete configuration for a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
  pub input_file : PathBuf,
  pub output_file: PathBuf,
  /// Print each instruction next to its encoded bytes.
  pub test       : bool,
}

/// How a successful run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
  /// The program had no instructions and no output was written.
  Empty,
  /// The program was written; `bytes` is its size.
  Written { bytes: usize },
}

pub fn run(config: &Config) -> Result<Outcome, AssemblerError> {
  let records = load_program(&config.input_file)?;

  if records.is_empty() {
    warn!(path = %config.input_file.display(), "empty program");
    return Ok(Outcome::Empty);
  }

  let program = assemble(&records)?;

  if config.test {
    make_listing_table(&program).printstd();
  }

  write_program(&config.output_file, &program)?;
  Ok(Outcome::Written { bytes: program.len() })
}

/// The message printed for each kind of failure.
pub fn describe(error: &AssemblerError) -> String {
  match error {
    AssemblerError::InputNotFound { .. } => format!("Error: {}", error),
    AssemblerError::InputParse { .. }    => format!("Parse error: {}", error),
    AssemblerError::Encode { .. }        => format!("Encoding error: {}", error),
    AssemblerError::Io { .. }            => format!("I/O error: {}", error),
  }
}

pub fn exit_code(result: &Result<Outcome, AssemblerError>) -> i32 {
  match result {
    Ok(_)  => 0,
    Err(_) => EXIT_FAILURE,
  }
}
