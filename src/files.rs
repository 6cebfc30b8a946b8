//! Reading source programs from disk and writing assembled programs back out. Both are
//! whole-file operations.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::assembler::Program;
use crate::bytecode::{parse_assembly, InstructionRecord};
use crate::error::{AssemblerError, ParseError};

/// The syntax of a source program, chosen by file extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceFormat {
  /// A YAML sequence of records.
  Yaml,
  /// One instruction per line, see `bytecode::parse_assembly`.
  Assembly,
}

impl SourceFormat {
  /// `.asm` and `.s` files are assembly. Everything else is read as YAML.
  pub fn from_path(path: &Path) -> SourceFormat {
    match path.extension().and_then(|extension| extension.to_str()) {
      Some("asm") | Some("s") => SourceFormat::Assembly,
      _                       => SourceFormat::Yaml,
    }
  }
}

/**
  Parses a YAML program. A document that is empty, only comments, or `null` is an empty
  program. Operands must be integers.
*/
pub fn parse_yaml(text: &str) -> Result<Vec<InstructionRecord>, ParseError> {
  let is_blank = text
    .lines()
    .map(str::trim)
    .all(|line| line.is_empty() || line.starts_with('#'));
  if is_blank {
    return Ok(vec![]);
  }

  let records: Option<Vec<InstructionRecord>> = serde_yaml::from_str(text)?;
  Ok(records.unwrap_or_default())
}

/// Reads and parses the program at `path`.
pub fn load_program(path: &Path) -> Result<Vec<InstructionRecord>, AssemblerError> {
  let text = fs::read_to_string(path).map_err(|error| {
    match error.kind() {
      io::ErrorKind::NotFound => AssemblerError::InputNotFound { path: path.to_path_buf() },
      _ => AssemblerError::Io { path: path.to_path_buf(), source: error },
    }
  })?;

  let format = SourceFormat::from_path(path);
  let records =
    match format {
      SourceFormat::Yaml     => parse_yaml(&text),
      SourceFormat::Assembly => parse_assembly(&text),
    }
    .map_err(|source| AssemblerError::InputParse { path: path.to_path_buf(), source })?;

  info!(path = %path.display(), ?format, instructions = records.len(), "loaded program");
  Ok(records)
}

/// Writes the program's bytes to `path`, replacing any existing file.
pub fn write_program(path: &Path, program: &Program) -> Result<(), AssemblerError> {
  fs::write(path, program.as_bytes())
    .map_err(|source| AssemblerError::Io { path: path.to_path_buf(), source })?;

  info!(path = %path.display(), bytes = program.len(), "wrote program");
  Ok(())
}
