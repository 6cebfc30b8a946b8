//! Error types. Every failure carries the offending value so the command line can report it
//! without parsing strings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::bytecode::{Operand, Operation};

/// Errors that can occur while turning a single instruction into bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
  /// An operand does not fit in its field.
  #[error("{operation}: {field} = {value} is out of range, must satisfy 0 <= {field} < {bound}")]
  OperandOutOfRange {
    operation: Operation,
    field    : &'static str,
    value    : Operand,
    bound    : Operand,
  },
  /// The operation name is not one of the VM's operations.
  #[error("unknown operation `{name}`")]
  UnknownOperation { name: String },
  /// The record for an operation that takes an operand does not have one.
  #[error("{operation} requires an integer `{field}` operand")]
  MissingOperand {
    operation: Operation,
    field    : &'static str,
  },
}

/// Errors in the text of a source program.
#[derive(Debug, Error)]
pub enum ParseError {
  #[error("invalid YAML: {0}")]
  Yaml(#[from] serde_yaml::Error),
  #[error("line {line}: cannot parse `{text}`")]
  Syntax { line: usize, text: String },
  #[error("line {line}: {operation} takes {expected} operand(s) but was given {given}")]
  WrongArity {
    line     : usize,
    operation: Operation,
    expected : usize,
    given    : usize,
  },
}

/// Errors that end an assembler run.
#[derive(Debug, Error)]
pub enum AssemblerError {
  #[error("input file `{}` not found", .path.display())]
  InputNotFound { path: PathBuf },
  #[error("could not parse `{}`: {source}", .path.display())]
  InputParse {
    path  : PathBuf,
    #[source]
    source: ParseError,
  },
  /// `position` counts instructions from 1.
  #[error("instruction {position}: {source}")]
  Encode {
    position: usize,
    #[source]
    source  : EncodeError,
  },
  #[error("cannot access `{}`: {source}", .path.display())]
  Io {
    path  : PathBuf,
    #[source]
    source: io::Error,
  },
}
