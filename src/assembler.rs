//! Runs the encoder over a whole program. Instructions are encoded strictly in order and their
//! bytes are appended to a single buffer, so the position of an instruction in the output is
//! the sum of the sizes of the instructions before it.

use std::convert::TryFrom;

use tracing::{debug, info};

use crate::bytecode::{encode_instruction, EncodedInstruction, Instruction, InstructionRecord};
use crate::error::AssemblerError;

/// One line of the program listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingEntry {
  /// Byte offset of the instruction in the program.
  pub offset     : usize,
  pub instruction: Instruction,
  pub encoded    : EncodedInstruction,
}

/// An assembled program: the concatenated instruction bytes and, for diagnostics, what each
/// instruction encoded to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
  bytes  : Vec<u8>,
  listing: Vec<ListingEntry>,
}

impl Program {
  pub fn new() -> Program {
    Program::default()
  }

  pub fn push(&mut self, instruction: Instruction, encoded: EncodedInstruction) {
    self.bytes.extend_from_slice(encoded.as_bytes());
    self.listing.push(ListingEntry {
      offset: self.bytes.len() - encoded.len(),
      instruction,
      encoded,
    });
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.bytes
  }

  pub fn listing(&self) -> &[ListingEntry] {
    &self.listing
  }

  /// Size of the program in bytes.
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

/**
  Encodes every record in order. The first record that fails to encode ends the run; no bytes
  are produced for it and the error records its position, counting from 1.
*/
pub fn assemble(records: &[InstructionRecord]) -> Result<Program, AssemblerError> {
  let mut program = Program::new();

  for (index, record) in records.iter().enumerate() {
    let encode_error = |source| AssemblerError::Encode { position: index + 1, source };

    let instruction = Instruction::try_from(record).map_err(encode_error)?;
    let encoded     = encode_instruction(&instruction).map_err(encode_error)?;

    debug!(offset = program.len(), bytes = %encoded, "{}", instruction);
    program.push(instruction, encoded);
  }

  info!(instructions = program.listing().len(), bytes = program.len(), "assembled program");
  Ok(program)
}
