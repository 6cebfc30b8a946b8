use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Deserialize;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

use crate::bytecode::{Operand, OPCODE_BITS};
use crate::error::EncodeError;

/**
  Opcodes of the virtual machine.

  The discriminant of each variant is the numeric tag written into the low `OPCODE_BITS` bits of
  the instruction, so this enum is the opcode table: it is fixed at compile time and there is no
  other place the tags are written down. Every tag must be below `1 << OPCODE_BITS`.

  Operations parse from either their variant name or their short mnemonic, e.g. both
  `"LoadConstant"` and `"LOAD_CONST"` give `Operation::LoadConstant`. They display as the
  variant name.
*/
#[derive(
  StrumDisplay, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,       Eq,       PartialEq,        Debug,         Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(to_string = "LoadConstant", serialize = "LOAD_CONST")]
  LoadConstant = 14, // load_const( value )
  #[strum(to_string = "ReadMemory", serialize = "READ")]
  ReadMemory   = 61, // read( offset )
  #[strum(to_string = "WriteMemory", serialize = "WRITE")]
  WriteMemory  = 55, // write( addr )
  #[strum(to_string = "Subtract", serialize = "SUB")]
  Subtract     = 32, // sub
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Returns the size in BYTES of an instruction for this opcode.
  pub fn width(&self) -> usize {
    match self {
      Operation::LoadConstant => 5,
      Operation::ReadMemory   => 2,
      Operation::WriteMemory  => 4,
      Operation::Subtract     => 1,
    }
  }

  /// Number of bits the operand may occupy. Zero for operations without an operand.
  pub fn operand_bits(&self) -> u32 {
    match self {
      Operation::LoadConstant => 33,
      Operation::ReadMemory   => 5,
      Operation::WriteMemory  => 22,
      Operation::Subtract     => 0,
    }
  }

  /// Exclusive upper bound of the operand, or `None` if the operation takes no operand.
  pub fn operand_bound(&self) -> Option<Operand> {
    match self.operand_bits() {
      0    => None,
      bits => Some(1 << bits),
    }
  }

  /// The name of the field holding the operand in a source record.
  pub fn operand_field(&self) -> Option<&'static str> {
    match self {
      Operation::LoadConstant => Some("value"),
      Operation::ReadMemory   => Some("offset"),
      Operation::WriteMemory  => Some("addr"),
      Operation::Subtract     => None,
    }
  }

  pub fn arity(&self) -> usize {
    match self.operand_field() {
      Some(_) => 1,
      None    => 0
    }
  }
}

/// Holds the unencoded components of an instruction. Operands are not range checked until the
/// instruction is encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [Opcode:7][Value:33]
  LoadConstant { value: Operand },
  /// [Opcode:7][Offset:5][Zero:4]
  ReadMemory { offset: Operand },
  /// [Opcode:7][Address:22][Zero:3]
  WriteMemory { address: Operand },
  /// [Opcode:7][Zero:1]
  Subtract,
}

impl Instruction {
  pub fn operation(&self) -> Operation {
    match self {
      Instruction::LoadConstant { .. } => Operation::LoadConstant,
      Instruction::ReadMemory { .. }   => Operation::ReadMemory,
      Instruction::WriteMemory { .. }  => Operation::WriteMemory,
      Instruction::Subtract            => Operation::Subtract,
    }
  }

  pub fn operand(&self) -> Option<Operand> {
    match *self {
      Instruction::LoadConstant { value }  => Some(value),
      Instruction::ReadMemory { offset }   => Some(offset),
      Instruction::WriteMemory { address } => Some(address),
      Instruction::Subtract                => None,
    }
  }
}

/// The log line of an instruction: `A` is the opcode field and `B` the operand field.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let operation = self.operation();
    match self.operand() {
      Some(operand) => write!(f, "{}: A={}, B={}", operation, operation.code(), operand),
      None          => write!(f, "{}: A={}", operation, operation.code()),
    }
  }
}

/**
  One instruction as it is written in a source program, before the operation name is resolved.
  Only the operand field belonging to the named operation is consulted; the others are ignored.

  ```yaml
  - kind: LoadConstant
    value: 200
  - kind: ReadMemory
    offset: 3
  - opcode: SUB
  ```
*/
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
pub struct InstructionRecord {
  #[serde(alias = "opcode")]
  pub kind  : String,
  pub value : Option<Operand>,
  pub offset: Option<Operand>,
  pub addr  : Option<Operand>,
}

impl InstructionRecord {
  pub fn new<S: Into<String>>(kind: S) -> InstructionRecord {
    InstructionRecord {
      kind: kind.into(),
      ..InstructionRecord::default()
    }
  }

  /// Looks up an operand by its source field name.
  pub fn operand(&self, field: &str) -> Option<Operand> {
    match field {
      "value"  => self.value,
      "offset" => self.offset,
      "addr"   => self.addr,
      _        => None
    }
  }

  /// Sets an operand by its source field name. Unknown field names are ignored.
  pub fn set_operand(&mut self, field: &str, operand: Operand) {
    match field {
      "value"  => self.value = Some(operand),
      "offset" => self.offset = Some(operand),
      "addr"   => self.addr = Some(operand),
      _        => {}
    }
  }
}

impl TryFrom<&InstructionRecord> for Instruction {
  type Error = EncodeError;

  fn try_from(record: &InstructionRecord) -> Result<Instruction, EncodeError> {
    let operation = Operation::from_str(record.kind.trim()).map_err(|_| {
      EncodeError::UnknownOperation { name: record.kind.clone() }
    })?;

    let operand = |field: &'static str| {
      record.operand(field).ok_or(EncodeError::MissingOperand { operation, field })
    };

    let instruction =
      match operation {
        Operation::LoadConstant => Instruction::LoadConstant { value: operand("value")? },
        Operation::ReadMemory   => Instruction::ReadMemory { offset: operand("offset")? },
        Operation::WriteMemory  => Instruction::WriteMemory { address: operand("addr")? },
        Operation::Subtract     => Instruction::Subtract,
      };

    Ok(instruction)
  }
}

// Fails to compile if a tag does not fit in the opcode field.
const _: () = {
  assert!((Operation::LoadConstant as u8) < 1 << OPCODE_BITS);
  assert!((Operation::ReadMemory as u8) < 1 << OPCODE_BITS);
  assert!((Operation::WriteMemory as u8) < 1 << OPCODE_BITS);
  assert!((Operation::Subtract as u8) < 1 << OPCODE_BITS);
};
