/*!
  This module is responsible for the encoding of binary instructions.

  Encoding is a pure function of the instruction. Nothing is emitted for an instruction that
  fails to encode.
*/
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use super::{Instruction, InstructionRecord, Operand, Operation, Word, OPCODE_BITS};
use crate::error::EncodeError;

/// The bytes of one encoded instruction, least significant byte first. Its length is always
/// the width of its operation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EncodedInstruction {
  bytes: Vec<u8>
}

impl EncodedInstruction {
  /// Cuts `word` down to the low `width` bytes.
  fn from_word(word: Word, width: usize) -> EncodedInstruction {
    EncodedInstruction {
      bytes: word.to_le_bytes()[..width].to_vec()
    }
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  /// Always false, since every instruction is at least one byte.
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Formats the bytes as `0xBD, 0x02`.
  pub fn to_hex(&self) -> String {
    self.bytes
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<String>>()
        .join(", ")
  }
}

impl AsRef<[u8]> for EncodedInstruction {
  fn as_ref(&self) -> &[u8] {
    &self.bytes
  }
}

impl Display for EncodedInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_hex())
  }
}

/// Resolves the record's operation and encodes it.
pub fn encode(record: &InstructionRecord) -> Result<EncodedInstruction, EncodeError> {
  let instruction = Instruction::try_from(record)?;
  encode_instruction(&instruction)
}

/**
  Encodes the instruction into bytecode, checking that its operand fits the operand field of
  its operation.
*/
pub fn encode_instruction(instruction: &Instruction) -> Result<EncodedInstruction, EncodeError> {
  let encoded =
    match *instruction {

      Instruction::LoadConstant { value } => {
        // [Opcode:7][Value:33]
        let value = check_operand(Operation::LoadConstant, value)?;
        pack(Operation::LoadConstant, value)
      },

      Instruction::ReadMemory { offset } => {
        // [Opcode:7][Offset:5][Zero:4]
        let offset = check_operand(Operation::ReadMemory, offset)?;
        pack(Operation::ReadMemory, offset)
      },

      Instruction::WriteMemory { address } => {
        // [Opcode:7][Address:22][Zero:3]
        let address = check_operand(Operation::WriteMemory, address)?;
        pack(Operation::WriteMemory, address)
      },

      Instruction::Subtract => {
        // [Opcode:7][Zero:1]
        pack(Operation::Subtract, 0)
      },

    };

  Ok(encoded)
}

/// Returns the operand as a `Word` if `0 <= operand < operation.operand_bound()`.
fn check_operand(operation: Operation, operand: Operand) -> Result<Word, EncodeError> {
  let bound = operation.operand_bound().unwrap_or(1);
  match operand {
    value if (0..bound).contains(&value) => Ok(value as Word),
    value => Err(EncodeError::OperandOutOfRange {
      operation,
      field: operation.operand_field().unwrap_or("operand"),
      value,
      bound,
    }),
  }
}

fn pack(operation: Operation, operand: Word) -> EncodedInstruction {
  let word = (operand << OPCODE_BITS) | operation.code() as Word;
  EncodedInstruction::from_word(word, operation.width())
}


#[cfg(test)]
mod tests {
  use super::*;

  /// Reads the instruction back as a little-endian integer.
  fn to_word(encoded: &EncodedInstruction) -> Word {
    encoded
      .as_bytes()
      .iter()
      .rev()
      .fold(0, |word, &b| (word << 8) | b as Word)
  }

  fn assert_round_trip(instruction: Instruction) {
    let encoded = encode_instruction(&instruction).unwrap();
    let word = to_word(&encoded);
    let operation = instruction.operation();
    assert_eq!(encoded.len(), operation.width(), "{}", instruction);
    assert_eq!((word & 0x7F) as u8, operation.code(), "{}", instruction);
    assert_eq!(
      (word >> OPCODE_BITS) as Operand,
      instruction.operand().unwrap_or(0),
      "{}",
      instruction
    );
  }

  fn assert_out_of_range(instruction: Instruction) {
    match encode_instruction(&instruction) {
      Err(EncodeError::OperandOutOfRange { operation, value, .. }) => {
        assert_eq!(operation, instruction.operation());
        assert_eq!(Some(value), instruction.operand());
      }
      other => panic!("expected {} to be out of range, got {:?}", instruction, other),
    }
  }

  #[test]
  fn round_trip(){
    for &value in &[0, 1, 5, 127, 128, 0xFFFF, 1 << 32, (1 << 33) - 1] {
      assert_round_trip(Instruction::LoadConstant { value });
    }
    for offset in 0..32 {
      assert_round_trip(Instruction::ReadMemory { offset });
    }
    for &address in &[0, 1, 300, 0x2A_AAAA, (1 << 22) - 1] {
      assert_round_trip(Instruction::WriteMemory { address });
    }
    assert_round_trip(Instruction::Subtract);
  }

  #[test]
  fn read_memory(){
    // (5 << 7) | 61 = 701 = 0x02BD
    let encoded = encode_instruction(&Instruction::ReadMemory { offset: 5 }).unwrap();
    assert_eq!(encoded.as_bytes(), &[0xBD, 0x02]);
    assert_eq!(encoded.to_hex(), "0xBD, 0x02");
  }

  #[test]
  fn load_constant(){
    // (300 << 7) | 14 = 38414 = 0x960E
    let encoded = encode_instruction(&Instruction::LoadConstant { value: 300 }).unwrap();
    assert_eq!(encoded.as_bytes(), &[0x0E, 0x96, 0x00, 0x00, 0x00]);

    let encoded = encode_instruction(&Instruction::LoadConstant { value: (1 << 33) - 1 }).unwrap();
    assert_eq!(encoded.as_bytes(), &[0x8E, 0xFF, 0xFF, 0xFF, 0xFF]);
  }

  #[test]
  fn write_memory(){
    // (0x3FFFFF << 7) | 55 = 0x1FFFFFB7
    let encoded = encode_instruction(&Instruction::WriteMemory { address: (1 << 22) - 1 }).unwrap();
    assert_eq!(encoded.as_bytes(), &[0xB7, 0xFF, 0xFF, 0x1F]);
  }

  #[test]
  fn subtract_is_its_opcode(){
    let encoded = encode_instruction(&Instruction::Subtract).unwrap();
    assert_eq!(encoded.as_bytes(), &[32]);
  }

  #[test]
  fn fixed_width(){
    let widths = |instructions: &[Instruction]| {
      instructions
        .iter()
        .map(|i| encode_instruction(i).unwrap().len())
        .collect::<Vec<usize>>()
    };
    assert_eq!(
      widths(&[Instruction::LoadConstant { value: 0 }, Instruction::LoadConstant { value: 1 << 32 }]),
      vec![5, 5]
    );
    assert_eq!(
      widths(&[Instruction::ReadMemory { offset: 0 }, Instruction::ReadMemory { offset: 31 }]),
      vec![2, 2]
    );
    assert_eq!(
      widths(&[Instruction::WriteMemory { address: 0 }, Instruction::WriteMemory { address: 1 << 21 }]),
      vec![4, 4]
    );
  }

  #[test]
  fn read_memory_bounds(){
    assert!(encode_instruction(&Instruction::ReadMemory { offset: 0 }).is_ok());
    assert!(encode_instruction(&Instruction::ReadMemory { offset: 31 }).is_ok());
    assert_out_of_range(Instruction::ReadMemory { offset: -1 });
    assert_out_of_range(Instruction::ReadMemory { offset: 32 });
  }

  #[test]
  fn write_memory_bounds(){
    assert!(encode_instruction(&Instruction::WriteMemory { address: 0 }).is_ok());
    assert!(encode_instruction(&Instruction::WriteMemory { address: (1 << 22) - 1 }).is_ok());
    assert_out_of_range(Instruction::WriteMemory { address: -1 });
    assert_out_of_range(Instruction::WriteMemory { address: 1 << 22 });
  }

  #[test]
  fn load_constant_bounds(){
    assert!(encode_instruction(&Instruction::LoadConstant { value: 0 }).is_ok());
    assert_out_of_range(Instruction::LoadConstant { value: -1 });
    assert_out_of_range(Instruction::LoadConstant { value: 1 << 33 });
    // Must not wrap into range when narrowed to a `Word`.
    assert_out_of_range(Instruction::LoadConstant { value: 1 << 64 });
    assert_out_of_range(Instruction::WriteMemory { address: (1 << 64) + 1 });
  }

  #[test]
  fn range_error_names_field_and_bound(){
    let error = encode_instruction(&Instruction::ReadMemory { offset: 32 }).unwrap_err();
    assert!(matches!(
      error,
      EncodeError::OperandOutOfRange { field: "offset", value: 32, bound: 32, .. }
    ));
    assert_eq!(
      error.to_string(),
      "ReadMemory: offset = 32 is out of range, must satisfy 0 <= offset < 32"
    );
  }

  #[test]
  fn encode_record(){
    let mut record = InstructionRecord::new("WRITE");
    record.addr = Some(1);
    // (1 << 7) | 55 = 183
    assert_eq!(encode(&record).unwrap().as_bytes(), &[0xB7, 0x00, 0x00, 0x00]);
  }

  #[test]
  fn encode_unknown_record(){
    let record = InstructionRecord::new("FOO");
    assert!(matches!(encode(&record), Err(EncodeError::UnknownOperation { .. })));
  }
}
