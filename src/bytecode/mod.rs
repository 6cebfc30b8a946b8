/*!

  The VM uses variable length, little-endian instructions. Every instruction has a fixed size
  determined by its opcode alone, so a program is nothing more than the concatenation of its
  encoded instructions, with no headers, lengths, or padding between them.

  An instruction is built as a single integer and then truncated to its size in bytes:

  ```text
  [Opcode:7][Operand:N][Zero:rest]
  ```

  The opcode always inhabits the low 7 bits. The operand, if the operation has one, starts at
  bit 7. The sizes of instruction components are as follows:

  ```text
  Operation      Opcode   Size      Operand
  LoadConstant     14     5 bytes   value,   33 bits
  ReadMemory       61     2 bytes   offset,   5 bits
  WriteMemory      55     4 bytes   addr,    22 bits
  Subtract         32     1 byte    (none)
  ```

  Operands are unsigned. An operand that does not fit its field is an error rather than being
  silently truncated into the neighbouring bits.

*/

mod assembly;
mod binary;
mod instruction;

pub use assembly::parse_assembly;
pub use binary::{encode, encode_instruction, EncodedInstruction};
pub use instruction::{Instruction, InstructionRecord, Operation};

/// Integer type of an instruction operand as it appears in the source program. It is signed so
/// that a negative operand can be reported instead of wrapping, and wider than any operand field
/// so that an oversized operand reaches the range check intact.
pub type Operand = i128;

/// The register an instruction is packed into before being cut down to its size. The widest
/// instruction is 40 bits.
pub type Word = u64;

/// Number of low bits of every instruction occupied by the opcode.
pub const OPCODE_BITS: u32 = 7;
