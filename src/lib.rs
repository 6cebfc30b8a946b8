//! An assembler for a small virtual machine. Programs are lists of instructions, written as YAML
//! records or as assembly text, and assemble to a stream of fixed-width, bit-packed,
//! little-endian instructions. See `bytecode` for the instruction format.

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod app;
pub mod assembler;
pub mod bytecode;
pub mod error;
pub mod files;
pub mod listing;

pub use assembler::{assemble, ListingEntry, Program};
pub use bytecode::{encode, encode_instruction, EncodedInstruction, Instruction, InstructionRecord,
                   Operation};
pub use error::{AssemblerError, EncodeError, ParseError};
pub use files::{load_program, write_program};
