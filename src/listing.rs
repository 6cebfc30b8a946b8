//! The program listing: each instruction next to the bytes it encoded to.

use prettytable::{format as TableFormat, Table};

use crate::assembler::Program;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

pub fn make_listing_table(program: &Program) -> Table {
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Offset", ubl->"Instruction", ubl->"Bytes"]);

  for entry in program.listing() {
    table.add_row(
      row![r->format!("{:04X}", entry.offset), entry.instruction, entry.encoded]
    );
  }
  table
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::assembler::assemble;
  use crate::bytecode::InstructionRecord;

  #[test]
  fn listing_rows(){
    let mut read = InstructionRecord::new("READ");
    read.offset = Some(5);
    let program = assemble(&[InstructionRecord::new("SUB"), read]).unwrap();

    let table = make_listing_table(&program);
    assert_eq!(table.len(), 2);

    let text = table.to_string();
    assert!(text.contains("Instruction"));
    assert!(text.contains("Subtract: A=32"));
    assert!(text.contains("0x20"));
    assert!(text.contains("ReadMemory: A=61, B=5"));
    assert!(text.contains("0xBD, 0x02"));
    assert!(text.contains("0001"));
  }

  #[test]
  fn empty_listing(){
    let table = make_listing_table(&Program::new());
    assert!(table.is_empty());
  }
}
