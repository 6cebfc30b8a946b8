/*!
  The human readable textual form of a program is called assembly. One instruction is written
  per line, with its operand either in parentheses or after a space:

  ```text
  LoadConstant(300)   # comment
  READ 5
  WriteMemory(0x1F00)
  SUB
  ```

  Names are resolved with the same `strum` derives used everywhere else, so both the variant
  names and the short mnemonics are accepted. A name that is not an operation is passed through
  unresolved and is reported when the instruction is encoded.
*/

use std::str::FromStr;

use nom::{
  branch::alt,
  bytes::complete::{tag_no_case, take_while1},
  character::complete::{char as one_char, digit1, hex_digit1, space0, space1},
  combinator::{all_consuming, map, map_res, opt, recognize},
  multi::separated_list0,
  sequence::{delimited, pair, preceded, tuple},
  IResult,
};

use crate::bytecode::{InstructionRecord, Operand, Operation};
use crate::error::ParseError;

fn mnemonic_p(input: &str) -> IResult<&str, &str> {
  take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn operand_p(input: &str) -> IResult<&str, Operand> {
  alt((
    map_res(
      preceded(tag_no_case("0x"), hex_digit1),
      |digits: &str| Operand::from_str_radix(digits, 16),
    ),
    map_res(
      recognize(pair(opt(one_char('-')), digit1)),
      |digits: &str| digits.parse::<Operand>(),
    ),
  ))(input)
}

fn operand_list_p(input: &str) -> IResult<&str, Vec<Operand>> {
  alt((
    preceded(
      space0,
      delimited(
        pair(one_char('('), space0),
        separated_list0(delimited(space0, one_char(','), space0), operand_p),
        pair(space0, one_char(')')),
      ),
    ),
    map(preceded(space1, operand_p), |operand| vec![operand]),
  ))(input)
}

/// Parses a whole line, less its comment, into a name and its operands.
fn instruction_p(input: &str) -> IResult<&str, (&str, Vec<Operand>)> {
  all_consuming(delimited(
    space0,
    tuple((
      mnemonic_p,
      map(opt(operand_list_p), Option::unwrap_or_default),
    )),
    space0,
  ))(input)
}

fn strip_comment(line: &str) -> &str {
  match line.find('#') {
    Some(start) => &line[..start],
    None        => line
  }
}

fn make_record(line: usize, name: &str, operands: Vec<Operand>)
  -> Result<InstructionRecord, ParseError>
{
  let mut record = InstructionRecord::new(name);

  let operation =
    match Operation::from_str(name) {
      Ok(operation) => operation,
      Err(_)        => return Ok(record),
    };

  match (operation.operand_field(), operands.as_slice()) {
    (Some(field), [operand]) => record.set_operand(field, *operand),
    (None, [])               => {}
    _ => {
      return Err(ParseError::WrongArity {
        line,
        operation,
        expected: operation.arity(),
        given   : operands.len(),
      });
    }
  }

  Ok(record)
}

/// Parses assembly text into records, in order. Line numbers in errors count from 1.
pub fn parse_assembly(text: &str) -> Result<Vec<InstructionRecord>, ParseError> {
  let mut records = Vec::new();

  for (index, line) in text.lines().enumerate() {
    let code = strip_comment(line);
    if code.trim().is_empty() {
      continue;
    }

    let (_rest, (name, operands)) = instruction_p(code).map_err(|_| {
      ParseError::Syntax { line: index + 1, text: line.trim().to_string() }
    })?;
    records.push(make_record(index + 1, name, operands)?);
  }

  Ok(records)
}
