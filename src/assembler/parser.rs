//! The Parser module turns the raw tokens of one source line into an
//! Instruction.
use super::ast::*;
use crate::error::{EncodeError, LiteralError};

/// Parses a whole instruction. The line is rejected as soon as any token
/// fails, so a bad line never produces a partial instruction.
pub fn parse_instruction<S: AsRef<str>>(mnemonic: &str, operands: &[S]) -> Result<Instruction, EncodeError> {
    let opcode = match Opcode::from_mnemonic(mnemonic) {
        Some(op) => op,
        None => return Err(EncodeError::UnknownMnemonic(mnemonic.to_owned())),
    };

    let operands = operands.iter()
        .map(|tok| parse_operand(tok.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Instruction { opcode, operands })
}

pub fn parse_operand(token: &str) -> Result<Operand, EncodeError> {
    let (tag, literal) = match Tag::split_prefix(token) {
        Some(split) => split,
        None => return Err(EncodeError::UnknownTag(token.to_owned())),
    };

    match parse_literal(literal) {
        Ok(value) => Ok(Operand { tag, value }),
        Err(reason) => Err(EncodeError::MalformedLiteral { operand: token.to_owned(), reason }),
    }
}

fn parse_literal(s: &str) -> Result<u16, LiteralError> {
    if s.is_empty() {
        return Err(LiteralError::Missing);
    }
    // from_str_radix would also take a leading `+`.
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LiteralError::NotDecimal);
    }

    u16::from_str_radix(s, 10).map_err(|_| LiteralError::OutOfRange)
}
