//! Assigns addresses to parsed instructions and collects the resulting
//! memory cells.
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use super::ast::Annotation;
use super::lexer::{tokenize_line, Line};
use super::parser::parse_instruction;
use crate::error::{EncodeError, LineError};

/// Address of the first emitted cell.
pub const BASE_ADDRESS: u32 = 20;

/// One byte of the assembled program.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    pub address:    u32,
    pub value:      u8,
    pub annotation: Annotation,
}

/// What to do with a line whose mnemonic is not in the opcode table.
/// The line never emits cells; only the reporting differs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MnemonicPolicy {
    Skip,
    Warn,
    Error,
}

impl FromStr for MnemonicPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip"  => Ok(MnemonicPolicy::Skip),
            "warn"  => Ok(MnemonicPolicy::Warn),
            "error" => Ok(MnemonicPolicy::Error),
            _ => Err(format!("unknown mnemonic policy `{}`", s)),
        }
    }
}

impl fmt::Display for MnemonicPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MnemonicPolicy::Skip  => write!(f, "skip"),
            MnemonicPolicy::Warn  => write!(f, "warn"),
            MnemonicPolicy::Error => write!(f, "error"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EncodeOptions {
    pub base: u32,
    pub unknown_mnemonic: MnemonicPolicy,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { base: BASE_ADDRESS, unknown_mnemonic: MnemonicPolicy::Warn }
    }
}

/// Carries the address counter across lines.
#[derive(Debug)]
pub struct Encoder {
    next_address: u32,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Encoder::with_base(BASE_ADDRESS)
    }

    pub fn with_base(base: u32) -> Self {
        Encoder { next_address: base }
    }

    pub fn next_address(&self) -> u32 {
        self.next_address
    }

    /// Encodes one source line. Blank and comment lines yield no cells.
    /// A failing line leaves the address counter untouched.
    pub fn encode_line(&mut self, line: &str) -> Result<Vec<Cell>, EncodeError> {
        match tokenize_line(line, 0) {
            Line::Instruction { mnemonic, operands, .. } => self.encode_tokens(&mnemonic, &operands),
            Line::Blank(_) | Line::Comment(_) => Ok(Vec::new()),
        }
    }

    fn encode_tokens(&mut self, mnemonic: &str, operands: &[String]) -> Result<Vec<Cell>, EncodeError> {
        let ins = parse_instruction(mnemonic, operands)?;
        let laid_out = ins.cells();

        // The counter must stay strictly increasing, so refuse a line whose
        // cells would run past u32::MAX instead of wrapping.
        let start = self.next_address;
        let end = match u32::try_from(laid_out.len()).ok().and_then(|n| start.checked_add(n)) {
            Some(end) => end,
            None => return Err(EncodeError::AddressOverflow(start)),
        };

        let cells = laid_out.into_iter()
            .zip(start..end)
            .map(|((value, annotation), address)| Cell { address, value, annotation })
            .collect();
        self.next_address = end;

        Ok(cells)
    }
}

/// The outcome of encoding a whole source file.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Assembly {
    pub cells:    Vec<Cell>,
    pub errors:   Vec<LineError>,
    pub warnings: usize,
}

impl Assembly {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The raw bytes the cells stand for, in address order.
    pub fn bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.value).collect()
    }
}

/// Encodes every line of `source`. See [`encode_lines`].
pub fn encode_source(source: &str, options: &EncodeOptions) -> Assembly {
    let lines: Vec<Line> = source.lines()
        .enumerate()
        .map(|(index, text)| tokenize_line(text, index + 1))
        .collect();

    encode_lines(&lines, options)
}

/// Encodes already tokenized lines, applying `options.unknown_mnemonic` to
/// lines with an unrecognized mnemonic. Other line errors are collected and
/// encoding continues with the next line.
pub fn encode_lines(lines: &[Line], options: &EncodeOptions) -> Assembly {
    let mut encoder = Encoder::with_base(options.base);
    let mut assembly = Assembly::default();

    for source_line in lines {
        let (line_num, mnemonic, operands) = match source_line {
            Line::Instruction { line, mnemonic, operands } => (*line, mnemonic, operands),
            _ => continue,
        };

        match encoder.encode_tokens(mnemonic, operands) {
            Ok(mut cells) => {
                debug!("line {}: {} cell(s) from `{}`", line_num, cells.len(), mnemonic);
                assembly.cells.append(&mut cells);
            },
            Err(kind @ EncodeError::UnknownMnemonic(_)) => match options.unknown_mnemonic {
                MnemonicPolicy::Skip => debug!("line {}: skipped, {}", line_num, kind),
                MnemonicPolicy::Warn => {
                    assembly.warnings += 1;
                    warn!("line {}: skipped, {}", line_num, kind);
                },
                MnemonicPolicy::Error => {
                    error!("line {}: {}", line_num, kind);
                    assembly.errors.push(LineError { line: line_num, kind });
                },
            },
            Err(kind) => {
                error!("line {}: {}", line_num, kind);
                assembly.errors.push(LineError { line: line_num, kind });
            },
        }
    }

    info!("encoded {} cell(s), next address {}", assembly.cells.len(), encoder.next_address());
    assembly
}
