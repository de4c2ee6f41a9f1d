//! Renders cells as the binary listing consumed by the packer.
//!
//! ```text
//! Assembled program demo.asm
//!  Mem Addr #  Mem Val  # Instruction
//! 0001 0100 # 0000 0001 # mov
//! 0001 0101 # 1000 0000 # #
//! 0001 0110 # 0000 1010 # 10
//! End Assembled Program
//! ```
use std::fmt;
use std::io::{self, Write};

use super::encoder::Cell;

pub const COLUMN_HEADER: &str = " Mem Addr #  Mem Val  # Instruction";
pub const FOOTER: &str = "End Assembled Program";

/// Formats a byte as two groups of four binary digits, e.g. `0001 0100`.
pub fn bits8(n: u8) -> String {
    format!("{:04b} {:04b}", n >> 4, n & 0x0F)
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // The address column is one byte wide.
        write!(f, "{} # {} # {}", bits8(self.address as u8), bits8(self.value), self.annotation)
    }
}

pub fn write_listing<W: Write + ?Sized>(out: &mut W, name: &str, cells: &[Cell]) -> io::Result<()> {
    if let Some(cell) = cells.iter().find(|c| c.address > 0xFF) {
        warn!("address {} does not fit the listing's 8-bit address column; addresses are truncated", cell.address);
    }

    writeln!(out, "Assembled program {}", name)?;
    writeln!(out, "{}", COLUMN_HEADER)?;
    for cell in cells {
        writeln!(out, "{}", cell)?;
    }
    writeln!(out, "{}", FOOTER)?;

    Ok(())
}
