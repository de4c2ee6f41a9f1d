//! This AST describes a parsed tagasm source file.
//!
//! Comments are prefixed with colons (:) and are single-line only.
//! Instructions are delimited by newlines; an instruction is a mnemonic
//! followed by any number of tagged operands.
//!
//! Supported mnemonics and their opcodes:
//!
//! ```text
//! nop  0    mov  1    add  2    sub  3
//! mul  4    div  5    call 6    jmp  7
//! cmp  8    cmpl 9    cmpg 10   ncmp 11
//! ```
//!
//! Operand tags:
//!
//! ```text
//! #   128
//! ##   64
//! $   192
//! %    32
//! %%  160
//! ```
//!
//! Example source file:
//!
//! ```text
//! :load something
//! mov #10 $4
//! :operands above 255 take two value cells
//! add %%300
//! nop
//! ```

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    Nop,
    Mov,
    Add,
    Sub,
    Mul,
    Div,
    Call,
    Jmp,
    Cmp,
    Cmpl,
    Cmpg,
    Ncmp,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl Opcode {
    /// Looks up a mnemonic. Mnemonics are case-sensitive.
    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        use Opcode::*;
        match s {
            "nop"  => Some(Nop),
            "mov"  => Some(Mov),
            "add"  => Some(Add),
            "sub"  => Some(Sub),
            "mul"  => Some(Mul),
            "div"  => Some(Div),
            "call" => Some(Call),
            "jmp"  => Some(Jmp),
            "cmp"  => Some(Cmp),
            "cmpl" => Some(Cmpl),
            "cmpg" => Some(Cmpg),
            "ncmp" => Some(Ncmp),
            _      => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            Nop  => "nop",
            Mov  => "mov",
            Add  => "add",
            Sub  => "sub",
            Mul  => "mul",
            Div  => "div",
            Call => "call",
            Jmp  => "jmp",
            Cmp  => "cmp",
            Cmpl => "cmpl",
            Cmpg => "cmpg",
            Ncmp => "ncmp",
        }
    }

    /// Returns the byte stored in the opcode cell.
    pub fn code(&self) -> u8 {
        use Opcode::*;
        match self {
            Nop  => 0,
            Mov  => 1,
            Add  => 2,
            Sub  => 3,
            Mul  => 4,
            Div  => 5,
            Call => 6,
            Jmp  => 7,
            Cmp  => 8,
            Cmpl => 9,
            Cmpg => 10,
            Ncmp => 11,
        }
    }
}

/// The kind marker that prefixes every operand.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tag {
    Hash,
    DoubleHash,
    Dollar,
    Percent,
    DoublePercent,
}

// Longest sigils first so `##5` never resolves to `#` followed by `#5`.
const SIGILS: [(&str, Tag); 5] = [
    ("##", Tag::DoubleHash),
    ("%%", Tag::DoublePercent),
    ("#",  Tag::Hash),
    ("$",  Tag::Dollar),
    ("%",  Tag::Percent),
];

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.sigil())
    }
}

impl Tag {
    /// Splits an operand token into its tag and the remaining literal text
    /// using longest-prefix match.
    pub fn split_prefix(token: &str) -> Option<(Tag, &str)> {
        SIGILS.iter()
            .find(|(sigil, _)| token.starts_with(sigil))
            .map(|(sigil, tag)| (*tag, &token[sigil.len()..]))
    }

    pub fn sigil(&self) -> &'static str {
        use Tag::*;
        match self {
            Hash          => "#",
            DoubleHash    => "##",
            Dollar        => "$",
            Percent       => "%",
            DoublePercent => "%%",
        }
    }

    /// Returns the byte stored in the tag cell.
    pub fn code(&self) -> u8 {
        use Tag::*;
        match self {
            Hash          => 0b1000_0000,
            DoubleHash    => 0b0100_0000,
            Dollar        => 0b1100_0000,
            Percent       => 0b0010_0000,
            DoublePercent => 0b1010_0000,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Operand {
    pub tag:   Tag,
    pub value: u16,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.value)
    }
}

impl Operand {
    /// Number of cells this operand occupies, tag cell included.
    pub fn width(&self) -> usize {
        if self.value > 0xFF { 3 } else { 2 }
    }
}

/// What produced a cell. Only used for the listing's last column.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Annotation {
    Mnemonic(Opcode),
    Tag(Tag),
    Literal(u16),
    Empty,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Annotation::Mnemonic(op) => write!(f, "{}", op),
            Annotation::Tag(tag)     => write!(f, "{}", tag),
            Annotation::Literal(n)   => write!(f, "{}", n),
            Annotation::Empty        => Ok(()),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode:   Opcode,
    pub operands: Vec<Operand>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

impl Instruction {
    /// Lays the instruction out as (value, annotation) pairs in emission
    /// order. Addresses are assigned later by the encoder.
    pub fn cells(&self) -> Vec<(u8, Annotation)> {
        let width = 1 + self.operands.iter().map(Operand::width).sum::<usize>();
        let mut out = Vec::with_capacity(width);

        out.push((self.opcode.code(), Annotation::Mnemonic(self.opcode)));
        for operand in &self.operands {
            out.push((operand.tag.code(), Annotation::Tag(operand.tag)));
            let n = operand.value;
            if n > 0xFF {
                out.push((((n >> 8) & 0xFF) as u8, Annotation::Literal(n)));
                out.push(((n & 0xFF) as u8, Annotation::Empty));
            } else {
                out.push((n as u8, Annotation::Literal(n)));
            }
        }

        out
    }
}
