//! This lexer splits tagasm source into lines of raw tokens.
use std::io::{self, BufRead, BufReader, Read};

/// One classified source line. Lines are numbered from 1.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Line {
    Blank(usize),
    Comment(usize),
    Instruction {
        line:     usize,
        mnemonic: String,
        operands: Vec<String>,
    },
}

impl Line {
    pub fn number(&self) -> usize {
        match self {
            Line::Blank(n) | Line::Comment(n) => *n,
            Line::Instruction { line, .. } => *line,
        }
    }
}

/// tagasm only supports a single instruction per line.
/// The expected sequence of tokens is MNEMONIC OPERAND*.
pub fn tokenize<T: Read + ?Sized>(reader: Box<T>) -> io::Result<Vec<Line>> {
    let mut lines = Vec::with_capacity(256);

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        lines.push(tokenize_line(&line?, index + 1));
    }

    Ok(lines)
}

pub fn tokenize_line(line: &str, line_num: usize) -> Line {
    let line = line.trim_end_matches('\r');

    if line.is_empty() {
        return Line::Blank(line_num);
    }
    // The comment marker only counts in the first column.
    if line.starts_with(':') {
        return Line::Comment(line_num);
    }

    let mut words = line.split_whitespace();
    match words.next() {
        Some(mnemonic) => Line::Instruction {
            line:     line_num,
            mnemonic: mnemonic.to_owned(),
            operands: words.map(str::to_owned).collect(),
        },
        // Whitespace only.
        None => Line::Blank(line_num),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ins(line: usize, mnemonic: &str, operands: &[&str]) -> Line {
        Line::Instruction {
            line,
            mnemonic: mnemonic.to_owned(),
            operands: operands.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_tokenize_line() {
        assert_eq!(tokenize_line("", 1), Line::Blank(1));
        assert_eq!(tokenize_line("\r", 1), Line::Blank(1));
        assert_eq!(tokenize_line("   \t", 2), Line::Blank(2));
        assert_eq!(tokenize_line(":this is ignored", 3), Line::Comment(3));
        assert_eq!(tokenize_line(":", 3), Line::Comment(3));
        assert_eq!(tokenize_line("nop", 4), ins(4, "nop", &[]));
        assert_eq!(tokenize_line("mov #10", 5), ins(5, "mov", &["#10"]));
        assert_eq!(tokenize_line("add %%300 $4\r", 6), ins(6, "add", &["%%300", "$4"]));
        assert_eq!(tokenize_line("add  %%300\t$4", 6), ins(6, "add", &["%%300", "$4"]));
        // Unknown mnemonics are the parser's problem, not the lexer's.
        assert_eq!(tokenize_line("foo #1", 7), ins(7, "foo", &["#1"]));
    }

    #[test]
    fn test_tokenize() {
        let asm_input = ":header comment\nmov #10\n\nadd %%300\n";
        let lines = tokenize(Box::new(asm_input.as_bytes())).unwrap();

        assert_eq!(lines, vec![
            Line::Comment(1),
            ins(2, "mov", &["#10"]),
            Line::Blank(3),
            ins(4, "add", &["%%300"]),
        ]);
        assert_eq!(lines.iter().map(Line::number).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }
}
