//! The Assembler module is in charge of taking a
//! tagasm source file and producing its memory cells
//! and their binary listing.
//!
//! It does this with a line lexer, a per-line parser
//! into the AST, and an encoder that threads the address
//! counter through the program.

pub mod ast;
pub mod encoder;
pub mod lexer;
pub mod listing;
pub mod parser;
