//! tagasm is a two-stage toy assembler.
//!
//! The [`assembler`] turns mnemonic source into a binary listing of memory
//! cells, and the [`packer`] turns that listing back into raw bytes.
#[macro_use] extern crate log;

pub mod assembler;
pub mod cli;
pub mod error;
pub mod logging;
pub mod packer;

#[cfg(test)]
mod tests {
    use crate::assembler::encoder::{encode_source, EncodeOptions};
    use crate::assembler::listing::write_listing;
    use crate::packer::pack;

    fn listing_of(src: &str) -> (Vec<u8>, String) {
        let asm = encode_source(src, &EncodeOptions::default());
        assert!(asm.is_ok());
        let mut out: Vec<u8> = Vec::new();
        write_listing(&mut out, "test.asm", &asm.cells).unwrap();
        (asm.bytes(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_round_trip() {
        let src = "\
:a little program
mov #10 $4
add %%300 ##5
foo #1
cmpg %65535
ncmp
";
        let (direct, listing) = listing_of(src);
        assert_eq!(direct, vec![
            1, 128, 10, 192, 4,
            2, 160, 1, 44, 64, 5,
            10, 32, 255, 255,
            11,
        ]);
        assert_eq!(pack(&listing), Ok(direct));
    }

    #[test]
    fn test_documented_example_assembles() {
        let src = "\
:load something
mov #10 $4
:operands above 255 take two value cells
add %%300
nop
";
        let asm = encode_source(src, &EncodeOptions::default());
        assert!(asm.is_ok());
        assert_eq!(asm.warnings, 0);
        assert_eq!(asm.bytes(), vec![1, 128, 10, 192, 4, 2, 160, 1, 44, 0]);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let src = "call $1234\njmp #7\n";
        let (_, first) = listing_of(src);
        let (_, second) = listing_of(src);
        assert_eq!(first, second);
        assert_eq!(pack(&first), pack(&second));
    }

    #[test]
    fn test_round_trip_past_address_255() {
        let src = "nop\n".repeat(300);
        let (direct, listing) = listing_of(&src);
        assert_eq!(direct.len(), 300);
        assert_eq!(pack(&listing), Ok(direct));
    }
}
