//! Command lines of the `tagasm` and `tagpack` binaries and the exit
//! statuses they map outcomes to.
use clap::{App, Arg, ArgMatches, ErrorKind};

use crate::assembler::encoder::{Assembly, EncodeOptions, MnemonicPolicy, BASE_ADDRESS};

/// Process exit status for a clean run.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit status for assembly, packing and I/O failures.
pub const EXIT_FAILURE: i32 = 1;
/// Process exit status for bad command lines.
pub const EXIT_USAGE: i32 = 2;

pub fn encoder_app() -> App<'static, 'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the assembly source file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the listing to an outfile instead of STDOUT"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .takes_value(false)
            .help("prints a table of the assembled cells to STDERR"))
        .arg(Arg::with_name("unknown-mnemonic")
            .long("unknown-mnemonic")
            .takes_value(true)
            .possible_values(&["skip", "warn", "error"])
            .help("what to do with lines whose mnemonic is not recognized [default: warn]"))
        .arg(Arg::with_name("base")
            .long("base")
            .takes_value(true)
            .help("address of the first cell [default: 20]"))
}

pub fn packer_app() -> App<'static, 'static> {
    App::new("tagpack")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Packs a tagasm binary listing into raw bytes.")
        .arg(Arg::with_name("INPUT")
            .help("Sets the listing file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the bytes to an outfile instead of STDOUT"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .takes_value(false)
            .help("prints the row to byte mapping to STDERR"))
}

/// Exit status for a command line clap refused. Help and version requests
/// come back as errors too, but they are successful runs.
pub fn usage_status(err: &clap::Error) -> i32 {
    match err.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => EXIT_SUCCESS,
        _ => EXIT_USAGE,
    }
}

pub fn encode_options(args: &ArgMatches) -> Result<EncodeOptions, String> {
    let unknown_mnemonic = match args.value_of("unknown-mnemonic") {
        Some(s) => s.parse::<MnemonicPolicy>()?,
        None => MnemonicPolicy::Warn,
    };

    let base = match args.value_of("base") {
        Some(s) => s.parse::<u32>().map_err(|e| format!("invalid base address `{}`: {}", s, e))?,
        None => BASE_ADDRESS,
    };

    Ok(EncodeOptions { base, unknown_mnemonic })
}

/// Failed lines still let the rest of the listing through, but the run
/// reports failure.
pub fn assembly_status(assembly: &Assembly) -> i32 {
    if assembly.is_ok() { EXIT_SUCCESS } else { EXIT_FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::encoder::encode_source;

    fn encoder_status(argv: &[&str]) -> i32 {
        match encoder_app().get_matches_from_safe(argv) {
            Ok(_) => EXIT_SUCCESS,
            Err(err) => usage_status(&err),
        }
    }

    fn packer_status(argv: &[&str]) -> i32 {
        match packer_app().get_matches_from_safe(argv) {
            Ok(_) => EXIT_SUCCESS,
            Err(err) => usage_status(&err),
        }
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(encoder_status(&["tagasm"]), EXIT_USAGE);
        assert_eq!(encoder_status(&["tagasm", "a.asm", "b.asm"]), EXIT_USAGE);
        assert_eq!(encoder_status(&["tagasm", "a.asm"]), EXIT_SUCCESS);

        assert_eq!(packer_status(&["tagpack"]), EXIT_USAGE);
        assert_eq!(packer_status(&["tagpack", "a.lst", "b.lst"]), EXIT_USAGE);
        assert_eq!(packer_status(&["tagpack", "a.lst"]), EXIT_SUCCESS);
    }

    #[test]
    fn test_help_and_version_succeed() {
        assert_eq!(encoder_status(&["tagasm", "--help"]), EXIT_SUCCESS);
        assert_eq!(encoder_status(&["tagasm", "--version"]), EXIT_SUCCESS);
        assert_eq!(packer_status(&["tagpack", "--help"]), EXIT_SUCCESS);
    }

    #[test]
    fn test_bad_policy_is_a_usage_error() {
        assert_eq!(encoder_status(&["tagasm", "--unknown-mnemonic", "loud", "a.asm"]), EXIT_USAGE);
    }

    #[test]
    fn test_encode_options() {
        let args = encoder_app().get_matches_from_safe(&["tagasm", "a.asm"]).unwrap();
        assert_eq!(encode_options(&args), Ok(EncodeOptions::default()));

        let args = encoder_app()
            .get_matches_from_safe(&["tagasm", "--unknown-mnemonic", "error", "--base", "0", "a.asm"])
            .unwrap();
        assert_eq!(encode_options(&args), Ok(EncodeOptions { base: 0, unknown_mnemonic: MnemonicPolicy::Error }));

        let args = encoder_app().get_matches_from_safe(&["tagasm", "--base", "0x10", "a.asm"]).unwrap();
        assert!(encode_options(&args).is_err());

        let args = encoder_app().get_matches_from_safe(&["tagasm", "--base", "4294967296", "a.asm"]).unwrap();
        assert!(encode_options(&args).is_err());
    }

    #[test]
    fn test_failed_lines_keep_the_rest() {
        let asm = encode_source("mov #10\nmov ^5\nfoo #1\nnop", &EncodeOptions::default());
        assert_eq!(assembly_status(&asm), EXIT_FAILURE);
        assert_eq!(asm.bytes(), vec![1, 128, 10, 0]);
        assert_eq!(asm.cells.last().map(|c| c.address), Some(23));

        let asm = encode_source("foo #1\nnop", &EncodeOptions::default());
        assert_eq!(assembly_status(&asm), EXIT_SUCCESS);
        assert_eq!(asm.warnings, 1);
    }
}
