extern crate clap;
#[macro_use] extern crate log;
extern crate term_grid;
extern crate tagasm;

use term_grid::{Grid, GridOptions, Direction, Filling};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tagasm::assembler::encoder::{encode_lines, Cell};
use tagasm::assembler::{lexer, listing};
use tagasm::cli::{self, EXIT_FAILURE, EXIT_USAGE};
use tagasm::logging::initialize_logging;

fn main() {
    let args = match cli::encoder_app().get_matches_safe() {
        Ok(args) => args,
        Err(err) => usage_error(err),
    };
    initialize_logging(args.occurrences_of("verbose"));

    let options = match cli::encode_options(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(EXIT_USAGE);
        },
    };

    debug!("Arguments:\n\tVerbosity: {}\n\tUnknown mnemonics: {}\n\tBase: {}\n\tOutfile: {}\n\tInfile: {}",
        tagasm::logging::level_for(args.occurrences_of("verbose")),
        options.unknown_mnemonic,
        options.base,
        args.value_of("output").unwrap_or("stdout"),
        args.value_of("INPUT").unwrap_or("")
    );

    // INPUT is required, clap already rejected a missing one.
    let ifile = args.value_of("INPUT").unwrap_or_default();
    let ipath = Path::new(ifile);

    let ifile = match File::open(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(EXIT_FAILURE);
        },
        Ok(file) => file,
    };

    let lines = match lexer::tokenize(Box::new(ifile)) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(EXIT_FAILURE);
        },
        Ok(lines) => lines,
    };

    let assembly = encode_lines(&lines, &options);

    if assembly.warnings > 0 {
        warn!("{} line(s) skipped.", assembly.warnings);
    }

    if args.is_present("print-debug") {
        eprintln!("{}", debug_grid(&assembly.cells));
    }

    let result = match args.value_of("output") {
        Some(filename) => {
            let opath = Path::new(filename);
            match File::create(&opath) {
                Err(err) => {
                    error!("fatal: unable to open output file `{}`: {}", opath.display(), err);
                    std::process::exit(EXIT_FAILURE);
                },
                Ok(file) => write_out(&mut BufWriter::new(file), ifile_name(ipath), &assembly.cells),
            }
        },
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_out(&mut lock, ifile_name(ipath), &assembly.cells)
        },
    };

    if let Err(err) = result {
        error!("fatal: unable to write listing: {}", err);
        std::process::exit(EXIT_FAILURE);
    }

    // Lines that failed were left out of the listing above.
    if !assembly.is_ok() {
        error!("{} line(s) failed to assemble and were left out.", assembly.errors.len());
    }
    std::process::exit(cli::assembly_status(&assembly));
}

fn ifile_name(path: &Path) -> &str {
    path.to_str().unwrap_or("<input>")
}

fn write_out<W: Write>(out: &mut W, name: &str, cells: &[Cell]) -> io::Result<()> {
    listing::write_listing(out, name, cells)?;
    out.flush()
}

fn debug_grid(cells: &[Cell]) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for cell in cells {
        grid.add(term_grid::Cell::from(format!("0x{:04X}:", cell.address)));
        grid.add(term_grid::Cell::from(format!("0x{:02X}", cell.value)));
        grid.add(term_grid::Cell::from("<=".to_string()));
        grid.add(term_grid::Cell::from(format!("{}", cell.annotation)));
    }

    grid.fit_into_columns(4).to_string()
}

fn usage_error(err: clap::Error) -> ! {
    match cli::usage_status(&err) {
        EXIT_USAGE => {
            eprintln!("{}", err.message);
            std::process::exit(EXIT_USAGE);
        },
        _ => err.exit(),
    }
}
