extern crate clap;
#[macro_use] extern crate log;
extern crate term_grid;
extern crate tagasm;

use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tagasm::cli::{self, EXIT_FAILURE, EXIT_USAGE};
use tagasm::logging::initialize_logging;
use tagasm::packer::{self, Row};

fn main() {
    let args = match cli::packer_app().get_matches_safe() {
        Ok(args) => args,
        Err(err) => match cli::usage_status(&err) {
            EXIT_USAGE => {
                eprintln!("{}", err.message);
                std::process::exit(EXIT_USAGE);
            },
            _ => err.exit(),
        },
    };
    initialize_logging(args.occurrences_of("verbose"));

    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());
    let listing = match fs::read_to_string(ipath) {
        Err(err) => {
            error!("fatal: unable to read listing `{}`: {}", ipath.display(), err);
            std::process::exit(EXIT_FAILURE);
        },
        Ok(text) => text,
    };

    let rows = match packer::pack_rows(&listing) {
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(EXIT_FAILURE);
        },
        Ok(rows) => rows,
    };

    if args.is_present("print-debug") {
        eprintln!("{}", debug_grid(&rows));
    }

    let bytes: Vec<u8> = rows.iter().map(|row| row.value).collect();

    let result = match args.value_of("output") {
        Some(filename) => fs::write(filename, &bytes),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&bytes).and_then(|_| lock.flush())
        },
    };

    if let Err(err) = result {
        error!("fatal: unable to write packed output: {}", err);
        std::process::exit(EXIT_FAILURE);
    }
    info!("wrote {} byte(s)", bytes.len());
}

fn debug_grid(rows: &[Row]) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for row in rows {
        grid.add(Cell::from(format!("{:>5}:", row.line)));
        grid.add(Cell::from(format!("0x{:02X}", row.address)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(format!("0x{:02X}", row.value)));
    }

    grid.fit_into_columns(4).to_string()
}
