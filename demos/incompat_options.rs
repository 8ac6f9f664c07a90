//! Mutually exclusive options.
//!
//! `--verbose` and `--quiet` each list the other as incompatible, so
//! supplying both fails the parse. Because the incompatible list replaces the
//! default, each may also be repeated.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p clargs-demos --example incompat_options -- -v -v extra
//! cargo run -p clargs-demos --example incompat_options -- --verbose --quiet
//! ```

use clargs_core::{ArityMode, Catalog, OptionDescriptor, OptionId, parse_args};

const VERBOSE: OptionId = OptionId::Short('v');
const QUIET: OptionId = OptionId::Short('q');

fn main() {
    let catalog = Catalog::new(vec![
        OptionDescriptor::new(VERBOSE, Some("verbose"), ArityMode::Disallowed)
            .with_description("Run command in verbose mode")
            .incompatible_with([QUIET]),
        OptionDescriptor::new(QUIET, Some("quiet"), ArityMode::Disallowed)
            .with_description("Run command in quiet mode")
            .incompatible_with([VERBOSE]),
    ]);
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Invalid catalog: {e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let occurrences = match parse_args(&catalog, &args).into_result() {
        Ok(occurrences) => occurrences,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for occurrence in &occurrences {
        match occurrence.id {
            None => println!("Unknown arg: {}", occurrence.argument().unwrap_or_default()),
            Some(VERBOSE) => println!("Verbose mode!"),
            Some(QUIET) => println!("Quiet mode!"),
            Some(_) => {}
        }
    }
}
