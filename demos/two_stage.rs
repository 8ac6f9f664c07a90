//! Two-stage parsing: global options, then a subcommand's own options.
//!
//! The first parse stops at the first piece of text (the subcommand name);
//! the unparsed remainder is handed to a second parse with the subcommand's
//! catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p clargs-demos --example two_stage -- -v build --release -j 4 target
//! ```

use clargs_core::{ArgsParser, ArityMode, Catalog, OptionDescriptor, OptionId, parse_args};

const VERBOSE: OptionId = OptionId::Short('v');
const RELEASE: OptionId = OptionId::Short('r');
const JOBS: OptionId = OptionId::Short('j');

fn catalogs() -> Result<(Catalog, Catalog), String> {
    let global = Catalog::new(vec![
        OptionDescriptor::new(VERBOSE, Some("verbose"), ArityMode::Disallowed)
            .with_description("print more output"),
    ])
    .map_err(|e| e.to_string())?;
    let build = Catalog::new(vec![
        OptionDescriptor::new(RELEASE, Some("release"), ArityMode::Disallowed)
            .with_description("build with optimisations"),
        OptionDescriptor::new(JOBS, Some("jobs"), ArityMode::Required)
            .with_description("number of parallel jobs"),
    ])
    .map_err(|e| e.to_string())?;
    Ok((global, build))
}

fn main() {
    let (global, build) = match catalogs() {
        Ok(catalogs) => catalogs,
        Err(e) => {
            eprintln!("Invalid catalog: {e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut first_poll = true;
    let first = ArgsParser::new(&global)
        .halt_when(|last| {
            // Nothing is committed yet on the first poll.
            let text_committed = !first_poll && last.is_none();
            first_poll = false;
            text_committed
        })
        .parse(&args);
    if let Some(message) = first.error_message() {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }

    let verbose = first.get_by_id(VERBOSE).is_some();
    let Some(subcommand) = first.last_text().and_then(|text| text.argument()) else {
        println!("No subcommand given (verbose: {verbose})");
        return;
    };
    println!("Subcommand: {subcommand} (verbose: {verbose})");

    if subcommand != "build" {
        eprintln!("Error: unknown subcommand {subcommand}");
        std::process::exit(1);
    }

    let second = parse_args(&build, first.unparsed());
    if let Some(message) = second.error_message() {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
    for occurrence in second.occurrences() {
        match occurrence.id {
            None => println!("  target: {}", occurrence.argument().unwrap_or_default()),
            Some(RELEASE) => println!("  release build"),
            Some(JOBS) => println!("  jobs: {}", occurrence.argument().unwrap_or_default()),
            Some(_) => {}
        }
    }
}
