//! Basic command line handling.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p clargs-demos --example basic_cli -- --help
//! cargo run -p clargs-demos --example basic_cli -- -v input.txt
//! ```

use clargs_core::{ArityMode, Catalog, OptionDescriptor, OptionId, parse_args};

const HELP: OptionId = OptionId::Short('h');
const VERSION: OptionId = OptionId::Short('v');

fn main() {
    let catalog = match Catalog::new(vec![
        OptionDescriptor::new(HELP, Some("help"), ArityMode::Disallowed)
            .with_description("print this message and exit"),
        OptionDescriptor::new(VERSION, Some("version"), ArityMode::Disallowed)
            .with_description("print the version information and exit"),
    ]) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Invalid catalog: {e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = parse_args(&catalog, &args);
    if let Some(message) = outcome.error_message() {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }

    for occurrence in outcome.occurrences() {
        match occurrence.id {
            None => println!("Unknown arg: {}", occurrence.argument().unwrap_or_default()),
            Some(HELP) => {
                print_usage(&catalog);
                return;
            }
            Some(VERSION) => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                return;
            }
            Some(_) => {}
        }
    }
}

fn print_usage(catalog: &Catalog) {
    println!("Command-line arg parser demo");
    println!("Usage: basic_cli [options]");
    println!();
    println!("Options:");
    for descriptor in catalog {
        println!(
            "  {:<16} {}",
            descriptor.display_name(),
            descriptor.description().unwrap_or_default()
        );
    }
}
