//! Options with only a short form, or only a long form.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p clargs-demos --example no_alias -- -s --long
//! ```

use clargs_core::{ArityMode, Catalog, OptionDescriptor, OptionId, parse_args};

const SHORT: OptionId = OptionId::Short('s');
const LONG: OptionId = OptionId::LongOnly(1);

fn main() {
    let catalog = Catalog::new(vec![
        OptionDescriptor::new(SHORT, None, ArityMode::Disallowed)
            .with_description("option with only short form")
            .allow_duplicates(),
        OptionDescriptor::new(LONG, Some("long"), ArityMode::Disallowed)
            .with_description("option with long form"),
    ]);
    let catalog = match catalog {
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
            Some(SHORT) => println!("Received short option"),
            Some(LONG) => println!("Received long option"),
            Some(_) => {}
        }
    }
}
