//! Options with required, optional and paired arguments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p clargs-demos --example option_arguments -- \
//!     --file=build.xml -S -Dversion=1.2 -Dmode=fast
//! cargo run -p clargs-demos --example option_arguments -- -f build.xml --secure=strict
//! ```

use clargs_core::{Catalog, OptionDescriptor, OptionFlag, OptionId, parse_args};

const FILE: OptionId = OptionId::Short('f');
const SECURE: OptionId = OptionId::Short('S');
const DEFINE: OptionId = OptionId::Short('D');

fn build_catalog() -> Result<Catalog, String> {
    let descriptors = vec![
        OptionDescriptor::from_flags(FILE, Some("file"), &[OptionFlag::ArgumentRequired])
            .map_err(|e| e.to_string())?
            .with_description("specify a file"),
        OptionDescriptor::from_flags(SECURE, Some("secure"), &[OptionFlag::ArgumentOptional])
            .map_err(|e| e.to_string())?
            .with_description("set security mode"),
        OptionDescriptor::from_flags(
            DEFINE,
            Some("define"),
            &[OptionFlag::ArgumentsRequired2, OptionFlag::DuplicatesAllowed],
        )
        .map_err(|e| e.to_string())?
        .with_description("define a key=value property"),
    ];
    Catalog::new(descriptors).map_err(|e| e.to_string())
}

fn main() {
    let catalog = match build_catalog() {
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
            Some(FILE) => println!("File: {}", occurrence.argument().unwrap_or_default()),
            Some(SECURE) => match occurrence.argument() {
                Some(mode) => println!("Secure Mode with arg: {mode}"),
                None => println!("Secure Mode with no args"),
            },
            Some(DEFINE) => println!(
                "Defining: {}={}",
                occurrence.argument_at(0).unwrap_or_default(),
                occurrence.argument_at(1).unwrap_or_default()
            ),
            Some(_) => {}
        }
    }

    // Repeated options resolve to their last occurrence.
    if let Some(file) = outcome.get_by_name("file") {
        println!("Build file: {}", file.argument().unwrap_or_default());
    }
}
