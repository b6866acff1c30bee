#![deny(missing_docs)]

//! # Swagger2Postman CLI
//!
//! Converts a Swagger 2.0 / OpenAPI 3.x definition into a Postman collection
//! with generated example payloads.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

mod convert;
mod error;
mod source;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Convert Swagger/OpenAPI definition to Postman collection")]
struct Cli {
    #[clap(flatten)]
    convert: convert::ConvertArgs,

    /// Enable debug logging.
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match convert::execute(&cli.convert) {
        Ok(path) => {
            println!(
                "Successfully converted Swagger to Postman collection: {}",
                path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
