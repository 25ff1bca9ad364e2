pub mod cli;
pub mod config;
pub mod formats;
pub mod gallery;
pub mod model;
pub mod runtime;
pub mod tools;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
