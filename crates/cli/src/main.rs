//! Fridge entry point
//!
//! This is the minimal main entry point that delegates to the library.

use clap::Parser;

fn main() {
    fridge::report::install_hook();

    let cli = fridge::Cli::parse();

    fridge::report::exit(fridge::run(&cli).map(|()| 0));
}
