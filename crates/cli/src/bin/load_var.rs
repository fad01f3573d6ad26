//! Print a value stored by an earlier script of the same run

use clap::Parser;
use fridge::cmd::storage::LoadVarCommand;
use fridge::command::Command;

fn main() {
    fridge::report::install_hook();

    let command = LoadVarCommand::parse();

    fridge::report::exit(command.execute().map(|value| {
        println!("{value}");
        0
    }));
}
