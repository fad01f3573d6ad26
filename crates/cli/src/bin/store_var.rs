//! Store a value for later scripts of the same run

use clap::Parser;
use fridge::cmd::storage::StoreVarCommand;
use fridge::command::Command;

fn main() {
    fridge::report::install_hook();

    let command = StoreVarCommand::parse();

    fridge::report::exit(command.execute().map(|()| 0));
}
