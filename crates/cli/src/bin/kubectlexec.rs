//! Run a command in a sibling container of this pod

use clap::Parser;
use fridge::cmd::remote::RemoteCommand;
use fridge::command::Command;

fn main() {
    fridge::report::install_hook();

    let command = RemoteCommand::parse();

    let result = fridge::init_logging(false, None).and_then(|()| command.execute());

    fridge::report::exit(result);
}
