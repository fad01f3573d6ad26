//! Kubernetes manifest generator for a scripts directory

use clap::Parser;
use fridge::cmd::codegen::CodegenCommand;
use fridge::command::Command;

fn main() {
    fridge::report::install_hook();

    let command = CodegenCommand::parse();

    let result = fridge::init_logging(false, None).and_then(|()| command.execute());

    fridge::report::exit(result.map(|()| 0));
}
