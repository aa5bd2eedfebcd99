mod kinds;
mod render;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Render(args) => {
            let chart = render::build(args)?;
            output::emit(&chart, cli.pretty, args.output.as_deref())
        }
        Command::Kinds => output::emit(&kinds::registry(), cli.pretty, None),
    }
}
