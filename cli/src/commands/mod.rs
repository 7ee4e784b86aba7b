mod convert;
mod fields;

use crate::argparse::{Cli, Commands};
use crate::documents::render;
pub use convert::{handle_build_command, handle_parse_command, handle_show_command};
pub use fields::{handle_operators_command, handle_seed_command};

pub fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Commands::Build(args) => handle_build_command(&args)?,
        Commands::Parse(args) => handle_parse_command(&args)?,
        Commands::Show(args) => handle_show_command(&args)?,
        Commands::Operators(args) => handle_operators_command(&args)?,
        Commands::Seed(args) => handle_seed_command(&args)?,
    };
    println!("{}", render(&output, cli.format)?);
    Ok(())
}
