use clap::CommandFactory;
use clap_complete::generate;

use crate::{Cli, CompletionsArgs};

/// Write a static completion script for `args.shell` to stdout.
///
/// Dynamic completion of preset keys is available through `COMPLETE=<shell> skb`.
pub fn run(args: CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut std::io::stdout());
}
