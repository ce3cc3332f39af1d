// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments and hand them to the UI layer.
// - Argument errors are reported by clap (exit code 2); anything returned
//   from `ui::run` exits with code 1 and the error chain on stderr.

use clap::Parser;
use fb_poster::{cli::Cli, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ui::run(cli)
}
