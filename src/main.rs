use std::path::PathBuf;

use clap::Parser;

use cellbrush::Config;

mod backend;

#[derive(Parser, Debug)]
#[command(name = "cellbrush")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CELLBRUSH_GIT_HASH"), ")"))]
#[command(about = "Multi-resolution pixel painter for the terminal")]
struct Cli {
    /// Snapshot file (.csnap) to load into the canvas at startup
    file: Option<PathBuf>,

    /// Canvas width in cells (defaults to the terminal width)
    #[arg(long, value_name = "CELLS", value_parser = clap::value_parser!(i32).range(4..=1000))]
    width: Option<i32>,

    /// Canvas height in cells (defaults to the terminal height minus the status rows)
    #[arg(long, value_name = "CELLS", value_parser = clap::value_parser!(i32).range(4..=1000))]
    height: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if cli.width.is_some() {
        config.canvas.width = cli.width;
    }
    if cli.height.is_some() {
        config.canvas.height = cli.height;
    }

    backend::run(config, cli.file)
}
