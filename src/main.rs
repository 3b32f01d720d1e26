use std::path::PathBuf;

use anyhow::bail;
use clap::{command, value_parser, Arg};
use context::Context;
use generator::generate;

mod context;
mod error;
mod generator;
mod index;
mod metadata;
mod renderer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .arg(
            Arg::new("root")
                .help("Project root containing assets/, writing.html and curation.html")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .get_matches();

    let Some(root) = matches.get_one::<PathBuf>("root") else {
        bail!("root must be given.");
    };
    if !root.is_dir() {
        bail!("root must be a directory.");
    }

    let ctx = Context::from_root(root);
    generate(&ctx)?;

    println!("Build complete.");
    Ok(())
}
