use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tags_input::{init_logging, EnvConfig};
use tags_replay::{load_options, replay, unescape, DEFAULT_WIDTH};

const USAGE: &str = "usage: tags_replay <options.json> <script> [width]";

fn main() -> Result<()> {
    let env = EnvConfig::from_env();
    init_logging(&env)?;

    let mut args = std::env::args().skip(1);
    let (Some(options_path), Some(script)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let width = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid width {raw:?}"))?,
        None => DEFAULT_WIDTH,
    };

    let options = load_options(&PathBuf::from(options_path), &env)?;
    let report = replay(options, &unescape(&script), width)?;

    for line in &report.frame {
        println!("{line}");
    }
    println!("{}", serde_json::to_string_pretty(&report.state)?);
    Ok(())
}
