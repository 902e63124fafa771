use anyhow::{bail, Context, Result};
use clap::Parser;
use guard_patrol::CLIArgs;
use tracing::error;

fn main() -> Result<()> {
    guard_patrol::init_logging();
    let args = CLIArgs::parse();
    let lab = guard_patrol::read_lab(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory from given file({}).",
            args.input_path.display()
        )
    })?;

    let report = lab.patrol();
    if report.is_loop() {
        error!(guard = %lab.guard(), "initial patrol never leaves the laboratory");
        bail!("The guard never leaves given laboratory, can't count the visited positions.");
    }

    println!(
        "The guard will visit {} position(s) before leaving given laboratory.",
        report.visited().len()
    );

    Ok(())
}
