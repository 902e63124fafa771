use anyhow::{bail, Context, Result};
use clap::Parser;
use guard_patrol::CLIArgs;
use tracing::{error, info};

fn main() -> Result<()> {
    guard_patrol::init_logging();
    let args = CLIArgs::parse();
    let mut lab = guard_patrol::read_lab(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory from given file({}).",
            args.input_path.display()
        )
    })?;

    let report = lab.patrol();
    if report.is_loop() {
        error!(guard = %lab.guard(), "initial patrol never leaves the laboratory");
        bail!("The guard never leaves given laboratory, can't search obstructions.");
    }
    info!(visited = report.visited().len(), "initial patrol exits");

    let loop_count = lab.count_trapping_obstructions();
    println!(
        "There is(are) {} location(s) which can make guard loops in given laboratory.",
        loop_count
    );

    Ok(())
}
