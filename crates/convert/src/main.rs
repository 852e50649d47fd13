use clap::Parser;
use tracing::info;

use convert::boot;
use convert::cli::Cli;
use convert::conf::ConvertConfig;
use convert::run::{self, RunOptions};

fn main() -> anyhow::Result<()> {
    boot::init_logging();
    let cli = Cli::parse();

    let mut config = ConvertConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;
    info!(
        "Configuration: output_suffix={}, problems_suffix={}, json_output={}, report_stats={}",
        config.output_suffix, config.problems_suffix, config.json_output, config.report_stats
    );

    let pipeline = boot::pipeline()?;
    let options = RunOptions::resolve(&cli, &config);
    run::run(&pipeline, &options)?;
    Ok(())
}
