use std::path::PathBuf;

use clap::Parser;

use crate::conf::ConvertConfig;

#[derive(Debug, Parser)]
#[command(name = "convert")]
#[command(version, about = "Convert dotted and piped log files into the tabbed encoding", long_about = None)]
pub struct Cli {
    /// Log file to convert
    pub input: PathBuf,

    /// Where converted lines go (default: input path + output suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where rejected lines go (default: input path + problems suffix)
    #[arg(short, long)]
    pub problems: Option<PathBuf>,

    /// TOML configuration file (default: $CONVERT_CONFIG_FILE or convert.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write converted entries as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Do not report run statistics
    #[arg(long)]
    pub no_stats: bool,
}

impl Cli {
    /// Command-line flags take priority over everything else.
    pub fn apply(&self, config: &mut ConvertConfig) {
        if self.json {
            config.json_output = true;
        }
        if self.no_stats {
            config.report_stats = false;
        }
    }
}
