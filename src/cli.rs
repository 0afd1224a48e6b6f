//! Command line arguments of the `casual-touch` binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Where actions are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Inject pointer and keyboard input into the X11 display
    X11,
    /// Only log the actions (dry run)
    Log,
}

impl SinkKind {
    /// Parse the sink name used in configuration files
    #[must_use]
    pub fn from_config(name: &str) -> Option<Self> {
        Self::from_str(name, true).ok()
    }
}

#[derive(Parser, Debug)]
#[command(name = "casual-touch", author, version, about = "Touchless cursor control from hand landmarks", long_about = None)]
pub struct Args {
    /// Landmark recording to replay (CSV: frame,timestamp_ms,id,x,y)
    #[arg(short, long, value_name = "CSV")]
    pub replay: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long, value_name = "YAML")]
    pub config: Option<PathBuf>,

    /// Action sink; overrides the configuration file
    #[arg(short, long, value_enum)]
    pub sink: Option<SinkKind>,

    /// Track a left hand (flips thumb classification)
    #[arg(long)]
    pub left_hand: bool,

    /// Pace replayed frames by their timestamps
    #[arg(long)]
    pub realtime: bool,

    /// Print the example configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_sink_names() {
        assert_eq!(SinkKind::from_config("x11"), Some(SinkKind::X11));
        assert_eq!(SinkKind::from_config("LOG"), Some(SinkKind::Log));
        assert_eq!(SinkKind::from_config("wayland"), None);
    }
}
