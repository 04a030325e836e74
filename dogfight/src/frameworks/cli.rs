use clap::Parser;

use crate::domain::PlaneModel;

/// Two-player terminal dogfight, on one keyboard or across a relay.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dogfight", version)]
pub struct Args {
    /// Play against a remote opponent through a relay server
    #[arg(short = 'n', long)]
    pub network: bool,

    /// Relay host (defaults to the last one used)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Relay port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Write a debug log file to DOGFIGHT_LOG_DIR
    #[arg(short = 'L', long)]
    pub logging: bool,

    /// Show the debug info box above the arena
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Your callsign
    #[arg(short = 'c', long)]
    pub callsign: Option<String>,

    /// Second player's callsign (local games)
    #[arg(long)]
    pub opponent_callsign: Option<String>,

    /// Your plane: p51 or bf109
    #[arg(short = 'p', long)]
    pub plane: Option<PlaneModel>,

    /// Second player's plane (local games)
    #[arg(long)]
    pub opponent_plane: Option<PlaneModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_network_flags_are_given_then_they_parse() {
        let args = Args::try_parse_from([
            "dogfight", "-n", "-H", "10.0.0.2", "-P", "6000", "-c", "Ace", "-p", "bf109",
        ])
        .expect("valid args");

        assert!(args.network);
        assert_eq!(args.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(args.port, Some(6000));
        assert_eq!(args.callsign.as_deref(), Some("Ace"));
        assert_eq!(args.plane, Some(PlaneModel::Bf109));
    }

    #[test]
    fn when_plane_is_unknown_then_parsing_fails() {
        assert!(Args::try_parse_from(["dogfight", "--plane", "zero"]).is_err());
    }
}
