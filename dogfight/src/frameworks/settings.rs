// Last-used choices, persisted as TOML between runs.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::PlaneModel;
use crate::frameworks::cli::Args;
use crate::frameworks::config;
use crate::use_cases::{Recruit, default_recruits};

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Encode(toml::ser::Error),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Encode(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub callsign_one: String,
    pub callsign_two: String,
    pub plane_one: PlaneModel,
    pub plane_two: PlaneModel,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        let [one, two] = default_recruits();
        Self {
            callsign_one: one.callsign,
            callsign_two: two.callsign,
            plane_one: one.plane,
            plane_two: two.plane,
            host: config::host(),
            port: config::port(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Command-line values win over whatever was persisted.
    pub fn apply(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(callsign) = &args.callsign {
            self.callsign_one = callsign.clone();
        }
        if let Some(callsign) = &args.opponent_callsign {
            self.callsign_two = callsign.clone();
        }
        if let Some(plane) = args.plane {
            self.plane_one = plane;
        }
        if let Some(plane) = args.opponent_plane {
            self.plane_two = plane;
        }
    }

    pub fn recruit_one(&self) -> Recruit {
        Recruit::new(self.callsign_one.clone(), self.plane_one)
    }

    pub fn recruit_two(&self) -> Recruit {
        Recruit::new(self.callsign_two.clone(), self.plane_two)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("dogfight-settings-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn when_file_is_missing_then_defaults_are_used() {
        let settings = Settings::load(&scratch_path("missing.toml")).expect("defaults");
        assert_eq!(settings.callsign_one, "Maverick");
        assert_eq!(settings.plane_two, PlaneModel::Bf109);
    }

    #[test]
    fn when_settings_are_saved_then_they_load_back() {
        let path = scratch_path("dogfight.toml");
        let mut settings = Settings::default();
        settings.callsign_one = "Ace".into();
        settings.port = 6000;

        settings.save(&path).expect("save");
        let loaded = Settings::load(&path).expect("load");

        assert_eq!(loaded, settings);
        let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn when_file_has_only_some_keys_then_the_rest_default() {
        let settings: Settings = toml::from_str("callsign_two = \"Hans\"\nplane_one = \"bf109\"\n").expect("partial");
        assert_eq!(settings.callsign_two, "Hans");
        assert_eq!(settings.plane_one, PlaneModel::Bf109);
        assert_eq!(settings.callsign_one, "Maverick");
    }

    #[test]
    fn when_cli_values_are_given_then_they_override_persisted_ones() {
        let mut settings = Settings::default();
        let args = Args {
            host: Some("10.1.1.1".into()),
            callsign: Some("Ace".into()),
            opponent_plane: Some(PlaneModel::P51),
            ..Args::default()
        };

        settings.apply(&args);

        assert_eq!(settings.host, "10.1.1.1");
        assert_eq!(settings.recruit_one().callsign, "Ace");
        assert_eq!(settings.recruit_two().plane, PlaneModel::P51);
        assert_eq!(settings.callsign_two, "Red Baron");
    }
}
