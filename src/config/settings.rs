//! Settings module.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::core::Sex;

/// One experiment configuration: quotas, mate policy, and the name its
/// exported table is written under.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Experiment {
    pub name: String,
    pub males: usize,
    pub females: usize,
    pub avoid_mates: bool,
}

impl Experiment {
    pub fn quota(&self, sex: Sex) -> usize {
        match sex {
            Sex::Male => self.males,
            Sex::Female => self.females,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Rounds to run per experiment.
    pub rounds: usize,
    pub experiments: Vec<Experiment>,
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", String::from_utf8(output).map_err(|_| std::fmt::Error)?)
    }
}

impl Settings {
    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write() {
        let settings = Settings {
            rounds: 31,
            experiments: vec![
                Experiment {
                    name: "mate_agnostic".to_string(),
                    males: 3,
                    females: 4,
                    avoid_mates: false,
                },
                Experiment {
                    name: "no_mates".to_string(),
                    males: 3,
                    females: 4,
                    avoid_mates: true,
                },
            ],
        };
        let mut output = vec![];
        settings.write(&mut output).unwrap();
        let settings2 = Settings::read(&mut &output[..]).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    fn read_yaml() {
        let yaml = r#"
rounds: 10
experiments:
  - name: plain
    males: 2
    females: 3
    avoid_mates: false
"#;
        let settings = Settings::read(&mut yaml.as_bytes()).unwrap();
        assert_eq!(settings.rounds, 10);
        assert_eq!(settings.experiments.len(), 1);
        assert_eq!(settings.experiments[0].quota(Sex::Male), 2);
        assert_eq!(settings.experiments[0].quota(Sex::Female), 3);
    }
}
