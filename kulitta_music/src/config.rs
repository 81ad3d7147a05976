// Generation settings for the `generate` binary.
//
// `GenerateConfig` is plain serde data, loaded from a JSON file when one is
// given and otherwise defaulted. Every field has a default, so a config file
// only needs the fields it changes. Command-line flags arrive as `Overrides`
// and are applied on top by `GenerateConfig::assemble`, which validates last.

use crate::error::ConfigError;
use crate::mode::Mode;
use crate::param::{Dur, EN, MusicParam};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which stock rule table to generate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GrammarKind {
    /// Functional regions: tonic, subdominant, dominant.
    Tsd,
    /// Roman-numeral chord degrees.
    Roman,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// PRNG seed. `None` lets the binary pick one and log it.
    pub seed: Option<u64>,
    /// Number of production passes.
    pub iterations: usize,
    pub grammar: GrammarKind,
    pub mode: Mode,
    /// Tonic pitch class, 0 = C.
    pub key: u8,
    /// Length of the whole progression in measures.
    pub duration: Dur,
    /// Chords shorter than this are never split further.
    pub min_duration: Dur,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            seed: None,
            iterations: 4,
            grammar: GrammarKind::Roman,
            mode: Mode::Major,
            key: 0,
            duration: 4.0,
            min_duration: EN,
        }
    }
}

impl GenerateConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key >= 12 {
            return Err(ConfigError::Invalid(format!(
                "key {} is not a pitch class (0..12)",
                self.key
            )));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "duration {} must be positive",
                self.duration
            )));
        }
        if !(self.min_duration.is_finite() && self.min_duration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_duration {} must be positive",
                self.min_duration
            )));
        }
        let bad_custom =
            |offsets: &[u8]| offsets.is_empty() || offsets.iter().any(|&o| o >= 12);
        if matches!(&self.mode, Mode::Custom(offsets) if bad_custom(offsets)) {
            return Err(ConfigError::Invalid(
                "custom mode needs offsets in 0..12".to_string(),
            ));
        }
        Ok(())
    }

    /// Parameter of the start symbol.
    pub fn start_param(&self) -> MusicParam {
        MusicParam::new(self.duration, self.mode.clone(), self.key)
    }

    /// Replace every field that `overrides` sets. Fails on an unknown mode
    /// name, leaving the earlier fields already applied.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Result<(), ConfigError> {
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(iterations) = overrides.iterations {
            self.iterations = iterations;
        }
        if let Some(grammar) = overrides.grammar {
            self.grammar = grammar;
        }
        if let Some(name) = &overrides.mode {
            self.mode = parse_mode(name)?;
        }
        if let Some(key) = overrides.key {
            self.key = key;
        }
        if let Some(duration) = overrides.duration {
            self.duration = duration;
        }
        Ok(())
    }

    /// The configured seed, or a fresh one from the OS-seeded generator.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }

    /// The config file (or the defaults), then the flags, then validation.
    pub fn assemble(overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = match &overrides.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides)?;
        config.validate()?;
        Ok(config)
    }
}

/// Settings given on the command line. Unset fields keep the config value.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// JSON settings file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of production passes.
    #[arg(long)]
    pub iterations: Option<usize>,
    #[arg(long, value_enum)]
    pub grammar: Option<GrammarKind>,
    /// Mode name, e.g. major, minor, dorian.
    #[arg(long)]
    pub mode: Option<String>,
    /// Tonic pitch class, 0 = C.
    #[arg(long)]
    pub key: Option<u8>,
    /// Total length in measures.
    #[arg(long = "dur")]
    pub duration: Option<f64>,
}

/// Parse a mode name given on the command line.
pub fn parse_mode(name: &str) -> Result<Mode, ConfigError> {
    Mode::from_name(name).ok_or_else(|| ConfigError::UnknownMode(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = GenerateConfig::default();
        assert!(config.validate().is_ok());
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(GenerateConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            GenerateConfig::from_json(r#"{ "seed": 42, "grammar": "tsd", "mode": "dorian" }"#)
                .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.grammar, GrammarKind::Tsd);
        assert_eq!(config.mode, Mode::Dorian);
        assert_eq!(config.iterations, GenerateConfig::default().iterations);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            GenerateConfig::from_json(r#"{ "iterations": "many" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GenerateConfig::load(Path::new("/nonexistent/kulitta.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/kulitta.json"));
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            GenerateConfig {
                key: 12,
                ..Default::default()
            },
            GenerateConfig {
                duration: 0.0,
                ..Default::default()
            },
            GenerateConfig {
                min_duration: f64::NAN,
                ..Default::default()
            },
            GenerateConfig {
                mode: Mode::Custom(vec![]),
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))), "{config:?}");
        }
    }

    #[test]
    fn start_param_uses_tonal_context() {
        let config = GenerateConfig {
            mode: Mode::Minor,
            key: 9,
            duration: 2.0,
            ..Default::default()
        };
        let p = config.start_param();
        assert_eq!((p.dur, p.key, p.seq_dur), (2.0, 9, 2.0));
        assert!(p.is_minor());
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!(parse_mode("aeolian").unwrap(), Mode::Minor);
        assert!(matches!(parse_mode("bebop"), Err(ConfigError::UnknownMode(_))));
    }

    #[test]
    fn flags_beat_file_values() {
        let mut config =
            GenerateConfig::from_json(r#"{ "seed": 7, "key": 2, "mode": "minor" }"#).unwrap();
        let flags = Overrides {
            seed: Some(99),
            key: Some(9),
            grammar: Some(GrammarKind::Tsd),
            ..Default::default()
        };
        config.apply_overrides(&flags).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.key, 9);
        assert_eq!(config.grammar, GrammarKind::Tsd);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let json = r#"{ "seed": 7, "iterations": 9, "mode": "dorian", "duration": 2.0 }"#;
        let mut config = GenerateConfig::from_json(json).unwrap();
        let before = config.clone();
        config.apply_overrides(&Overrides::default()).unwrap();
        assert_eq!(config, before);
        assert_eq!(config.mode, Mode::Dorian);
    }

    #[test]
    fn explicit_seed_is_kept_and_missing_seed_is_drawn() {
        let seeded = GenerateConfig {
            seed: Some(5),
            ..Default::default()
        };
        assert_eq!(seeded.seed_or_random(), 5);
        let unseeded = GenerateConfig::default();
        let draws: Vec<u64> = (0..4).map(|_| unseeded.seed_or_random()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn unknown_mode_flag_is_an_error() {
        let flags = Overrides {
            mode: Some("bebop".to_string()),
            ..Default::default()
        };
        let err = GenerateConfig::assemble(&flags).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMode(ref name) if name == "bebop"));
        assert_eq!(err.to_string(), "unknown mode `bebop`");
    }

    #[test]
    fn assemble_reads_file_then_flags() {
        let name = format!("kulitta_assemble_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, r#"{ "iterations": 3, "key": 4 }"#).unwrap();
        let flags = Overrides {
            config: Some(path.clone()),
            key: Some(11),
            ..Default::default()
        };
        let config = GenerateConfig::assemble(&flags);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();
        assert_eq!(config.iterations, 3);
        assert_eq!(config.key, 11);
    }

    #[test]
    fn assemble_rejects_missing_file_and_invalid_flags() {
        let missing = Overrides {
            config: Some(PathBuf::from("/nonexistent/kulitta.json")),
            ..Default::default()
        };
        assert!(matches!(
            GenerateConfig::assemble(&missing),
            Err(ConfigError::Io { .. })
        ));
        let bad_key = Overrides {
            key: Some(12),
            ..Default::default()
        };
        assert!(matches!(
            GenerateConfig::assemble(&bad_key),
            Err(ConfigError::Invalid(_))
        ));
    }
}
