use crate::error::ConfigError;
use crate::math::*;
use crate::renderer::{DEFAULT_BATCH_SIZE, DEFAULT_REPORT_INTERVAL};

use super::cameras::find_preset;

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, warn};

pub const DEFAULT_THREADS: i64 = 1;
pub const DEFAULT_WIDTH: i64 = 640;
pub const DEFAULT_HEIGHT: i64 = 480;

#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub origin: Point3,
    pub focal_offset: Vec3,
}

/// Raw settings as read from a config file or collected from the command line. Every field is
/// optional so that layers can be merged before validation.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TOMLConfig {
    pub threads: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub preset: Option<String>,
    pub output_file: Option<String>,
    pub seed: Option<u64>,
    pub shuffle: Option<bool>,
    pub batch_size: Option<i64>,
    pub report_interval_ms: Option<u64>,
    pub show_progress: Option<bool>,
}

impl TOMLConfig {
    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: TOMLConfig) -> TOMLConfig {
        TOMLConfig {
            threads: overrides.threads.or(self.threads),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            preset: overrides.preset.or(self.preset),
            output_file: overrides.output_file.or(self.output_file),
            seed: overrides.seed.or(self.seed),
            shuffle: overrides.shuffle.or(self.shuffle),
            batch_size: overrides.batch_size.or(self.batch_size),
            report_interval_ms: overrides.report_interval_ms.or(self.report_interval_ms),
            show_progress: overrides.show_progress.or(self.show_progress),
        }
    }
}

/// Validated settings for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub threads: usize,
    pub resolution: Resolution,
    pub mesh_file: PathBuf,
    pub output_file: PathBuf,
    pub camera: CameraSettings,
    pub seed: Option<u64>,
    pub shuffle: bool,
    pub batch_size: usize,
    pub report_interval: Duration,
    pub show_progress: bool,
}

fn positive(value: i64, errors: &mut Vec<ConfigError>, err: fn(i64) -> ConfigError) -> usize {
    if value <= 0 {
        errors.push(err(value));
        0
    } else {
        value as usize
    }
}

impl TryFrom<TOMLConfig> for RenderSettings {
    type Error = ConfigError;

    fn try_from(data: TOMLConfig) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();

        let height = positive(
            data.height.unwrap_or(DEFAULT_HEIGHT),
            &mut errors,
            ConfigError::InvalidHeight,
        );
        let width = positive(
            data.width.unwrap_or(DEFAULT_WIDTH),
            &mut errors,
            ConfigError::InvalidWidth,
        );
        let threads = positive(
            data.threads.unwrap_or(DEFAULT_THREADS),
            &mut errors,
            ConfigError::InvalidThreads,
        );
        let batch_size = positive(
            data.batch_size.unwrap_or(DEFAULT_BATCH_SIZE as i64),
            &mut errors,
            ConfigError::InvalidBatchSize,
        );

        let output_file = data.output_file.map(PathBuf::from);
        if output_file.is_none() {
            errors.push(ConfigError::MissingOutput);
        }

        let preset = match data.preset {
            Some(name) => {
                let preset = find_preset(&name);
                if preset.is_none() {
                    errors.push(ConfigError::UnknownPreset(name));
                }
                preset
            }
            None => {
                errors.push(ConfigError::MissingPreset);
                None
            }
        };

        match (errors.len(), preset, output_file) {
            (0, Some(preset), Some(output_file)) => {
                let num_cpus = num_cpus::get();
                if threads > num_cpus {
                    warn!(
                        "{} render threads requested but only {} cpus are available",
                        threads, num_cpus
                    );
                }
                Ok(RenderSettings {
                    threads,
                    resolution: Resolution { width, height },
                    mesh_file: PathBuf::from(preset.mesh_file),
                    output_file,
                    camera: preset.camera(),
                    seed: data.seed,
                    shuffle: data.shuffle.unwrap_or(true),
                    batch_size,
                    report_interval: data
                        .report_interval_ms
                        .map(Duration::from_millis)
                        .unwrap_or(DEFAULT_REPORT_INTERVAL),
                    show_progress: data.show_progress.unwrap_or(true),
                })
            }
            _ => {
                for e in &errors {
                    error!("{}", e);
                }
                if errors.len() == 1 {
                    Err(errors.remove(0))
                } else {
                    Err(ConfigError::Multiple(errors))
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn minimal() -> TOMLConfig {
        TOMLConfig {
            preset: Some(String::from("cube")),
            output_file: Some(String::from("img.ppm")),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::try_from(minimal()).unwrap();
        assert_eq!(settings.threads, 1);
        assert_eq!(
            settings.resolution,
            Resolution {
                width: 640,
                height: 480
            }
        );
        assert_eq!(settings.mesh_file, PathBuf::from("assets/cube.obj"));
        assert_eq!(settings.camera.origin, Point3::new(-1.0, -1.0, -4.0));
        assert_eq!(settings.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(settings.report_interval, DEFAULT_REPORT_INTERVAL);
        assert!(settings.shuffle);
        assert!(settings.show_progress);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_each_invalid_field_is_reported() {
        let config = TOMLConfig {
            threads: Some(0),
            width: Some(-3),
            height: Some(0),
            preset: Some(String::from("dragon")),
            ..Default::default()
        };
        match RenderSettings::try_from(config) {
            Err(ConfigError::Multiple(errors)) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                assert_eq!(
                    messages,
                    vec![
                        "Invalid height: 0",
                        "Invalid width: -3",
                        "Invalid number of threads: 0",
                        "Out file not specified",
                        "Unknown preset: \"dragon\"",
                    ]
                );
            }
            _ => panic!("expected every field to be reported"),
        }
    }

    #[test]
    fn test_single_error_is_not_wrapped() {
        let config = TOMLConfig {
            preset: None,
            ..minimal()
        };
        assert!(matches!(
            RenderSettings::try_from(config),
            Err(ConfigError::MissingPreset)
        ));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = TOMLConfig {
            threads: Some(4),
            width: Some(100),
            seed: Some(1),
            ..minimal()
        };
        let cli = TOMLConfig {
            threads: Some(8),
            output_file: Some(String::from("other.png")),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.threads, Some(8));
        assert_eq!(merged.width, Some(100));
        assert_eq!(merged.seed, Some(1));
        assert_eq!(merged.preset.as_deref(), Some("cube"));
        assert_eq!(merged.output_file.as_deref(), Some("other.png"));
    }

    #[test]
    fn test_parse_toml() {
        let config: TOMLConfig = toml::from_str(
            r#"
            threads = 6
            width = 320
            height = 200
            preset = "teapot"
            output_file = "teapot.png"
            shuffle = false
            report_interval_ms = 50
            "#,
        )
        .unwrap();
        let settings = RenderSettings::try_from(config).unwrap();
        assert_eq!(settings.threads, 6);
        assert_eq!(settings.resolution.width, 320);
        assert!(!settings.shuffle);
        assert_eq!(settings.report_interval, Duration::from_millis(50));
        assert_eq!(settings.output_file, PathBuf::from("teapot.png"));

        assert!(toml::from_str::<TOMLConfig>("thread = 2").is_err());
    }
}
