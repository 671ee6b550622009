use std::path::{Path, PathBuf};

use config::shared::{PipelineConfig, SinkConfig, SourceConfig};
use config::{Environment, load_config, load_config_from};
use serde::Deserialize;

use crate::error::{RunnerError, RunnerResult};

/// Configuration of the runner binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    pub pipeline: PipelineConfig,
}

/// Values given on the command line, taking precedence over configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub workers: Option<usize>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Returns a complete configuration when every value was given, so that no configuration
    /// file is needed.
    fn standalone_config(&self) -> Option<RunnerConfig> {
        let (Some(workers), Some(input), Some(output)) = (self.workers, &self.input, &self.output)
        else {
            return None;
        };

        Some(RunnerConfig {
            pipeline: PipelineConfig::new(
                workers,
                SourceConfig::File {
                    path: input.clone(),
                },
                SinkConfig::File {
                    path: output.clone(),
                },
            ),
        })
    }

    fn apply(self, config: &mut PipelineConfig) {
        if let Some(workers) = self.workers {
            config.workers = workers;
        }

        if let Some(path) = self.input {
            config.source = SourceConfig::File { path };
        }

        if let Some(path) = self.output {
            config.sink = SinkConfig::File { path };
        }
    }
}

/// Loads and validates the runner configuration.
///
/// Reads the configuration files from `configuration_directory`, or from `./configuration` when
/// not given, then applies `overrides`. Files are skipped altogether when the overrides are
/// complete.
pub fn load_runner_config(
    configuration_directory: Option<&Path>,
    overrides: ConfigOverrides,
) -> RunnerResult<RunnerConfig> {
    let mut config = match overrides.standalone_config() {
        Some(config) => config,
        None => match configuration_directory {
            Some(directory) => {
                let environment = Environment::load().map_err(RunnerError::config)?;
                load_config_from::<RunnerConfig>(directory, environment)
                    .map_err(RunnerError::config)?
            }
            None => load_config::<RunnerConfig>().map_err(RunnerError::config)?,
        },
    };

    overrides.apply(&mut config.pipeline);
    config.pipeline.validate().map_err(RunnerError::config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const BASE: &str = "pipeline:\n  workers: 2\n  source: stdin\n  sink: stdout\n";

    fn write_configuration(base: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.yaml"), base).unwrap();
        fs::write(dir.path().join("dev.yaml"), "{}").unwrap();
        fs::write(dir.path().join("prod.yaml"), "{}").unwrap();
        dir
    }

    #[test]
    fn complete_overrides_need_no_files() {
        let overrides = ConfigOverrides {
            workers: Some(3),
            input: Some("in.txt".into()),
            output: Some("out.txt".into()),
        };

        let missing = Path::new("/definitely/not/a/configuration/directory");
        let config = load_runner_config(Some(missing), overrides).unwrap();

        assert_eq!(config.pipeline.workers, 3);
        assert_eq!(
            config.pipeline.source,
            SourceConfig::File {
                path: "in.txt".into()
            }
        );
        assert_eq!(
            config.pipeline.sink,
            SinkConfig::File {
                path: "out.txt".into()
            }
        );
    }

    #[test]
    fn partial_overrides_apply_on_top_of_files() {
        let dir = write_configuration(BASE);
        let overrides = ConfigOverrides {
            workers: Some(6),
            ..Default::default()
        };

        let config = load_runner_config(Some(dir.path()), overrides).unwrap();

        assert_eq!(config.pipeline.workers, 6);
        assert_eq!(config.pipeline.source, SourceConfig::Stdin);
        assert_eq!(config.pipeline.sink, SinkConfig::Stdout);
    }

    #[test]
    fn zero_workers_is_a_configuration_error() {
        let dir = write_configuration(BASE);
        let overrides = ConfigOverrides {
            workers: Some(0),
            ..Default::default()
        };

        let err = load_runner_config(Some(dir.path()), overrides).unwrap_err();

        assert_eq!(err.category(), "configuration error");
    }
}
