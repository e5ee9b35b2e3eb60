use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tilemerge::GameConfig;

/// Values given on the command line, which take precedence over the config file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigOverrides {
    pub size: Option<usize>,
    pub four_spawn_probability: Option<f64>,
}

/// Reads a [`GameConfig`] from a JSON file. Missing fields get their default value.
pub fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Combines defaults, an optional config file and the overrides, then validates the result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> anyhow::Result<GameConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = overrides.size {
        config.size = size;
    }
    if let Some(probability) = overrides.four_spawn_probability {
        config.four_spawn_probability = probability;
    }
    config.validate()?;
    Ok(config)
}
