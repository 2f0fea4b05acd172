use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, bail};
use interpreter::Timings;
use log::{debug, info};
use scrambler::SerialNumber;
use serde::Deserialize;

const DEFAULT_TICK_RATE_HZ: u32 = 60;
const MAX_TICK_RATE_HZ: u32 = 1000;

/// The contents of `config.toml`. Anything left out falls back to a default or is rolled randomly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub serial: Option<String>,
    pub seed: Option<u64>,
    pub tick_rate_hz: Option<u32>,
    pub timings: Timings,
}

/// Everything needed to start a module, with nothing left to decide
#[derive(Clone, Debug)]
pub struct Settings {
    pub serial: SerialNumber,
    pub seed: u64,
    pub tick_rate_hz: u32,
    pub timings: Timings,
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rubiks").join("config.toml"))
}

impl Config {
    /// Read the config at `path`, or at the default location when no path is given.
    ///
    /// A missing file at the default location is not an error, an explicitly requested one is.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Config> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        info!("Loading config from {}", path.display());

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read config at {}", path.display()))?;

        toml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Replace file values with the ones given on the command line
    #[must_use]
    pub fn with_overrides(
        mut self,
        serial: Option<String>,
        seed: Option<u64>,
        tick_rate_hz: Option<u32>,
    ) -> Config {
        self.serial = serial.or(self.serial);
        self.seed = seed.or(self.seed);
        self.tick_rate_hz = tick_rate_hz.or(self.tick_rate_hz);
        self
    }

    /// Validate the values and roll the ones that were left out
    pub fn resolve(self, rng: &mut fastrand::Rng) -> color_eyre::Result<Settings> {
        let serial = match self.serial {
            Some(serial) => serial
                .parse::<SerialNumber>()
                .wrap_err_with(|| format!("Invalid serial number `{serial}`"))?,
            None => SerialNumber::random(rng),
        };

        let tick_rate_hz = self.tick_rate_hz.unwrap_or(DEFAULT_TICK_RATE_HZ);
        if !(1..=MAX_TICK_RATE_HZ).contains(&tick_rate_hz) {
            bail!("The tick rate must be between 1 and {MAX_TICK_RATE_HZ} Hz, found {tick_rate_hz}");
        }

        Ok(Settings {
            serial,
            seed: self.seed.unwrap_or_else(|| rng.u64(..)),
            tick_rate_hz,
            timings: self.timings,
        })
    }
}
