use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// [`tracing`] config.
#[derive(Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TracingConfig {
    /// The minimum log level for stderr.
    ///
    /// Levels below this one will not be shown.
    /// "error" is the highest level only showing errors,
    /// "trace" is the lowest showing as much as possible.
    ///
    /// Type         | Level
    /// Valid values | "off", "error", "warn", "info", "debug", "trace"
    #[serde(deserialize_with = "level_filter_serde::deserialize")]
    pub level: LevelFilter,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}

mod level_filter_serde {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};
    use tracing::level_filters::LevelFilter;

    pub(super) fn deserialize<'de, D>(d: D) -> Result<LevelFilter, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        LevelFilter::from_str(&s).map_err(serde::de::Error::custom)
    }
}
