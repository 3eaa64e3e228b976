//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Everything the headless client needs to set up a match.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub scenario: String,
    pub seed: Option<u64>,
    pub max_turns: u64,
    /// When set, logs are also written to `<log_dir>/embers.log`.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenario: "ridge".to_string(),
            seed: None,
            max_turns: 200,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EMBERS_DATA_DIR` - Content directory (default: `data`)
    /// - `EMBERS_SCENARIO` - Scenario file under `scenarios/` (default: `ridge`)
    /// - `EMBERS_SEED` - Match seed (default: random)
    /// - `EMBERS_MAX_TURNS` - Turn bound for the run (default: 200)
    /// - `EMBERS_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("EMBERS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(scenario) = lookup("EMBERS_SCENARIO").filter(|s| !s.is_empty()) {
            config.scenario = scenario;
        }
        config.seed = parse(lookup("EMBERS_SEED"));
        if let Some(turns) = parse::<u64>(lookup("EMBERS_MAX_TURNS")) {
            config.max_turns = turns.max(1);
        }
        config.log_dir = lookup("EMBERS_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
