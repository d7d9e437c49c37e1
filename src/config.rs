use std::path::PathBuf;

/// Environment variable naming the source CSV.
pub const DATA_PATH_ENV: &str = "COVID_DASHBOARD_DATA";
/// Environment variable with a comma-separated list of default countries.
pub const DEFAULT_ENTITIES_ENV: &str = "COVID_DASHBOARD_ENTITIES";

pub const DEFAULT_DATA_PATH: &str = "owid-covid-data.csv";
pub const DEFAULT_ENTITIES: [&str; 3] = ["Kenya", "United States", "India"];

/// Startup settings. There are no command-line flags; everything comes from
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub default_entities: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            default_entities: DEFAULT_ENTITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup. Blank values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }

        if let Some(list) = lookup(DEFAULT_ENTITIES_ENV) {
            let entities: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if !entities.is_empty() {
                config.default_entities = entities;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("owid-covid-data.csv"));
        assert_eq!(config.default_entities, vec!["Kenya", "United States", "India"]);
    }

    #[test]
    fn reads_path_and_entity_list() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_PATH_ENV, "/data/owid.csv"),
            (DEFAULT_ENTITIES_ENV, " Peru , Chad,,"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/data/owid.csv"));
        assert_eq!(config.default_entities, vec!["Peru", "Chad"]);
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_PATH_ENV, "  "),
            (DEFAULT_ENTITIES_ENV, " , "),
        ]));
        assert_eq!(config, DashboardConfig::default());
    }
}
