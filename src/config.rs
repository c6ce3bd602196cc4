//! Environment-driven settings.
//!
//! Values come from the process environment after `.env` has been loaded
//! with `dotenvy`. Command-line flags take precedence where both exist.

use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/warehouse_dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default record location (`DASHBOARD_SOURCE`).
    pub source: Option<String>,
    /// ANSI badges in text output (`DASHBOARD_COLOR`).
    pub color: bool,
    /// Rolling JSON log file (`LOG_FILE_PATH`).
    pub log_file_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let source = lookup("DASHBOARD_SOURCE").filter(|s| !s.trim().is_empty());
        let color = lookup("DASHBOARD_COLOR").is_some_and(|v| parse_flag(&v));
        let log_file_path =
            lookup("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Config {
            source,
            color,
            log_file_path,
        }
    }

    /// Resolves the record location: explicit argument first, then
    /// `DASHBOARD_SOURCE`.
    pub fn resolve_source(&self, arg: Option<String>) -> Option<String> {
        arg.or_else(|| self.source.clone())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "always"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.source, None);
        assert!(!cfg.color);
        assert_eq!(cfg.log_file_path, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_reads_values() {
        let cfg = config(&[
            ("DASHBOARD_SOURCE", "data/picking.csv"),
            ("DASHBOARD_COLOR", "Always"),
            ("LOG_FILE_PATH", "/tmp/dash.log"),
        ]);
        assert_eq!(cfg.source.as_deref(), Some("data/picking.csv"));
        assert!(cfg.color);
        assert_eq!(cfg.log_file_path, "/tmp/dash.log");
    }

    #[test]
    fn test_blank_source_ignored() {
        assert_eq!(config(&[("DASHBOARD_SOURCE", "  ")]).source, None);
    }

    #[test]
    fn test_color_flag_values() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("never"));
    }

    #[test]
    fn test_resolve_source_prefers_argument() {
        let cfg = config(&[("DASHBOARD_SOURCE", "env.csv")]);
        assert_eq!(
            cfg.resolve_source(Some("arg.json".to_string())).as_deref(),
            Some("arg.json")
        );
        assert_eq!(cfg.resolve_source(None).as_deref(), Some("env.csv"));
    }
}
