//! Built-in lint rules

pub mod header_main;

use crate::config::{Config, ConfigError};
use crate::rule::{Rule, RuleMeta};
use std::sync::Arc;

pub use header_main::HeaderMain;

/// Instantiate every built-in rule from `config`
///
/// Rules validate their own configuration value, so a malformed entry fails
/// here before any file is read.
pub fn builtin_rules(config: &Config) -> Result<Vec<Arc<dyn Rule>>, ConfigError> {
    let header_main: Arc<dyn Rule> = Arc::new(HeaderMain::from_config(config)?);
    Ok(vec![header_main])
}

/// Metadata of every built-in rule, independent of configuration
pub fn builtin_metas() -> Vec<RuleMeta> {
    vec![header_main::meta()]
}

pub fn find_meta(rule_id: &str) -> Option<RuleMeta> {
    builtin_metas().into_iter().find(|meta| meta.id == rule_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_rules_follow_config() {
        let rules = builtin_rules(&Config::new()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id(), "header-main");
        assert!(!rules[0].is_enabled());

        let mut config = Config::new();
        config.rules.insert("header-main".to_string(), json!([true]));
        assert!(builtin_rules(&config).is_err());
    }

    #[test]
    fn test_find_meta() {
        assert!(find_meta("header-main").is_some());
        assert!(find_meta("no-bare-strings").is_none());
    }
}
