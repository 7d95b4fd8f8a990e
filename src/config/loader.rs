//! Rule table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading named rule
//! tables from a directory of YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::calculation::PayrollCalculator;
use crate::error::{EngineError, EngineResult};

use super::types::{RuleSet, RuleSetConfig, RuleSetEntry};

/// The rule table used when a caller does not name one.
pub const DEFAULT_RULE_SET: &str = "default";

/// Loads and provides access to named rule tables.
///
/// # Directory Structure
///
/// Every `*.yaml` file in the directory is one rule table:
/// ```text
/// config/rulesets/
/// ├── default.yaml    # Reference rule table
/// └── flat_ten.yaml   # Single 10% threshold, no transport deduction
/// ```
///
/// # Example
///
/// ```no_run
/// use net_pay_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/rulesets")?;
/// let calculator = loader.calculator("default")?;
/// let net = calculator.net_pay(Decimal::new(300000, 2), 0, false)?;
/// assert_eq!(net, Decimal::new(246000, 2));
/// # Ok::<(), net_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rule_sets: HashMap<String, RuleSetEntry>,
}

impl ConfigLoader {
    /// Loads every rule table from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the directory is missing or holds
    ///   no `*.yaml` file
    /// - [`EngineError::ConfigParseError`] if a file is not valid YAML or a
    ///   decimal cannot be parsed
    /// - [`EngineError::InvalidRuleSet`] if a table fails validation or two
    ///   files share a name
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule set files found)", dir_str),
            });
        }

        let mut rule_sets = HashMap::new();
        for file in &files {
            let entry = Self::load_yaml::<RuleSetConfig>(file)?.into_entry()?;
            if rule_sets.contains_key(&entry.name) {
                return Err(EngineError::invalid_rule_set(
                    entry.name,
                    format!("duplicate rule set name in {}", file.display()),
                ));
            }
            rule_sets.insert(entry.name.clone(), entry);
        }

        info!(
            path = %dir_str,
            rule_sets = rule_sets.len(),
            "Loaded rule tables"
        );

        Ok(Self { rule_sets })
    }

    /// Creates a loader holding only the built-in default rule table.
    pub fn with_defaults() -> Self {
        let entry = RuleSetEntry {
            name: DEFAULT_RULE_SET.to_string(),
            description: "Built-in reference rule table".to_string(),
            rules: Arc::new(RuleSet::default()),
        };
        Self {
            rule_sets: HashMap::from([(entry.name.clone(), entry)]),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a loaded rule table by name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RuleSetNotFound`] if no table has that name.
    pub fn get_rule_set(&self, name: &str) -> EngineResult<&RuleSetEntry> {
        self.rule_sets
            .get(name)
            .ok_or_else(|| EngineError::RuleSetNotFound {
                name: name.to_string(),
            })
    }

    /// Returns a calculator bound to the named rule table.
    pub fn calculator(&self, name: &str) -> EngineResult<PayrollCalculator> {
        let entry = self.get_rule_set(name)?;
        Ok(PayrollCalculator::from_shared(Arc::clone(&entry.rules)))
    }

    /// Returns all loaded rule tables sorted by name.
    pub fn rule_sets(&self) -> Vec<&RuleSetEntry> {
        let mut entries: Vec<&RuleSetEntry> = self.rule_sets.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}
