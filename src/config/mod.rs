//! Rule tables for the Net Pay Engine.
//!
//! This module defines the immutable [`RuleSet`] every calculation runs
//! against, and the [`ConfigLoader`] that reads named rule tables from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use net_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rulesets").unwrap();
//! for entry in config.rule_sets() {
//!     println!("Loaded rule set: {}", entry.name);
//! }
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_RULE_SET};
pub use types::{
    RoundingPolicy, RuleSet, RuleSetBuilder, RuleSetConfig, RuleSetEntry, TaxBracket,
};
