use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hintln;

/// Catch-all for config keys that are not recognized,
/// so they can be reported instead of silently ignored
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unused(BTreeMap<String, toml::Value>);

impl Unused {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Warn about each unused key
    pub fn check(&self) {
        for key in self.0.keys() {
            hintln!("Warning", "config `{}` is unused", key);
        }
    }

    /// Warn about each unused key, with the key path prefixed by `prefix`
    pub fn check_prefixed(&self, prefix: &str) {
        for key in self.0.keys() {
            hintln!("Warning", "config `{}.{}` is unused", prefix, key);
        }
    }
}
