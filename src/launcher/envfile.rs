//! Environment overrides from `.pbundle/environment.yaml`
//!
//! The file is a flat YAML mapping. Scalars are exported as strings and
//! `null` unsets the variable:
//!
//! ```yaml
//! DJANGO_SETTINGS_MODULE: mysite.settings
//! WORKERS: 4
//! PYTHONSTARTUP: null
//! ```
//!
//! A broken file never stops a launch; it is reported and ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::manifest::read_optional;
use crate::project::ENV_FILE;
use crate::ui;

/// Parsed override entries; `None` means "unset"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    entries: BTreeMap<String, Option<String>>,
    /// Keys whose values were not scalars
    pub ignored: Vec<String>,
}

impl EnvOverrides {
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let mut overrides = Self::default();
        if !has_content(yaml) {
            return Ok(overrides);
        }

        let raw: Option<BTreeMap<String, Value>> = serde_yaml::from_str(yaml)?;

        for (key, value) in raw.unwrap_or_default() {
            let value = match value {
                Value::Null => None,
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::String(s) => Some(s),
                Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                    overrides.ignored.push(key);
                    continue;
                }
            };
            overrides.entries.insert(key, value);
        }

        Ok(overrides)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn has_content(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#') && line != "---"
    })
}

/// Load overrides from `path`, warning about and skipping anything unusable
pub fn load(path: &Path) -> EnvOverrides {
    let text = match read_optional(path) {
        Ok(text) => text,
        Err(e) => {
            ui::warn(&format!("{}: {}", ENV_FILE, e));
            return EnvOverrides::default();
        }
    };

    match EnvOverrides::parse(&text) {
        Ok(overrides) => {
            for key in &overrides.ignored {
                ui::warn(&format!(
                    "{}: ignoring {}, value must be a scalar or null",
                    ENV_FILE, key
                ));
            }
            tracing::debug!(entries = overrides.len(), "loaded environment overrides");
            overrides
        }
        Err(e) => {
            ui::warn(&format!("{}: {}", ENV_FILE, e));
            EnvOverrides::default()
        }
    }
}
