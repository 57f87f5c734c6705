//! Typed, read-only lookups into the configuration tree.
//!
//! Every lookup returns `Option<T>`: `None` means the key is absent or holds a
//! value of the wrong type. Defaults are applied by the caller.

use std::time::Duration;

use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::keys::ConfigKey;

/// Read-only view of a hierarchical configuration.
pub trait ConfigTree {
    /// Whether `key` is present, whatever its type.
    fn exists(&self, key: &ConfigKey) -> bool;

    fn get_bool(&self, key: &ConfigKey) -> Option<bool>;

    /// Integers and floats are both accepted.
    fn get_number(&self, key: &ConfigKey) -> Option<f64>;

    /// First usable duration among `keys`, tried in order.
    ///
    /// Numbers are whole seconds; strings are human durations (`30s`, `1m`).
    /// Zero and unparsable values are skipped.
    fn get_duration(&self, keys: &[ConfigKey]) -> Option<Duration>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationValue {
    Seconds(f64),
    Text(String),
}

impl DurationValue {
    fn to_duration(&self) -> Option<Duration> {
        let duration = match self {
            // Fractional seconds are truncated, matching the agent's numeric interval handling.
            DurationValue::Seconds(secs) if secs.is_finite() && *secs >= 1.0 => {
                Duration::from_secs(secs.trunc() as u64)
            }
            DurationValue::Seconds(_) => return None,
            DurationValue::Text(text) => humantime::parse_duration(text.trim()).ok()?,
        };
        (!duration.is_zero()).then_some(duration)
    }
}

fn lookup<T: DeserializeOwned>(figment: &Figment, key: &ConfigKey) -> Option<T> {
    match figment.extract_inner::<T>(key.as_str()) {
        Ok(value) => Some(value),
        Err(e) if e.missing() => None,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "ignoring configuration value of unexpected type");
            None
        }
    }
}

impl ConfigTree for Figment {
    fn exists(&self, key: &ConfigKey) -> bool {
        self.contains(key.as_str())
    }

    fn get_bool(&self, key: &ConfigKey) -> Option<bool> {
        lookup(self, key)
    }

    fn get_number(&self, key: &ConfigKey) -> Option<f64> {
        lookup(self, key)
    }

    fn get_duration(&self, keys: &[ConfigKey]) -> Option<Duration> {
        keys.iter().find_map(|key| {
            let value: DurationValue = lookup(self, key)?;
            let duration = value.to_duration();
            if duration.is_none() {
                tracing::warn!(key = %key, "ignoring non-positive or unparsable duration");
            }
            duration
        })
    }
}

impl<T: ConfigTree + ?Sized> ConfigTree for &T {
    fn exists(&self, key: &ConfigKey) -> bool {
        (**self).exists(key)
    }

    fn get_bool(&self, key: &ConfigKey) -> Option<bool> {
        (**self).get_bool(key)
    }

    fn get_number(&self, key: &ConfigKey) -> Option<f64> {
        (**self).get_number(key)
    }

    fn get_duration(&self, keys: &[ConfigKey]) -> Option<Duration> {
        (**self).get_duration(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Json, Yaml};
    use tracing_test::traced_test;

    fn tree(yaml: &str) -> Figment {
        Figment::from(Yaml::string(yaml))
    }

    fn key(path: &str) -> ConfigKey {
        ConfigKey::new(path.split('.'))
    }

    #[test]
    fn exists_ignores_type() {
        let t = tree("a:\n  flag: not-a-bool\n  nested:\n    leaf: 1\n");
        assert!(t.exists(&key("a.flag")));
        assert!(t.exists(&key("a.nested")));
        assert!(!t.exists(&key("a.missing")));
        assert!(!t.exists(&key("b")));
    }

    #[test]
    fn bool_lookup() {
        let t = tree("enabled: true\ndisabled: false\n");
        assert_eq!(t.get_bool(&key("enabled")), Some(true));
        assert_eq!(t.get_bool(&key("disabled")), Some(false));
        assert_eq!(t.get_bool(&key("absent")), None);
    }

    #[traced_test]
    #[test]
    fn type_mismatch_degrades_to_none() {
        let t = Figment::from(Json::string(r#"{"flag": [1, 2], "level": "high"}"#));
        assert_eq!(t.get_bool(&key("flag")), None);
        assert_eq!(t.get_number(&key("level")), None);
        assert!(logs_contain("ignoring configuration value of unexpected type"));
    }

    #[test]
    fn numbers_accept_integers_and_floats() {
        let t = tree("int: 2\nfloat: 1.5\nneg: -3\n");
        assert_eq!(t.get_number(&key("int")), Some(2.0));
        assert_eq!(t.get_number(&key("float")), Some(1.5));
        assert_eq!(t.get_number(&key("neg")), Some(-3.0));
    }

    #[test]
    fn duration_from_seconds_and_text() {
        let t = tree("secs: 30\nfrac: 2.9\ntext: 1m 30s\nmillis: 500ms\n");
        assert_eq!(t.get_duration(&[key("secs")]), Some(Duration::from_secs(30)));
        assert_eq!(t.get_duration(&[key("frac")]), Some(Duration::from_secs(2)));
        assert_eq!(t.get_duration(&[key("text")]), Some(Duration::from_secs(90)));
        assert_eq!(
            t.get_duration(&[key("millis")]),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn duration_skips_unusable_values() {
        let t = tree("zero: 0\nneg: -5\nhalf: 0.5\nbad: soon\n");
        for path in ["zero", "neg", "half", "bad", "absent"] {
            assert_eq!(t.get_duration(&[key(path)]), None, "{path}");
        }
    }

    #[test]
    fn duration_takes_first_usable_key() {
        let t = tree("first: 0\nsecond: 10s\nthird: 20\n");
        let keys = [key("missing"), key("first"), key("second"), key("third")];
        assert_eq!(t.get_duration(&keys), Some(Duration::from_secs(10)));
    }
}
