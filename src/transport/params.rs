//! Parameter map sent with each API command.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Ordered name/value pairs for a single API command.
///
/// CloudStack accepts every argument as a string, so typed setters render
/// their values the way the management server expects: booleans as
/// `true`/`false`, lists comma-joined, and maps as
/// `name[index].key=value` entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandParams {
    values: BTreeMap<String, String>,
}

impl CommandParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string parameter, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_owned(), value.into());
    }

    /// Sets a parameter when `value` is present.
    pub fn set_opt<V: Display>(&mut self, name: &str, value: Option<V>) {
        if let Some(inner) = value {
            self.set(name, inner.to_string());
        }
    }

    /// Sets a boolean parameter when present.
    pub fn set_bool(&mut self, name: &str, value: Option<bool>) {
        self.set_opt(name, value);
    }

    /// Sets an integer parameter when present.
    pub fn set_int(&mut self, name: &str, value: Option<i64>) {
        self.set_opt(name, value);
    }

    /// Sets a comma-separated list parameter; empty lists are skipped.
    pub fn set_list<S: AsRef<str>>(&mut self, name: &str, values: &[S]) {
        if values.is_empty() {
            return;
        }
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.set(name, joined);
    }

    /// Encodes a map parameter using CloudStack's indexed form, for example
    /// `tags[0].key=env` and `tags[0].value=prod`.
    pub fn set_map(&mut self, name: &str, entries: &BTreeMap<String, String>) {
        for (index, (key, value)) in entries.iter().enumerate() {
            self.set(&format!("{name}[{index}].key"), key.clone());
            self.set(&format!("{name}[{index}].value"), value.clone());
        }
    }

    /// Returns the value stored for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Reports whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub(crate) const fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommandParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_values_are_skipped_when_absent() {
        let mut params = CommandParams::new();
        params.set_opt::<String>("cidrlist", None);
        params.set_bool("fordisplay", None);
        assert!(params.is_empty());
    }

    #[test]
    fn typed_setters_render_cloudstack_strings() {
        let mut params = CommandParams::new();
        params.set_bool("fordisplay", Some(true));
        params.set_int("startport", Some(22));
        params.set_list("cidrlist", &["10.0.0.0/8", "192.168.0.0/16"]);

        assert_eq!(params.get("fordisplay"), Some("true"));
        assert_eq!(params.get("startport"), Some("22"));
        assert_eq!(params.get("cidrlist"), Some("10.0.0.0/8,192.168.0.0/16"));
    }

    #[test]
    fn map_parameters_use_indexed_keys() {
        let mut params = CommandParams::new();
        let entries = BTreeMap::from([
            (String::from("env"), String::from("prod")),
            (String::from("team"), String::from("net")),
        ]);
        params.set_map("tags", &entries);

        assert_eq!(params.get("tags[0].key"), Some("env"));
        assert_eq!(params.get("tags[0].value"), Some("prod"));
        assert_eq!(params.get("tags[1].key"), Some("team"));
        assert_eq!(params.get("tags[1].value"), Some("net"));
    }
}
