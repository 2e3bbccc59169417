use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

use crate::pattern::ParamKey;

type ParamList = SmallVec<[(ParamKey, Option<String>); 4]>;

/// Insertion-ordered parameter mapping produced by one match call. A key may
/// hold `None` when its capture group did not participate in the match (an
/// optional or zero-repetition parameter).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParams {
    entries: ParamList,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one capture. A defined value always writes, replacing any
    /// earlier value under the same key; an undefined value writes only when
    /// the key is absent, so a later empty capture never clobbers an earlier
    /// defined one.
    pub fn insert(&mut self, name: ParamKey, value: Option<String>) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => {
                if value.is_some() {
                    *existing = value;
                }
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Looks a parameter up by its rendered name; indexed keys answer to
    /// their decimal rendering, so `get("0")` finds `ParamKey::Index(0)`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.matches(name))
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.matches(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key, value.as_deref()))
    }
}

impl Serialize for PathParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_value_overwrites_earlier_one() {
        let mut params = PathParams::new();
        params.insert(ParamKey::from("id"), Some("1".to_string()));
        params.insert(ParamKey::from("id"), Some("2".to_string()));

        assert_eq!(params.get("id"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn undefined_value_never_clobbers_defined_one() {
        let mut params = PathParams::new();
        params.insert(ParamKey::from("id"), Some("1".to_string()));
        params.insert(ParamKey::from("id"), None);

        assert_eq!(params.get("id"), Some("1"));
    }

    #[test]
    fn undefined_value_registers_absent_key() {
        let mut params = PathParams::new();
        params.insert(ParamKey::from("tail"), None);

        assert!(params.contains("tail"));
        assert_eq!(params.get("tail"), None);
    }

    #[test]
    fn indexed_keys_answer_to_decimal_queries() {
        let mut params = PathParams::new();
        params.insert(ParamKey::Index(0), Some("captured".to_string()));

        assert_eq!(params.get("0"), Some("captured"));
    }
}
