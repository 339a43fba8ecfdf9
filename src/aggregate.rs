//! Aggregation and key weighting for the combine-store commands.

use crate::bound::format_weight;

use std::fmt;
use std::str::FromStr;

/// How the scores of an element are combined across the input sets.
///
/// - `Sum`: the scores are summed over the inputs where the element exists.
/// - `Min` / `Max`: the smallest or largest score is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Sum,
    Min,
    Max,
}

/// A single key as given by a caller that may or may not attach a weight.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyEntry {
    Key(String),
    Weighted(String, f64),
}

/// The source keys of a combine-store command.
///
/// A key set is either all plain keys or all weighted keys.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySet {
    Keys(Vec<String>),
    Weighted(Vec<(String, f64)>),
}

impl Aggregate {
    /// Returns the name written after `AGGREGATE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregate::Sum => "sum",
            Aggregate::Min => "min",
            Aggregate::Max => "max",
        }
    }
}

impl FromStr for Aggregate {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Aggregate> {
        match &s.to_lowercase()[..] {
            "sum" => Ok(Aggregate::Sum),
            "min" => Ok(Aggregate::Min),
            "max" => Ok(Aggregate::Max),
            _ => Err(format!("unsupported aggregate `{}`", s).into()),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

impl KeySet {
    /// Builds a key set from entries of unknown shape.
    ///
    /// An empty input yields an empty plain key set. Mixing plain and weighted entries is an
    /// error.
    pub fn from_entries<I>(entries: I) -> crate::Result<KeySet>
    where
        I: IntoIterator<Item = KeyEntry>,
    {
        let mut entries = entries.into_iter().peekable();

        let weighted = match entries.peek() {
            Some(KeyEntry::Weighted(..)) => true,
            Some(KeyEntry::Key(_)) => false,
            None => return Ok(KeySet::Keys(vec![])),
        };

        if weighted {
            let mut pairs = vec![];
            for entry in entries {
                match entry {
                    KeyEntry::Weighted(key, weight) => pairs.push((key, weight)),
                    KeyEntry::Key(key) => return Err(mixed_keys(&key)),
                }
            }
            Ok(KeySet::Weighted(pairs))
        } else {
            let mut keys = vec![];
            for entry in entries {
                match entry {
                    KeyEntry::Key(key) => keys.push(key),
                    KeyEntry::Weighted(key, _) => return Err(mixed_keys(&key)),
                }
            }
            Ok(KeySet::Keys(keys))
        }
    }

    pub fn len(&self) -> usize {
        match self {
            KeySet::Keys(keys) => keys.len(),
            KeySet::Weighted(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits the set into parallel key and weight token lists.
    ///
    /// The weight list is empty for plain keys.
    pub fn separate(&self) -> (Vec<String>, Vec<String>) {
        match self {
            KeySet::Keys(keys) => (keys.clone(), vec![]),
            KeySet::Weighted(pairs) => pairs
                .iter()
                .map(|(key, weight)| (key.clone(), format_weight(*weight)))
                .unzip(),
        }
    }
}

impl From<Vec<String>> for KeySet {
    fn from(src: Vec<String>) -> KeySet {
        KeySet::Keys(src)
    }
}

impl From<Vec<(String, f64)>> for KeySet {
    fn from(src: Vec<(String, f64)>) -> KeySet {
        KeySet::Weighted(src)
    }
}

impl From<&[&str]> for KeySet {
    fn from(src: &[&str]) -> KeySet {
        KeySet::Keys(src.iter().map(|key| key.to_string()).collect())
    }
}

impl From<&[(&str, f64)]> for KeySet {
    fn from(src: &[(&str, f64)]) -> KeySet {
        KeySet::Weighted(
            src.iter()
                .map(|(key, weight)| (key.to_string(), *weight))
                .collect(),
        )
    }
}

fn mixed_keys(key: &str) -> crate::Error {
    format!(
        "key set mixes plain and weighted keys (at `{}`); give a weight for every key or for none",
        key
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_names() {
        assert_eq!(Aggregate::Sum.as_str(), "sum");
        assert_eq!(Aggregate::Min.as_str(), "min");
        assert_eq!(Aggregate::Max.to_string(), "max");

        assert_eq!("MAX".parse::<Aggregate>().unwrap(), Aggregate::Max);
        assert_eq!("sum".parse::<Aggregate>().unwrap(), Aggregate::Sum);
        assert!("avg".parse::<Aggregate>().is_err());
    }

    #[test]
    fn separate_plain_keys() {
        let keys = KeySet::from(&["a", "b", "c"][..]);
        let (keys, weights) = keys.separate();
        assert_eq!(keys, ["a", "b", "c"]);
        assert!(weights.is_empty());
    }

    #[test]
    fn separate_weighted_keys_keeps_order() {
        let keys = KeySet::from(&[("b", 2.0), ("a", 0.5)][..]);
        let (keys, weights) = keys.separate();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(weights, ["2.0", "0.5"]);
    }

    #[test]
    fn from_entries_is_homogeneous() {
        let plain = KeySet::from_entries(vec![
            KeyEntry::Key("a".to_string()),
            KeyEntry::Key("b".to_string()),
        ])
        .unwrap();
        assert_eq!(plain, KeySet::Keys(vec!["a".to_string(), "b".to_string()]));

        let weighted = KeySet::from_entries(vec![KeyEntry::Weighted("a".to_string(), 3.0)]).unwrap();
        assert_eq!(weighted, KeySet::Weighted(vec![("a".to_string(), 3.0)]));

        let empty = KeySet::from_entries(vec![]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn from_entries_rejects_mixed_shapes() {
        let err = KeySet::from_entries(vec![
            KeyEntry::Weighted("a".to_string(), 1.0),
            KeyEntry::Key("b".to_string()),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("`b`"));

        assert!(KeySet::from_entries(vec![
            KeyEntry::Key("a".to_string()),
            KeyEntry::Weighted("b".to_string(), 1.0),
        ])
        .is_err());
    }
}
