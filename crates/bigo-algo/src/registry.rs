//! Fixed mapping from a lowercase key to a callable and its complexity label.
//!
//! The registry is built once at startup and never mutated afterwards; the
//! request layer receives it by `Arc`.

use std::fmt;
use std::hint::black_box;

use serde::Serialize;

use crate::error::AlgoError;
use crate::{binary_search, bubble_sort, linear_search, nested_loops};

/// Entry point of a registered algorithm. The output is discarded.
pub type RunFn = fn(usize);

/// Annotated asymptotic running time. Not computed, only attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Complexity {
    #[serde(rename = "O(log n)")]
    Logarithmic,
    #[serde(rename = "O(n)")]
    Linear,
    #[serde(rename = "O(n²)")]
    Quadratic,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Logarithmic => "O(log n)",
            Complexity::Linear      => "O(n)",
            Complexity::Quadratic   => "O(n²)",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered algorithm.
#[derive(Debug, Clone, Copy)]
pub struct Algorithm {
    /// Lowercase lookup key, e.g. `"bubble"`.
    pub key:        &'static str,
    /// Human-readable name.
    pub name:       &'static str,
    pub complexity: Complexity,
    pub run:        RunFn,
}

/// Immutable key → algorithm table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Algorithm>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The four built-in toy algorithms.
    pub fn builtin() -> Self {
        Self::empty()
            .with(Algorithm {
                key:        "bubble",
                name:       "Bubble sort",
                complexity: Complexity::Quadratic,
                run:        |n| {
                    black_box(bubble_sort(n));
                },
            })
            .with(Algorithm {
                key:        "linear",
                name:       "Linear search",
                complexity: Complexity::Linear,
                run:        |n| {
                    black_box(linear_search(n));
                },
            })
            .with(Algorithm {
                key:        "binary",
                name:       "Binary search",
                complexity: Complexity::Logarithmic,
                run:        |n| {
                    black_box(binary_search(n));
                },
            })
            .with(Algorithm {
                key:        "nested",
                name:       "Nested loops",
                complexity: Complexity::Quadratic,
                run:        |n| {
                    black_box(nested_loops(n));
                },
            })
    }

    /// Adds an entry, replacing any existing entry with the same key.
    pub fn with(mut self, algorithm: Algorithm) -> Self {
        match self.entries.iter_mut().find(|a| a.key == algorithm.key) {
            Some(slot) => *slot = algorithm,
            None       => self.entries.push(algorithm),
        }
        self
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Result<&Algorithm, AlgoError> {
        let wanted = key.trim().to_lowercase();
        self.entries
            .iter()
            .find(|a| a.key == wanted)
            .ok_or_else(|| AlgoError::UnknownAlgorithm {
                key:   key.to_string(),
                valid: self.keys(),
            })
    }

    /// Keys in registration order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|a| a.key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Algorithm> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_keys() {
        let reg = Registry::builtin();
        assert_eq!(reg.keys(), vec!["bubble", "linear", "binary", "nested"]);
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn labels_match_keys() {
        let reg = Registry::builtin();
        assert_eq!(reg.get("bubble").unwrap().complexity.as_str(), "O(n²)");
        assert_eq!(reg.get("linear").unwrap().complexity.as_str(), "O(n)");
        assert_eq!(reg.get("binary").unwrap().complexity.as_str(), "O(log n)");
        assert_eq!(reg.get("nested").unwrap().complexity.as_str(), "O(n²)");
    }

    #[test]
    fn lookup_ignores_case() {
        let reg = Registry::builtin();
        assert_eq!(reg.get("LINEAR").unwrap().key, "linear");
        assert_eq!(reg.get(" Bubble ").unwrap().key, "bubble");
    }

    #[test]
    fn unknown_key_lists_valid_keys() {
        let err = Registry::builtin().get("quick").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("quick"));
        for key in ["bubble", "linear", "binary", "nested"] {
            assert!(msg.contains(key), "missing {key} in {msg}");
        }
    }

    #[test]
    fn empty_key_is_unknown() {
        assert!(Registry::builtin().get("").is_err());
    }

    #[test]
    fn with_replaces_existing_key() {
        let reg = Registry::builtin().with(Algorithm {
            key:        "linear",
            name:       "Constant stub",
            complexity: Complexity::Linear,
            run:        |_| {},
        });
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.get("linear").unwrap().name, "Constant stub");
    }

    #[test]
    fn registered_callables_run() {
        for algo in Registry::builtin().iter() {
            (algo.run)(0);
            (algo.run)(25);
        }
    }

    #[test]
    fn complexity_serializes_as_label() {
        let json = serde_json::to_string(&Complexity::Quadratic).unwrap();
        assert_eq!(json, "\"O(n²)\"");
    }
}
