//! Count-checked outcome of candidate generation and filtering

use serde::{Deserialize, Serialize};

/// Items collected from the model, tagged by whether the expected count was met
///
/// The model is asked for an exact number of candidates (generation) or
/// selections (filtering) but nothing forces it to comply. Instead of a bare
/// `Vec` whose length callers may or may not check, the mismatch is part of
/// the type and callers decide explicitly whether to accept partial data.
///
/// # Example
///
/// ```
/// use atoss_domain::Collected;
///
/// let outcome = Collected::from_items(vec!["a".to_string()], 2);
/// assert!(!outcome.is_complete());
/// assert_eq!(outcome.expected(), 2);
/// assert_eq!(outcome.items(), ["a".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Collected<T> {
    /// Exactly the expected number of items
    Complete { items: Vec<T> },
    /// Fewer or more items than expected
    Partial { items: Vec<T>, expected: usize },
}

impl<T> Collected<T> {
    /// Tag `items` against the `expected` count
    pub fn from_items(items: Vec<T>, expected: usize) -> Self {
        if items.len() == expected {
            Collected::Complete { items }
        } else {
            Collected::Partial { items, expected }
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Collected::Complete { items } | Collected::Partial { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Collected::Complete { items } | Collected::Partial { items, .. } => items,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Collected::Complete { .. })
    }

    /// Count the model was asked for
    pub fn expected(&self) -> usize {
        match self {
            Collected::Complete { items } => items.len(),
            Collected::Partial { expected, .. } => *expected,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}
