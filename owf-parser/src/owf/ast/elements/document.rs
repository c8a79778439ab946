//! Documents and their frontmatter variables

use super::workout::Workout;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Frontmatter variables: an insertion-ordered map with unique keys
///
/// Inserting an existing key replaces its value and keeps its original position,
/// so the last occurrence of a key in the frontmatter wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(String, String)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A new map with `overrides` layered on top of `self`
    pub fn merged(&self, overrides: &Variables) -> Variables {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Variables::new();
        for (key, value) in iter {
            variables.insert(key, value);
        }
        variables
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub variables: Variables,
    pub workouts: Vec<Workout>,
}

impl Document {
    pub fn new(variables: Variables, workouts: Vec<Workout>) -> Self {
        Self {
            variables,
            workouts,
        }
    }

    pub fn with_workouts(&self, workouts: Vec<Workout>) -> Self {
        Self {
            workouts,
            ..self.clone()
        }
    }

    /// Find a top-level workout by name
    pub fn workout(&self, name: &str) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.name == name)
    }
}
