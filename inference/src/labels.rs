//! Class names for the classifier output layer

use crate::error::{AnalysisError, Result};
use std::path::Path;

/// Ordered class names, index `i` naming model output `i`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassLabels {
    names: Vec<String>,
}

impl ClassLabels {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parse a JSON array of strings
    pub fn from_json_str(json: &str) -> Result<Self> {
        let names: Vec<String> = serde_json::from_str(json).map_err(|e| {
            AnalysisError::labels(format!("Expected a JSON array of strings: {}", e))
        })?;
        Ok(Self { names })
    }

    /// Load a JSON array of strings from disk
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let labels = Self::from_json_str(&text)?;
        log::info!("Loaded {} class labels from {}", labels.len(), path.display());
        Ok(labels)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Name for an output index, `class_<index>` when the list is too short
    pub fn label_for(&self, index: usize) -> String {
        match self.get(index) {
            Some(name) => name.to_string(),
            None => format!("class_{}", index),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ClassLabels {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
