//! Stable ordering of pipeline names across snapshots.

use lstop_core::PipelineAnswer;

/// Pipeline names in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRoster {
    names: Vec<String>,
}

impl PipelineRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with a successful snapshot.
    ///
    /// Vanished names are dropped and new ones appended in key order; the
    /// relative order of survivors never changes. Returns `true` if the
    /// roster changed.
    pub fn sync(&mut self, answer: &PipelineAnswer) -> bool {
        let before = self.names.len();
        self.names.retain(|name| answer.pipelines.contains_key(name));
        let removed = before != self.names.len();

        let mut added = false;
        for name in answer.pipeline_names() {
            if !self.names.iter().any(|known| known == name) {
                self.names.push(name.to_string());
                added = true;
            }
        }

        removed || added
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
