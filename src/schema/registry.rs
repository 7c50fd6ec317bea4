//! Schema registry: deduplicates and merges message shapes
//!
//! Entries are kept in insertion order. Resolution scans them front to back
//! and the first entry that matches exactly or can absorb the incoming shape
//! wins, so the order in which samples arrive decides where later samples
//! merge.

use super::naming;
use super::types::{FieldMatch, FieldSignature, MessageSignature};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// What resolving a field list did to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An identical entry already existed
    Existing,
    /// An entry absorbed the shape and was widened in place
    Merged,
    /// A new entry was appended
    Created,
}

/// Counters over every `resolve` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub created: usize,
    pub deduplicated: usize,
    pub merged: usize,
}

/// How a stored entry relates to an incoming field list
enum Candidate {
    Exact,
    Mergeable,
    Rejected,
}

/// Ordered collection of canonical message types for one inference run
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: Vec<MessageSignature>,
    stats: RegistryStats,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a field list into its canonical message
    pub fn resolve(&mut self, fields: Vec<FieldSignature>) -> &MessageSignature {
        let (index, _) = self.resolve_with_outcome(fields);
        &self.entries[index]
    }

    /// Resolve a field list, returning the entry index and what happened
    pub fn resolve_with_outcome(&mut self, fields: Vec<FieldSignature>) -> (usize, Resolution) {
        let found = self
            .entries
            .iter()
            .enumerate()
            .find_map(|(index, entry)| match classify(entry, &fields) {
                Candidate::Exact => Some((index, Resolution::Existing)),
                Candidate::Mergeable => Some((index, Resolution::Merged)),
                Candidate::Rejected => None,
            });

        match found {
            Some((index, Resolution::Merged)) => {
                let entry = &mut self.entries[index];
                for (stored, incoming) in entry.fields.iter_mut().zip(&fields) {
                    if stored.compare(incoming) == FieldMatch::AliasCompatible {
                        stored.widen(incoming);
                    }
                }
                self.stats.merged += 1;
                tracing::debug!(name = %entry.name, "Merged shape into existing message");
                (index, Resolution::Merged)
            }
            Some((index, outcome)) => {
                self.stats.deduplicated += 1;
                tracing::debug!(name = %self.entries[index].name, "Reused identical message");
                (index, outcome)
            }
            None => {
                let name = naming::allocate(self.entries.len());
                tracing::debug!(name = %name, fields = fields.len(), "Registered new message");
                self.entries.push(MessageSignature::new(name, fields));
                self.stats.created += 1;
                (self.entries.len() - 1, Resolution::Created)
            }
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[MessageSignature] {
        &self.entries
    }

    /// Entries in declaration order (last created first)
    pub fn declaration_order(&self) -> impl Iterator<Item = &MessageSignature> {
        self.entries.iter().rev()
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&MessageSignature> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Resolution counters
    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    /// Rename an entry and every field referencing it.
    ///
    /// Returns `false` when no entry is called `from` or `to` is already taken
    /// by another entry.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.get(from).is_some();
        }
        if self.get(to).is_some() {
            return false;
        }
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == from) else {
            return false;
        };
        entry.name = to.to_string();

        for field in self.entries.iter_mut().flat_map(|entry| entry.fields.iter_mut()) {
            field.retarget(from, to);
        }
        true
    }

    /// Consume the registry, yielding its entries in insertion order
    pub fn into_entries(self) -> Vec<MessageSignature> {
        self.entries
    }
}

/// Pair fields at equal positions and fold their matches into one verdict
fn classify(entry: &MessageSignature, fields: &[FieldSignature]) -> Candidate {
    if entry.fields.len() != fields.len() {
        return Candidate::Rejected;
    }

    let mut verdict = Candidate::Exact;
    for (stored, incoming) in entry.fields.iter().zip(fields) {
        match stored.compare(incoming) {
            FieldMatch::Equal => {}
            FieldMatch::AliasCompatible => verdict = Candidate::Mergeable,
            FieldMatch::Incompatible => return Candidate::Rejected,
        }
    }
    verdict
}

/// Registry handle that can be shared between threads.
///
/// Building one sample holds the lock for the whole recursive traversal so
/// the scan-then-mutate steps of every nested `resolve` stay uninterrupted.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<SchemaRegistry>>,
}

impl SharedRegistry {
    /// Create a handle around an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to the registry
    pub fn with<R>(&self, f: impl FnOnce(&mut SchemaRegistry) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    /// Build one sample and return the name of its message
    pub fn build(&self, sample: &[serde_json::Value]) -> String {
        self.with(|registry| super::builder::build(registry, sample).name.clone())
    }

    /// Copy of the registry as it stands
    pub fn snapshot(&self) -> SchemaRegistry {
        self.with(|registry| registry.clone())
    }
}

impl From<SchemaRegistry> for SharedRegistry {
    fn from(registry: SchemaRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }
}
