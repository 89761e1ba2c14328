//! Name to dense id lookup.

use std::collections::HashMap;

use crate::domain::DenseId;

/// Bidirectional mapping between names and dense ids.
///
/// Ids are handed out in insertion order starting from zero. This is the
/// only place ids are allocated.
#[derive(Debug, Clone)]
pub struct NameIndex<Id> {
    ids: HashMap<String, Id>,
    names: Vec<String>,
}

impl<Id: DenseId> NameIndex<Id> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Id for `name`, allocating a fresh one if the name is new.
    pub fn insert(&mut self, name: &str) -> Id {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = Id::from_index(self.names.len());
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Look up the id of a name.
    pub fn id(&self, name: &str) -> Option<Id> {
        self.ids.get(name).copied()
    }

    /// Name behind an id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this index.
    pub fn name(&self, id: Id) -> &str {
        match self.names.get(id.index()) {
            Some(name) => name,
            None => panic!("{id:?} was not allocated by this name index"),
        }
    }

    /// Returns the number of names in the index.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names have been inserted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<Id: DenseId> Default for NameIndex<Id> {
    fn default() -> Self {
        Self::new()
    }
}
