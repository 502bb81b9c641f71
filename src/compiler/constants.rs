use crate::ast::NodeRef;
use std::collections::HashMap;

/// A published global together with the measurements the parser needs to
/// splice it in without walking the tree again.
#[derive(Debug, Clone)]
pub struct Constant {
    pub node: NodeRef,
    /// Nesting of objects/arrays inside the value (a scalar is 0).
    pub depth: usize,
    /// Nodes the value expands to when emitted, references included.
    pub size: usize,
}

/// Globals declared so far in the current parse.
///
/// Values are handed out as shared handles; a lookup never copies the tree.
#[derive(Debug, Default)]
pub struct ConstantTable {
    entries: HashMap<String, Constant>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `constant` under `name`. Redeclaring a name replaces the
    /// binding for later references; nodes already handed out keep the
    /// value they were given.
    pub fn publish(&mut self, name: impl Into<String>, constant: Constant) -> Option<Constant> {
        self.entries.insert(name.into(), constant)
    }

    pub fn get(&self, name: &str) -> Option<&Constant> {
        self.entries.get(name)
    }
}
