use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared handle to a node. Constants are published as `NodeRef`s and every
/// `?[NAME]` site clones the handle, so a constant is stored once no matter
/// how often it is referenced. There is no interior mutability: once a node
/// is wrapped it can no longer change.
pub type NodeRef = Rc<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(i64),
    Text(String),
    Boolean(bool),
    Sequence(Vec<NodeRef>),
    // BTreeMap: keys come out in lexicographic order, duplicates overwrite.
    Mapping(BTreeMap<String, NodeRef>),
}

impl Node {
    pub fn empty_mapping() -> Self {
        Node::Mapping(BTreeMap::new())
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[NodeRef]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, NodeRef>> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&NodeRef> {
        self.as_mapping()?.get(key)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "number",
            Node::Text(_) => "text",
            Node::Boolean(_) => "boolean",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Structured view of the tree. `serde_json`'s default map is ordered
    /// by key, which matches the text emitter.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value as JsonValue;
        match self {
            Node::Number(n) => JsonValue::from(*n),
            Node::Text(s) => JsonValue::String(s.clone()),
            Node::Boolean(b) => JsonValue::Bool(*b),
            Node::Sequence(items) => {
                JsonValue::Array(items.iter().map(|i| i.to_json_value()).collect())
            }
            Node::Mapping(entries) => {
                let mut map = serde_json::Map::new();
                for (k, v) in entries {
                    map.insert(k.clone(), v.to_json_value());
                }
                JsonValue::Object(map)
            }
        }
    }
}

/// The root of a translated file. Always a mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    entries: BTreeMap<String, NodeRef>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: NodeRef) -> Option<NodeRef> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&NodeRef> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, NodeRef> {
        &self.entries
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (k, v) in &self.entries {
            map.insert(k.clone(), v.to_json_value());
        }
        serde_json::Value::Object(map)
    }
}
