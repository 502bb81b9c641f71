//! Text emitter for translated trees.
//!
//! The output layout is fixed: arrays stay on one line, non-empty objects
//! put one entry per line indented by two spaces per level, empty objects
//! print as `{}`. By default strings are written between quotes exactly as
//! they appeared in the source (no escaping), which is what existing
//! consumers of the translator see. [`EmitOptions::escape_strings`] switches
//! to RFC 8259 string encoding.

use super::node::{Document, Node, NodeRef};
use std::collections::BTreeMap;

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub escape_strings: bool,
}

pub fn to_json(node: &Node) -> String {
    to_json_with(node, EmitOptions::default())
}

pub fn to_json_with(node: &Node, options: EmitOptions) -> String {
    let mut out = String::new();
    Emitter { options, out: &mut out }.node(node, 0);
    out
}

pub fn document_to_json(doc: &Document, options: EmitOptions) -> String {
    let mut out = String::new();
    Emitter { options, out: &mut out }.mapping(doc.entries(), 0);
    out
}

struct Emitter<'a> {
    options: EmitOptions,
    out: &'a mut String,
}

impl Emitter<'_> {
    fn node(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Number(n) => self.out.push_str(&n.to_string()),
            Node::Text(s) => self.string(s),
            Node::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Node::Sequence(items) => self.sequence(items),
            Node::Mapping(entries) => self.mapping(entries, indent),
        }
    }

    // Elements restart at indent level 0, nested objects included.
    fn sequence(&mut self, items: &[NodeRef]) {
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 { self.out.push_str(", "); }
            self.node(item, 0);
        }
        self.out.push(']');
    }

    fn mapping(&mut self, entries: &BTreeMap<String, NodeRef>, indent: usize) {
        if entries.is_empty() {
            self.out.push_str("{}");
            return;
        }

        self.out.push_str("{\n");
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 { self.out.push_str(",\n"); }
            self.pad(indent + 1);
            self.string(key);
            self.out.push_str(": ");
            self.node(value, indent + 1);
        }
        self.out.push('\n');
        self.pad(indent);
        self.out.push('}');
    }

    fn string(&mut self, s: &str) {
        if self.options.escape_strings {
            // Serializing a &str cannot fail.
            match serde_json::to_string(s) {
                Ok(encoded) => self.out.push_str(&encoded),
                Err(_) => self.verbatim(s),
            }
        } else {
            self.verbatim(s);
        }
    }

    fn verbatim(&mut self, s: &str) {
        self.out.push('"');
        self.out.push_str(s);
        self.out.push('"');
    }

    fn pad(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn num(n: i64) -> NodeRef {
        Rc::new(Node::Number(n))
    }

    fn mapping(entries: Vec<(&str, NodeRef)>) -> Node {
        Node::Mapping(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn scalars() {
        assert_eq!(to_json(&Node::Number(-26)), "-26");
        assert_eq!(to_json(&Node::Boolean(false)), "false");
        assert_eq!(to_json(&Node::Text("hi".into())), "\"hi\"");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(to_json(&Node::empty_mapping()), "{}");
        assert_eq!(to_json(&Node::Sequence(vec![])), "[]");
    }

    #[test]
    fn sequence_is_single_line() {
        let seq = Node::Sequence(vec![num(1), num(2), Rc::new(Node::Sequence(vec![num(3)]))]);
        assert_eq!(to_json(&seq), "[1, 2, [3]]");
    }

    #[test]
    fn nested_mapping_indents_two_spaces_per_level() {
        let inner = Rc::new(mapping(vec![("port", num(8822)), ("host", Rc::new(Node::Text("localhost".into())))]));
        let root = mapping(vec![("app", inner)]);
        assert_eq!(
            to_json(&root),
            "{\n  \"app\": {\n    \"host\": \"localhost\",\n    \"port\": 8822\n  }\n}"
        );
    }

    #[test]
    fn mapping_inside_sequence_starts_at_column_zero() {
        let obj = Rc::new(mapping(vec![("a", num(1))]));
        let root = mapping(vec![("list", Rc::new(Node::Sequence(vec![obj])))]);
        assert_eq!(to_json(&root), "{\n  \"list\": [{\n  \"a\": 1\n}]\n}");
    }

    #[test]
    fn verbatim_strings_are_not_escaped() {
        let node = Node::Text("say \\\"hi".into());
        assert_eq!(to_json(&node), "\"say \\\"hi\"");
    }

    #[test]
    fn escaped_strings_follow_json_rules() {
        let node = Node::Text("a\"b\\c\n".into());
        let out = to_json_with(&node, EmitOptions { escape_strings: true });
        assert_eq!(out, r#""a\"b\\c\n""#);
        let back: String = serde_json::from_str(&out).unwrap();
        assert_eq!(back, "a\"b\\c\n");
    }
}
