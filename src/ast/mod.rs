pub mod emit;
pub mod node;

// Re-exports so callers can write crate::ast::{Node, Document, ...}
pub use emit::{EmitOptions, document_to_json, to_json, to_json_with};
pub use node::{Document, Node, NodeRef};
