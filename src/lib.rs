pub mod ast;
pub mod compiler;
pub mod config;
pub mod error;
pub mod selftest;

pub use ast::{Document, Node, NodeRef};
pub use compiler::{compile, compile_with, translate, translate_with};
pub use config::TranslatorConfig;
pub use error::TranslateError;
