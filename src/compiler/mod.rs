pub mod constants;
pub mod lexer;
pub mod parser;

use crate::ast::{self, Document, EmitOptions};
use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use parser::Parser;

/// Parses `source` into a document using the default limits.
pub fn compile(source: &str) -> Result<Document, TranslateError> {
    compile_with(source, &TranslatorConfig::default())
}

pub fn compile_with(source: &str, config: &TranslatorConfig) -> Result<Document, TranslateError> {
    let mut parser = Parser::new(source)
        .with_max_depth(config.max_depth)
        .with_max_nodes(config.max_nodes);
    parser.parse()
}

/// Source text in, JSON text out. Nothing is produced unless the whole
/// input parses.
pub fn translate(source: &str) -> Result<String, TranslateError> {
    translate_with(source, &TranslatorConfig::default())
}

pub fn translate_with(source: &str, config: &TranslatorConfig) -> Result<String, TranslateError> {
    let document = compile_with(source, config)?;
    let options = EmitOptions { escape_strings: config.escape_strings };
    Ok(ast::document_to_json(&document, options))
}
