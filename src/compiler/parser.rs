use super::constants::{Constant, ConstantTable};
use super::lexer::{Lexer, Token, TokenKind};
use crate::ast::{Document, Node, NodeRef};
use crate::error::{Expected, TranslateError};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::num::IntErrorKind;
use std::rc::Rc;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Upper bound on emitted nodes. References are expanded at every use, so
/// a chain of globals can describe a tree far larger than its source.
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Key under which top-level bare blocks are stored.
pub const UNNAMED_KEY: &str = "unnamed";

/// Recursive-descent parser with one token of lookahead.
///
/// Tokens are pulled from the lexer on demand. The parser owns the constant
/// table for the duration of one parse.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    constants: ConstantTable,
    depth: usize,
    max_depth: usize,
    // Deepest nesting reached by the value being parsed, spliced constants included.
    peak: usize,
    nodes: usize,
    max_nodes: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            constants: ConstantTable::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            peak: 0,
            nodes: 0,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Limits how many objects/arrays may be open at once.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Limits how many nodes the emitted document may expand to.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub fn parse(&mut self) -> Result<Document, TranslateError> {
        let mut root = Document::new();

        while !self.check(TokenKind::End) {
            match self.current.kind {
                TokenKind::Global => self.parse_global()?,
                TokenKind::Identifier => {
                    let (key, value) = self.parse_assignment()?;
                    if root.insert(key.clone(), value).is_some() {
                        debug!("top-level key '{}' overwritten", key);
                    }
                }
                TokenKind::LBrace => {
                    let block = self.parse_object()?;
                    if root.insert(UNNAMED_KEY, Rc::new(block)).is_some() {
                        debug!("bare block replaces previous '{}' entry", UNNAMED_KEY);
                    }
                }
                _ => return Err(TranslateError::syntax(Expected::Declaration, &self.current)),
            }
        }

        Ok(root)
    }

    // --- Token plumbing ---

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let token = std::mem::replace(&mut self.current, next);
        trace!("consumed {} {:?} at {}:{}", token.kind, token.text, token.line, token.column);
        token
    }

    fn consume(&mut self, expected: TokenKind) -> Result<Token, TranslateError> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(TranslateError::syntax(Expected::Kind(expected), &self.current))
        }
    }

    // `open` is the token that starts the container, used for the error position.
    fn enter(&mut self, open: &Token) -> Result<(), TranslateError> {
        if self.depth >= self.max_depth {
            return Err(TranslateError::NestingTooDeep {
                limit: self.max_depth,
                line: open.line,
                column: open.column,
            });
        }
        self.depth += 1;
        self.peak = self.peak.max(self.depth);
        Ok(())
    }

    fn count(&mut self, nodes: usize, at: &Token) -> Result<(), TranslateError> {
        self.nodes = self.nodes.saturating_add(nodes);
        if self.nodes > self.max_nodes {
            return Err(TranslateError::TooManyNodes {
                limit: self.max_nodes,
                line: at.line,
                column: at.column,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // --- Top level ---

    fn parse_global(&mut self) -> Result<(), TranslateError> {
        self.consume(TokenKind::Global)?;
        let name = self.consume(TokenKind::Identifier)?.text;
        self.consume(TokenKind::Equals)?;

        // Globals are not emitted themselves; only their references count.
        let nodes_before = self.nodes;
        self.peak = 0;
        let node = self.parse_value()?;
        let constant = Constant { node, depth: self.peak, size: self.nodes - nodes_before };
        self.nodes = nodes_before;

        debug!(
            "global '{}' = {} (depth {}, {} nodes)",
            name, constant.node.type_name(), constant.depth, constant.size
        );
        if self.constants.publish(name.clone(), constant).is_some() {
            debug!("global '{}' redeclared", name);
        }
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<(String, NodeRef), TranslateError> {
        let key = self.consume(TokenKind::Identifier)?.text;
        self.consume(TokenKind::Equals)?;
        let value = self.parse_value()?;
        Ok((key, value))
    }

    // --- Values ---

    fn parse_value(&mut self) -> Result<NodeRef, TranslateError> {
        match self.current.kind {
            TokenKind::Number => {
                let token = self.advance();
                self.count(1, &token)?;
                Ok(Rc::new(Node::Number(decode_hex(&token)?)))
            }
            TokenKind::String => {
                let token = self.advance();
                self.count(1, &token)?;
                // `true`/`false` become booleans whether quoted or bare.
                let node = match token.text.as_str() {
                    "true" => Node::Boolean(true),
                    "false" => Node::Boolean(false),
                    _ => Node::Text(token.text),
                };
                Ok(Rc::new(node))
            }
            TokenKind::Hash => self.parse_array(),
            TokenKind::Question => self.parse_reference(),
            TokenKind::LBrace => Ok(Rc::new(self.parse_object()?)),
            _ => Err(TranslateError::syntax(Expected::Value, &self.current)),
        }
    }

    fn parse_array(&mut self) -> Result<NodeRef, TranslateError> {
        let open = self.consume(TokenKind::Hash)?;
        self.consume(TokenKind::LParen)?;
        self.enter(&open)?;
        self.count(1, &open)?;

        let mut items = Vec::new();
        while !self.check(TokenKind::RParen) && !self.check(TokenKind::End) {
            items.push(self.parse_value()?);
        }

        self.consume(TokenKind::RParen)?;
        self.leave();
        Ok(Rc::new(Node::Sequence(items)))
    }

    fn parse_reference(&mut self) -> Result<NodeRef, TranslateError> {
        let open = self.consume(TokenKind::Question)?;
        self.consume(TokenKind::LBracket)?;
        let name = self.consume(TokenKind::Identifier)?;
        self.consume(TokenKind::RBracket)?;

        let constant = self.constants.get(&name.text).ok_or_else(|| TranslateError::UnknownConstant {
            name: name.text.clone(),
            line: name.line,
            column: name.column,
        })?;
        let (node, depth, size) = (constant.node.clone(), constant.depth, constant.size);

        // The spliced tree nests as deep here as it did where it was declared.
        let spliced_depth = self.depth.saturating_add(depth);
        if spliced_depth > self.max_depth {
            return Err(TranslateError::NestingTooDeep {
                limit: self.max_depth,
                line: open.line,
                column: open.column,
            });
        }
        self.peak = self.peak.max(spliced_depth);
        self.count(size, &open)?;
        Ok(node)
    }

    fn parse_object(&mut self) -> Result<Node, TranslateError> {
        let open = self.consume(TokenKind::LBrace)?;
        self.enter(&open)?;
        self.count(1, &open)?;

        let mut entries = BTreeMap::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::End) {
            if !self.check(TokenKind::Identifier) {
                return Err(TranslateError::syntax(Expected::Kind(TokenKind::Identifier), &self.current));
            }
            let (key, value) = self.parse_assignment()?;
            entries.insert(key, value);
        }

        self.consume(TokenKind::RBrace)?;
        self.leave();
        Ok(Node::Mapping(entries))
    }
}

fn decode_hex(token: &Token) -> Result<i64, TranslateError> {
    i64::from_str_radix(&token.text, 16).map_err(|e| match e.kind() {
        IntErrorKind::Empty => TranslateError::InvalidNumber {
            line: token.line,
            column: token.column,
        },
        _ => TranslateError::NumericOverflow {
            literal: token.text.clone(),
            line: token.line,
            column: token.column,
        },
    })
}
