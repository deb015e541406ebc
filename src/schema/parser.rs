//! Recursive-descent parser for the type-expression notation
//!
//! ```text
//! type     := '|'? postfix ('|' postfix)*
//! postfix  := primary ('[]' | '?')*
//! primary  := 'void' | 'null' | 'boolean' | 'string' | 'number'
//!           | 'true' | 'false' | STRING | INTEGER | IDENT
//!           | '{' (field (',' | ';')?)* '}' | '(' type ')'
//! field    := (IDENT | STRING) '?'? ':' type
//! ```
//!
//! Any other identifier is a reference to a named type.

use super::lexer::{tokenize, Token, TokenKind};
use crate::model::{ObjectField, TypeNode};
use indexmap::IndexMap;
use thiserror::Error;

/// Deepest type tree an expression may describe
pub const MAX_NESTING: usize = 128;

/// Words with a fixed meaning in type expressions
pub const KEYWORDS: [&str; 7] = ["void", "null", "boolean", "string", "number", "true", "false"];

/// A type-expression syntax error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (at offset {offset})")]
pub struct SyntaxError {
    /// Byte offset into the expression
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Parse a complete type expression
pub fn parse_type(src: &str) -> Result<TypeNode, SyntaxError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let node = parser.parse_union()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::Eof {
        return Err(SyntaxError::new(
            trailing.offset,
            format!("unexpected {} after type", trailing.kind),
        ));
    }
    Ok(node)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Unions currently open, including parenthesized ones and field types
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize always ends with Eof, and Eof is never consumed
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), SyntaxError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(())
        } else {
            Err(SyntaxError::new(
                token.offset,
                format!("expected {}, found {}", kind, token.kind),
            ))
        }
    }

    fn too_deep(&self, levels: usize) -> Result<(), SyntaxError> {
        if levels > MAX_NESTING {
            Err(SyntaxError::new(
                self.peek().offset,
                format!("type nested deeper than {} levels", MAX_NESTING),
            ))
        } else {
            Ok(())
        }
    }

    fn parse_union(&mut self) -> Result<TypeNode, SyntaxError> {
        self.too_deep(self.depth + 1)?;
        self.depth += 1;
        let node = self.parse_variants();
        self.depth -= 1;
        node
    }

    fn parse_variants(&mut self) -> Result<TypeNode, SyntaxError> {
        self.eat(&TokenKind::Pipe);
        let mut variants = vec![self.parse_postfix()?];
        while self.eat(&TokenKind::Pipe) {
            variants.push(self.parse_postfix()?);
        }
        if variants.len() == 1 {
            Ok(variants.remove(0))
        } else {
            Ok(TypeNode::Union { types: variants })
        }
    }

    fn parse_postfix(&mut self) -> Result<TypeNode, SyntaxError> {
        let mut node = self.parse_primary()?;
        let mut wrappers = 0;
        loop {
            if self.eat(&TokenKind::LBracket) {
                self.expect(TokenKind::RBracket)?;
                node = TypeNode::array(node);
            } else if self.eat(&TokenKind::Question) {
                node = TypeNode::optional(node);
            } else {
                return Ok(node);
            }
            wrappers += 1;
            self.too_deep(self.depth + wrappers)?;
        }
    }

    fn parse_primary(&mut self) -> Result<TypeNode, SyntaxError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Ident(name) => Ok(match name.as_str() {
                "void" => TypeNode::Void,
                "null" => TypeNode::Null,
                "boolean" => TypeNode::Boolean,
                "string" => TypeNode::String,
                "number" => TypeNode::Number,
                "true" => TypeNode::boolean_constant(true),
                "false" => TypeNode::boolean_constant(false),
                _ => TypeNode::reference(name),
            }),
            TokenKind::Str(value) => Ok(TypeNode::string_constant(value)),
            TokenKind::Int(value) => Ok(TypeNode::integer_constant(value)),
            TokenKind::LBrace => self.parse_object_body(),
            TokenKind::LParen => {
                let inner = self.parse_union()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(SyntaxError::new(
                token.offset,
                format!("expected a type, found {}", other),
            )),
        }
    }

    /// Fields after the opening brace, through the closing brace
    fn parse_object_body(&mut self) -> Result<TypeNode, SyntaxError> {
        let mut fields: IndexMap<String, ObjectField> = IndexMap::new();

        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(TypeNode::Object { fields });
            }

            let token = self.advance();
            let name = match token.kind {
                TokenKind::Ident(name) | TokenKind::Str(name) => name,
                other => {
                    return Err(SyntaxError::new(
                        token.offset,
                        format!("expected a field name, found {}", other),
                    ))
                }
            };
            if fields.contains_key(&name) {
                return Err(SyntaxError::new(
                    token.offset,
                    format!("duplicate field '{}'", name),
                ));
            }

            let optional = self.eat(&TokenKind::Question);
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_union()?;
            fields.insert(name, ObjectField { ty, optional });

            let separated = self.eat(&TokenKind::Comma) || self.eat(&TokenKind::Semi);
            if !separated && self.peek().kind != TokenKind::RBrace {
                let next = self.peek();
                return Err(SyntaxError::new(
                    next.offset,
                    format!("expected ',' or '}}', found {}", next.kind),
                ));
            }
        }
    }
}
