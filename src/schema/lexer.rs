//! Tokenizer for the type-expression notation

use super::parser::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Semi,
    Question,
    Pipe,
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Str(s) => write!(f, "string {:?}", s),
            TokenKind::Int(n) => write!(f, "integer {}", n),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub offset: usize,
}

/// Split a type expression into tokens, ending with [`TokenKind::Eof`]
pub fn tokenize(src: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let single = match c {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semi),
            '?' => Some(TokenKind::Question),
            '|' => Some(TokenKind::Pipe),
            _ => None,
        };
        if let Some(kind) = single {
            chars.next();
            tokens.push(Token { kind, offset });
            continue;
        }

        if c.is_whitespace() {
            chars.next();
        } else if c == '"' || c == '\'' {
            chars.next();
            let value = lex_string(offset, c, &mut chars)?;
            tokens.push(Token {
                kind: TokenKind::Str(value),
                offset,
            });
        } else if c.is_ascii_digit() || c == '-' {
            let value = lex_integer(src, offset, &mut chars)?;
            tokens.push(Token {
                kind: TokenKind::Int(value),
                offset,
            });
        } else if c.is_alphabetic() || c == '_' {
            let mut end = offset;
            while let Some(&(i, ch)) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    end = i + ch.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident(src[offset..end].to_string()),
                offset,
            });
        } else {
            return Err(SyntaxError::new(
                offset,
                format!("unexpected character '{}'", c),
            ));
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        offset: src.len(),
    });
    Ok(tokens)
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn lex_string(start: usize, quote: char, chars: &mut Chars<'_>) -> Result<String, SyntaxError> {
    let mut value = String::new();
    while let Some((offset, c)) = chars.next() {
        match c {
            c if c == quote => return Ok(value),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    '\\' | '"' | '\'' => escaped,
                    other => {
                        return Err(SyntaxError::new(
                            offset,
                            format!("unknown escape sequence '\\{}'", other),
                        ))
                    }
                });
            }
            _ => value.push(c),
        }
    }
    Err(SyntaxError::new(start, "unterminated string literal"))
}

fn lex_integer(src: &str, start: usize, chars: &mut Chars<'_>) -> Result<i64, SyntaxError> {
    let mut end = start;
    if let Some(&(_, '-')) = chars.peek() {
        chars.next();
        end += 1;
        if !matches!(chars.peek(), Some((_, d)) if d.is_ascii_digit()) {
            return Err(SyntaxError::new(start, "expected digits after '-'"));
        }
    }
    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() {
            end = i + 1;
            chars.next();
        } else if c == '.' || c == 'e' || c == 'E' {
            return Err(SyntaxError::new(start, "only integer constants are supported"));
        } else {
            break;
        }
    }
    src[start..end]
        .parse::<i64>()
        .map_err(|_| {
            SyntaxError::new(
                start,
                format!("integer literal {} out of range", &src[start..end]),
            )
        })
}
