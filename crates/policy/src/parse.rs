//! Recursive-descent parser producing a generic block tree. A second
//! pass (`build.rs`) maps that tree onto the typed `Config` model —
//! mirroring the integrator/validator split of the original config
//! loader, which also decoded into a generic object before mapping
//! onto typed structs.

use crate::error::{PolicyError, Result};
use crate::scan::{Scanner, Token};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Bool(bool),
    Number(i64),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Vec<Value> {
        match self {
            Value::List(items) => items.clone(),
            other => vec![other.clone()],
        }
    }

    pub fn as_str_list(&self) -> Vec<String> {
        self.as_list()
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect()
    }
}

/// One HCL-style block: `kind "label" { attrs...; nested blocks... }`.
/// Top-level key/value pairs are represented as blocks with no label
/// and no children, stored directly in `attrs` of the document root.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub kind: String,
    pub label: Option<String>,
    pub attrs: HashMap<String, Value>,
    pub children: Vec<Block>,
}

impl Block {
    pub fn attr_str(&self, key: &str) -> String {
        self.attrs
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn attr_bool(&self, key: &str) -> bool {
        self.attrs.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn attr_str_list(&self, key: &str) -> Vec<String> {
        self.attrs
            .get(key)
            .map(Value::as_str_list)
            .unwrap_or_default()
    }

    pub fn children_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Block> {
        self.children.iter().filter(move |b| b.kind == kind)
    }
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    lookahead: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(src),
            lookahead: None,
        }
    }

    fn peek(&mut self) -> Result<Token> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.scanner.next_token()?);
        }
        Ok(self.lookahead.clone().unwrap())
    }

    fn advance(&mut self) -> Result<Token> {
        match self.lookahead.take() {
            Some(t) => Ok(t),
            None => self.scanner.next_token(),
        }
    }

    /// Parses the whole document as the root block's body.
    pub fn parse_document(mut self) -> Result<Block> {
        let mut root = Block::default();
        self.parse_body(&mut root)?;
        Ok(root)
    }

    fn parse_body(&mut self, into: &mut Block) -> Result<()> {
        loop {
            match self.peek()? {
                Token::Eof | Token::RBrace => return Ok(()),
                Token::Ident(name) => {
                    self.advance()?;
                    self.parse_entry(name, into)?;
                }
                other => {
                    return Err(PolicyError::Syntax {
                        line: self.scanner.line,
                        message: format!("unexpected token {other:?}"),
                    })
                }
            }
        }
    }

    fn parse_entry(&mut self, name: String, into: &mut Block) -> Result<()> {
        match self.peek()? {
            Token::Eq => {
                self.advance()?;
                let value = self.parse_value()?;
                into.attrs.insert(name, value);
                Ok(())
            }
            Token::Str(_) | Token::LBrace => {
                let label = if let Token::Str(s) = self.peek()? {
                    self.advance()?;
                    Some(s)
                } else {
                    None
                };
                self.expect(Token::LBrace)?;
                let mut block = Block {
                    kind: name,
                    label,
                    ..Default::default()
                };
                self.parse_body(&mut block)?;
                self.expect(Token::RBrace)?;
                into.children.push(block);
                Ok(())
            }
            other => Err(PolicyError::Syntax {
                line: self.scanner.line,
                message: format!("expected '=' or block body, got {other:?}"),
            }),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.advance()? {
            Token::Str(s) => Ok(Value::Str(s)),
            Token::Bool(b) => Ok(Value::Bool(b)),
            Token::Number(n) => Ok(Value::Number(n)),
            Token::LBracket => {
                let mut items = Vec::new();
                loop {
                    if self.peek()? == Token::RBracket {
                        self.advance()?;
                        break;
                    }
                    items.push(self.parse_value()?);
                    if self.peek()? == Token::Comma {
                        self.advance()?;
                    }
                }
                Ok(Value::List(items))
            }
            other => Err(PolicyError::Syntax {
                line: self.scanner.line,
                message: format!("expected value, got {other:?}"),
            }),
        }
    }

    fn expect(&mut self, want: Token) -> Result<()> {
        let got = self.advance()?;
        if got == want {
            Ok(())
        } else {
            Err(PolicyError::Syntax {
                line: self.scanner.line,
                message: format!("expected {want:?}, got {got:?}"),
            })
        }
    }
}
