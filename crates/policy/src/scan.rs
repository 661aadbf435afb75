//! Tokenizer for the HCL-flavoured policy grammar: `ident = value` and
//! `ident "label" { ... }` blocks, line comments with `#` or `//`.

use crate::error::{PolicyError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    Number(i64),
    Bool(bool),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Eq,
    Eof,
}

pub struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    src: &'a str,
    pub line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner {
            chars: src.char_indices().peekable(),
            src,
            line: 1,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.chars.peek().copied() {
                Some((_, c)) if c.is_whitespace() => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    self.chars.next();
                }
                Some((_, '#')) => {
                    while let Some((_, c)) = self.chars.peek().copied() {
                        if c == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                }
                Some((i, '/')) => {
                    if self.src[i..].starts_with("//") {
                        while let Some((_, c)) = self.chars.peek().copied() {
                            if c == '\n' {
                                break;
                            }
                            self.chars.next();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();
        let (start, c) = match self.chars.next() {
            Some(pair) => pair,
            None => return Ok(Token::Eof),
        };
        match c {
            '{' => Ok(Token::LBrace),
            '}' => Ok(Token::RBrace),
            '[' => Ok(Token::LBracket),
            ']' => Ok(Token::RBracket),
            ',' => Ok(Token::Comma),
            '=' => Ok(Token::Eq),
            '"' => self.scan_string(),
            c if c.is_ascii_digit() || (c == '-' && self.peek_digit()) => {
                self.scan_number(start)
            }
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_ident(start)),
            other => Err(PolicyError::Syntax {
                line: self.line,
                message: format!("unexpected character '{other}'"),
            }),
        }
    }

    fn peek_digit(&mut self) -> bool {
        self.chars
            .peek()
            .map(|(_, c)| c.is_ascii_digit())
            .unwrap_or(false)
    }

    fn scan_string(&mut self) -> Result<Token> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(Token::Str(out)),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, c)) => out.push(c),
                    None => {
                        return Err(PolicyError::Syntax {
                            line: self.line,
                            message: "unterminated string".into(),
                        })
                    }
                },
                Some((_, c)) => out.push(c),
                None => {
                    return Err(PolicyError::Syntax {
                        line: self.line,
                        message: "unterminated string".into(),
                    })
                }
            }
        }
    }

    fn scan_number(&mut self, start: usize) -> Result<Token> {
        let mut end = start + 1;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_ascii_digit() {
                end = i + 1;
                self.chars.next();
            } else {
                break;
            }
        }
        self.src[start..end]
            .parse()
            .map(Token::Number)
            .map_err(|_| PolicyError::Syntax {
                line: self.line,
                message: format!("invalid number literal '{}'", &self.src[start..end]),
            })
    }

    fn scan_ident(&mut self, start: usize) -> Token {
        let mut end = start + 1;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                end = i + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        let word = &self.src[start..end];
        match word {
            "true" => Token::Bool(true),
            "false" => Token::Bool(false),
            _ => Token::Ident(word.to_string()),
        }
    }
}
