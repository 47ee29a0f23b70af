//! Tokenizer for workflow scripts

use crate::domain::ScriptError;
use std::fmt;

/// Token kinds produced by [`tokenize`]
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier or keyword (`exportTMAData`, `true`, `NaN`, ...)
    Ident(String),
    /// Unescaped string literal content
    Str(String),
    /// Numeric literal
    Number(f64),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;` or a line break
    Separator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Str(_) => f.write_str("string literal"),
            TokenKind::Number(_) => f.write_str("number"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Separator => f.write_str("end of statement"),
        }
    }
}

/// A token and the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Splits `source` into tokens, dropping whitespace and `//` comments
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    let mut lexer = Lexer {
        source,
        chars: source.char_indices().peekable(),
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Result<Option<Token>, ScriptError> {
        loop {
            let Some(&(offset, c)) = self.chars.peek() else {
                return Ok(None);
            };

            let kind = match c {
                '\n' | ';' => {
                    self.chars.next();
                    TokenKind::Separator
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                '/' if self.source[offset..].starts_with("//") => {
                    self.skip_line();
                    continue;
                }
                '(' => {
                    self.chars.next();
                    TokenKind::LParen
                }
                ')' => {
                    self.chars.next();
                    TokenKind::RParen
                }
                ',' => {
                    self.chars.next();
                    TokenKind::Comma
                }
                '"' => self.string(offset)?,
                '-' => self.negative(offset)?,
                c if c.is_ascii_digit() || c == '.' => self.number(offset)?,
                c if c.is_alphabetic() || c == '_' => TokenKind::Ident(self.ident()),
                found => return Err(ScriptError::UnexpectedChar { found, offset }),
            };

            return Ok(Some(Token { kind, offset }));
        }
    }

    fn skip_line(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn ident(&mut self) -> String {
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        name
    }

    fn negative(&mut self, offset: usize) -> Result<TokenKind, ScriptError> {
        self.chars.next();
        match self.chars.peek() {
            Some(&(_, c)) if c.is_ascii_digit() || c == '.' => match self.number(offset + 1)? {
                TokenKind::Number(n) => Ok(TokenKind::Number(-n)),
                other => Ok(other),
            },
            Some(&(_, c)) if c.is_alphabetic() => {
                let word = self.ident();
                if word == "Infinity" {
                    Ok(TokenKind::Number(f64::NEG_INFINITY))
                } else {
                    Err(ScriptError::UnexpectedToken {
                        expected: "number after '-'".to_string(),
                        found: format!("identifier '{word}'"),
                        offset: offset + 1,
                    })
                }
            }
            _ => Err(ScriptError::UnexpectedChar { found: '-', offset }),
        }
    }

    fn number(&mut self, offset: usize) -> Result<TokenKind, ScriptError> {
        let mut end = offset;
        let mut previous = '\0';
        while let Some(&(i, c)) = self.chars.peek() {
            let exponent_sign = (c == '+' || c == '-') && (previous == 'e' || previous == 'E');
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                previous = c;
                end = i + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }

        let literal = &self.source[offset..end];
        literal
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ScriptError::InvalidNumber {
                literal: literal.to_string(),
                offset,
            })
    }

    fn string(&mut self, offset: usize) -> Result<TokenKind, ScriptError> {
        self.chars.next(); // opening quote
        let mut value = String::new();

        while let Some((i, c)) = self.chars.next() {
            match c {
                '"' => return Ok(TokenKind::Str(value)),
                '\\' => {
                    let Some((_, escaped)) = self.chars.next() else {
                        break;
                    };
                    match escaped {
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        '\'' => value.push('\''),
                        '/' => value.push('/'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'u' => value.push(self.unicode_escape(i)?),
                        _ => return Err(ScriptError::InvalidEscape { offset: i }),
                    }
                }
                c => value.push(c),
            }
        }

        Err(ScriptError::UnterminatedString { offset })
    }

    fn unicode_escape(&mut self, offset: usize) -> Result<char, ScriptError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .chars
                .next()
                .and_then(|(_, c)| c.to_digit(16))
                .ok_or(ScriptError::InvalidEscape { offset })?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or(ScriptError::InvalidEscape { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_call() {
        assert_eq!(
            kinds(r#"exportTMAData("/out", 4.0)"#),
            vec![
                TokenKind::Ident("exportTMAData".to_string()),
                TokenKind::LParen,
                TokenKind::Str("/out".to_string()),
                TokenKind::Comma,
                TokenKind::Number(4.0),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_escapes() {
        assert_eq!(
            kinds(r#""C:\\dir\\\"x\"\n\u0041""#),
            vec![TokenKind::Str("C:\\dir\\\"x\"\nA".to_string())]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            kinds("1 -2.5 1e3 2.5E-1 -Infinity"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(-2.5),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.25),
                TokenKind::Number(f64::NEG_INFINITY),
            ]
        );
    }

    #[test]
    fn test_tokenize_comments_and_separators() {
        assert_eq!(
            kinds("a() // trailing\n// whole line\nb();"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Separator,
                TokenKind::Separator,
                TokenKind::Ident("b".to_string()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Separator,
            ]
        );
    }

    #[test]
    fn test_tokenize_errors() {
        assert_eq!(
            tokenize("\"open").unwrap_err(),
            ScriptError::UnterminatedString { offset: 0 }
        );
        assert_eq!(
            tokenize(r#""bad \q""#).unwrap_err(),
            ScriptError::InvalidEscape { offset: 5 }
        );
        assert_eq!(
            tokenize("f(#)").unwrap_err(),
            ScriptError::UnexpectedChar { found: '#', offset: 2 }
        );
        assert!(matches!(
            tokenize("1.2.3").unwrap_err(),
            ScriptError::InvalidNumber { .. }
        ));
    }
}
