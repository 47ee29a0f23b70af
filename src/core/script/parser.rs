//! Parser for workflow script expressions
//!
//! Grammar:
//!
//! ```text
//! script   := { separator } [ call { separator { separator } call } ] { separator }
//! call     := IDENT "(" [ value { "," value } ] ")"
//! value    := STRING | NUMBER | "true" | "false" | "null" | "NaN" | "Infinity"
//! ```

use super::lexer::{tokenize, Token, TokenKind};
use super::value::{ScriptCall, ScriptValue};
use crate::domain::ScriptError;

/// Parses exactly one call expression
///
/// Leading and trailing statement separators are allowed.
pub fn parse_call(source: &str) -> Result<ScriptCall, ScriptError> {
    let mut parser = Parser::new(source)?;
    parser.skip_separators();
    let call = parser.call()?;
    parser.skip_separators();
    if let Some(token) = parser.peek() {
        return Err(ScriptError::UnexpectedToken {
            expected: "end of script".to_string(),
            found: token.kind.to_string(),
            offset: token.offset,
        });
    }
    Ok(call)
}

/// Parses a sequence of calls separated by `;` or line breaks
pub fn parse_script(source: &str) -> Result<Vec<ScriptCall>, ScriptError> {
    let mut parser = Parser::new(source)?;
    let mut calls = Vec::new();

    parser.skip_separators();
    while parser.peek().is_some() {
        calls.push(parser.call()?);
        match parser.peek() {
            None => break,
            Some(Token {
                kind: TokenKind::Separator,
                ..
            }) => parser.skip_separators(),
            Some(token) => {
                return Err(ScriptError::UnexpectedToken {
                    expected: "';' or line break".to_string(),
                    found: token.kind.to_string(),
                    offset: token.offset,
                })
            }
        }
    }

    Ok(calls)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(source: &str) -> Result<Self, ScriptError> {
        Ok(Self {
            tokens: tokenize(source)?,
            position: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self, expected: &str) -> Result<Token, ScriptError> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or_else(|| ScriptError::UnexpectedEnd {
                expected: expected.to_string(),
            })?;
        self.position += 1;
        Ok(token)
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(t) if t.kind == TokenKind::Separator) {
            self.position += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ScriptError> {
        let expected = kind.to_string();
        let token = self.next(&expected)?;
        if token.kind == kind {
            Ok(())
        } else {
            Err(unexpected(&expected, &token))
        }
    }

    fn call(&mut self) -> Result<ScriptCall, ScriptError> {
        let token = self.next("function name")?;
        let TokenKind::Ident(function) = token.kind.clone() else {
            return Err(unexpected("function name", &token));
        };

        self.expect(TokenKind::LParen)?;
        let mut call = ScriptCall::new(function);

        if matches!(self.peek(), Some(t) if t.kind == TokenKind::RParen) {
            self.position += 1;
            return Ok(call);
        }

        loop {
            call.arguments.push(self.value()?);
            let token = self.next("',' or ')'")?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => return Ok(call),
                _ => return Err(unexpected("',' or ')'", &token)),
            }
        }
    }

    fn value(&mut self) -> Result<ScriptValue, ScriptError> {
        let token = self.next("argument")?;
        match &token.kind {
            TokenKind::Str(s) => Ok(ScriptValue::String(s.clone())),
            TokenKind::Number(n) => Ok(ScriptValue::Number(*n)),
            TokenKind::Ident(word) => match word.as_str() {
                "true" => Ok(ScriptValue::Boolean(true)),
                "false" => Ok(ScriptValue::Boolean(false)),
                "null" => Ok(ScriptValue::Null),
                "NaN" => Ok(ScriptValue::Number(f64::NAN)),
                "Infinity" => Ok(ScriptValue::Number(f64::INFINITY)),
                _ => Err(unexpected("literal argument", &token)),
            },
            _ => Err(unexpected("argument", &token)),
        }
    }
}

fn unexpected(expected: &str, token: &Token) -> ScriptError {
    ScriptError::UnexpectedToken {
        expected: expected.to_string(),
        found: token.kind.to_string(),
        offset: token.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        let call = parse_call(r#"exportTMAData("/data/out", 4.0)"#).unwrap();
        assert_eq!(call.function, "exportTMAData");
        assert_eq!(call.arguments[0].as_str(), Some("/data/out"));
        assert_eq!(call.arguments[1].as_f64(), Some(4.0));
    }

    #[test]
    fn test_parse_call_keywords() {
        let call = parse_call("f(true, false, null, NaN, -Infinity)").unwrap();
        assert_eq!(call.arguments[0], ScriptValue::Boolean(true));
        assert_eq!(call.arguments[1], ScriptValue::Boolean(false));
        assert_eq!(call.arguments[2], ScriptValue::Null);
        assert!(call.arguments[3].as_f64().unwrap().is_nan());
        assert_eq!(call.arguments[4].as_f64(), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_call_rejects_trailing_tokens() {
        let err = parse_call("a() b()").unwrap_err();
        assert!(matches!(err, ScriptError::UnexpectedToken { offset: 4, .. }));
    }

    #[test]
    fn test_parse_call_errors() {
        assert_eq!(
            parse_call("f(1,").unwrap_err(),
            ScriptError::UnexpectedEnd {
                expected: "argument".to_string()
            }
        );
        assert!(matches!(
            parse_call("f(x)").unwrap_err(),
            ScriptError::UnexpectedToken { offset: 2, .. }
        ));
        assert!(matches!(
            parse_call("\"f\"()").unwrap_err(),
            ScriptError::UnexpectedToken { offset: 0, .. }
        ));
    }

    #[test]
    fn test_parse_script() {
        let script = r#"
// recorded workflow
exportTMAData("/a", 4.0)
exportTMAData("/b", 1.0); exportTMAData("/c", 2.0);
"#;
        let calls = parse_script(script).unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].arguments[0].as_str(), Some("/c"));
    }

    #[test]
    fn test_parse_script_empty() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script("\n// nothing\n;").unwrap().is_empty());
    }

    #[test]
    fn test_parse_script_requires_separator() {
        assert!(parse_script("a() b()").is_err());
    }
}
