//! Symbolic state: an ordered variable → value map with structural equality.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{ClarifError, ClarifResult};

/// An opaque, comparable variable value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Sym(String),
}

impl Value {
    /// Parse a literal: integers become `Int`, anything else `Sym`.
    pub fn parse(literal: &str) -> Self {
        literal
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Sym(literal.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            // A symbol that reads as an integer is quoted so it parses back as a symbol.
            Self::Sym(s) if needs_quoting(s) || s.parse::<i64>().is_ok() => write_quoted(f, s),
            Self::Sym(s) => f.write_str(s),
        }
    }
}

/// Whether `text` must be quoted to survive the `k=v,k=v` form.
fn needs_quoting(text: &str) -> bool {
    text.is_empty() || text.trim() != text || text.contains([',', '=', '"', '\\'])
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    f.write_char('"')
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Sym(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Sym(s)
    }
}

/// A snapshot of tracked variables.
///
/// Equality, hashing, and ordering are structural over the key-sorted map, so
/// two states are equal iff they bind the same keys to the same values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    vars: BTreeMap<String, Value>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Look up a variable. Absent keys are an error, never a default.
    pub fn get(&self, key: &str) -> ClarifResult<&Value> {
        self.vars.get(key).ok_or_else(|| ClarifError::VariableNotFound {
            key: key.to_string(),
            state: self.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Exchange the values of two existing variables.
    pub fn swap(&mut self, left: &str, right: &str) -> ClarifResult<()> {
        let left_value = self.get(left)?.clone();
        let right_value = self.get(right)?.clone();
        self.vars.insert(left.to_string(), right_value);
        self.vars.insert(right.to_string(), left_value);
        Ok(())
    }

    /// Copy of `self` with every binding of `other` written over it.
    pub fn overlay(&self, other: &State) -> State {
        let mut merged = self.clone();
        for (key, value) in &other.vars {
            merged.vars.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Subsumption: true iff every binding of `self` is present, with an equal
    /// value, in `full`. `self` is the partial pattern; `full` may carry more
    /// keys. The empty state matches everything.
    pub fn matches(&self, full: &State) -> bool {
        self.vars
            .iter()
            .all(|(key, value)| full.vars.get(key) == Some(value))
    }

    /// Restrict to the given keys. Keys absent from `self` are an error.
    pub fn project<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> ClarifResult<State> {
        let mut projected = State::new();
        for key in keys {
            projected.set(key, self.get(key)?.clone());
        }
        Ok(projected)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if needs_quoting(key) {
                write_quoted(f, key)?;
            } else {
                f.write_str(key)?;
            }
            write!(f, "={value}")?;
        }
        Ok(())
    }
}

/// A key or value read from the text form.
enum Token {
    /// Between double quotes, escapes resolved. Always a symbol.
    Quoted(String),
    /// Trimmed text up to the next `,` or `=`.
    Bare(String),
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn read_token(chars: &mut Peekable<Chars<'_>>) -> Result<Token, String> {
    skip_whitespace(chars);
    if chars.next_if_eq(&'"').is_none() {
        let mut bare = String::new();
        while let Some(ch) = chars.next_if(|&c| !matches!(c, ',' | '=' | '"')) {
            bare.push(ch);
        }
        return Ok(Token::Bare(bare.trim_end().to_string()));
    }

    let mut quoted = String::new();
    loop {
        match chars.next() {
            Some('"') => break,
            Some('\\') => match chars.next() {
                Some(ch) => quoted.push(ch),
                None => return Err("dangling escape".to_string()),
            },
            Some(ch) => quoted.push(ch),
            None => return Err(format!("unterminated quote in '{quoted}'")),
        }
    }
    skip_whitespace(chars);
    Ok(Token::Quoted(quoted))
}

impl FromStr for State {
    type Err = ClarifError;

    /// Parse the canonical `k=v,k=v` form produced by `Display`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ClarifError::InvalidState {
            input: input.to_string(),
            reason,
        };
        let mut state = State::new();
        if input.trim().is_empty() {
            return Ok(state);
        }

        let mut chars = input.chars().peekable();
        loop {
            let key = match read_token(&mut chars).map_err(invalid)? {
                Token::Bare(key) if key.is_empty() => {
                    return Err(invalid("empty variable name".to_string()))
                }
                Token::Bare(key) | Token::Quoted(key) => key,
            };
            if chars.next() != Some('=') {
                return Err(invalid(format!("binding '{key}' has no '='")));
            }
            let value = match read_token(&mut chars).map_err(invalid)? {
                Token::Quoted(sym) => Value::Sym(sym),
                Token::Bare(literal) => Value::parse(&literal),
            };
            state.set(key, value);

            match chars.next() {
                None => return Ok(state),
                Some(',') => {}
                Some(other) => return Err(invalid(format!("unexpected '{other}'"))),
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for State
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
