use std::fmt;

use crate::logic::Formula;

pub mod prop;

pub type ParseResult<T> = Result<T, ParseErr>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErr {
    EmptyFormula,
    UnknownChar(usize, char),
    MissingOperand(String, usize),
    UnclosedParen(usize),
    UnmatchedParen(usize),
    TooDeep(usize),
    Expected(String, String),
}

impl ParseErr {
    /// Byte offset in the source the error refers to, if there is one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseErr::UnknownChar(pos, _)
            | ParseErr::MissingOperand(_, pos)
            | ParseErr::UnclosedParen(pos)
            | ParseErr::UnmatchedParen(pos)
            | ParseErr::TooDeep(pos) => Some(*pos),
            ParseErr::EmptyFormula | ParseErr::Expected(..) => None,
        }
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErr::EmptyFormula => write!(f, "Formula is empty"),
            ParseErr::UnknownChar(pos, c) => {
                write!(f, "Unrecognized character '{c}' at position {pos}")
            }
            ParseErr::MissingOperand(op, pos) => {
                write!(f, "Connective '{op}' at position {pos} is missing an operand")
            }
            ParseErr::UnclosedParen(pos) => {
                write!(f, "Parenthesis opened at position {pos} is never closed")
            }
            ParseErr::UnmatchedParen(pos) => {
                write!(f, "Unmatched closing parenthesis at position {pos}")
            }
            ParseErr::TooDeep(pos) => {
                write!(f, "Formula nests too deeply at position {pos}")
            }
            ParseErr::Expected(expected, got) => write!(f, "Expected {} but got {}", expected, got),
        }
    }
}

/// Parses a propositional formula.
pub fn parse(formula: &str) -> ParseResult<Formula> {
    prop::parse_prop_formula(formula)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub spelling: &'t str,
    pub src_pos: usize,
}

impl<'t> fmt::Display for Token<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    And,
    Or,
    Not,
    Impl,
    Equiv,
    LParen,
    RParen,
    Ident,
}

impl TokenKind {
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            TokenKind::And | TokenKind::Or | TokenKind::Impl | TokenKind::Equiv
        )
    }

    /// Whether a token of this kind can start an operand.
    pub fn starts_operand(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::Not | TokenKind::LParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Not => "!",
            TokenKind::Impl => "->",
            TokenKind::Equiv => "<->",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Ident => "identifier",
        };

        write!(f, "{}", s)
    }
}

// Matched in order, the first spelling that prefixes the input wins.
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("<->", TokenKind::Equiv),
    ("<=>", TokenKind::Equiv),
    ("->", TokenKind::Impl),
    ("↔", TokenKind::Equiv),
    ("→", TokenKind::Impl),
    ("¬", TokenKind::Not),
    ("!", TokenKind::Not),
    ("~", TokenKind::Not),
    ("∧", TokenKind::And),
    ("&", TokenKind::And),
    ("∨", TokenKind::Or),
    ("|", TokenKind::Or),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
];

fn keyword(spelling: &str) -> Option<TokenKind> {
    match spelling {
        "not" => Some(TokenKind::Not),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "iff" => Some(TokenKind::Equiv),
        _ => None,
    }
}

/// Lazily splits a formula into tokens. Yields at most one error, after
/// which the iterator is exhausted.
pub struct Tokenizer<'t> {
    formula: &'t str,
    pos: usize,
}

impl<'t> Tokenizer<'t> {
    pub fn new(formula: &'t str) -> Self {
        Self { formula, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.formula[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'t> {
        let formula = self.formula;
        let src_pos = self.pos;
        self.pos += len;
        Token {
            kind,
            spelling: &formula[src_pos..self.pos],
            src_pos,
        }
    }
}

impl<'t> Iterator for Tokenizer<'t> {
    type Item = ParseResult<Token<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let formula = self.formula;
        let rest = &formula[self.pos..];
        let first = rest.chars().next()?;

        if let Some((spelling, kind)) = SYMBOLS.iter().find(|(s, _)| rest.starts_with(s)) {
            return Some(Ok(self.emit(*kind, spelling.len())));
        }

        if first.is_ascii_alphabetic() {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let kind = keyword(&rest[..len]).unwrap_or(TokenKind::Ident);
            return Some(Ok(self.emit(kind, len)));
        }

        let pos = self.pos;
        self.pos = self.formula.len();
        Some(Err(ParseErr::UnknownChar(pos, first)))
    }
}

pub fn tokenize(formula: &str) -> ParseResult<Vec<Token<'_>>> {
    Tokenizer::new(formula).collect()
}
