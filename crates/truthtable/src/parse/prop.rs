use std::iter::Peekable;

use crate::{
    consts::{MAX_FORMULA_HEIGHT, MAX_NESTING_DEPTH},
    logging::targets::PARSE,
    logic::Formula,
    parse::{ParseErr, ParseResult, Token, TokenKind},
};

use super::Tokenizer;

pub fn parse_prop_formula(formula: &str) -> ParseResult<Formula> {
    let res = PropParser::parse(formula);
    if let Err(e) = &res {
        log::debug!(target: PARSE, "Rejected '{formula}': {e}");
    }
    res
}

/// Recursive descent parser for propositional formulas.
///
/// Binding strength increases from `<->` over `->`, `|` and `&` to `!`.
/// All binary connectives fold to the left, so `a -> b -> c` reads as
/// `(a -> b) -> c`.
///
/// Nesting of `(` and `!` is limited to [`MAX_NESTING_DEPTH`] and the
/// resulting tree to a height of [`MAX_FORMULA_HEIGHT`]. Anything deeper
/// is rejected with [`ParseErr::TooDeep`].
pub struct PropParser<'t> {
    tokens: Peekable<Tokenizer<'t>>,
    depth: usize,
}

/// A parsed subformula together with the height of its tree.
struct Sub {
    node: Box<Formula>,
    height: usize,
}

impl Sub {
    fn var(name: &str) -> Self {
        Sub {
            node: Box::new(Formula::Var(name.to_string())),
            height: 1,
        }
    }

    fn negated(self, pos: usize) -> ParseResult<Self> {
        Sub::checked(Formula::Not(self.node), self.height + 1, pos)
    }

    fn join(
        self,
        right: Sub,
        pos: usize,
        op: fn(Box<Formula>, Box<Formula>) -> Formula,
    ) -> ParseResult<Self> {
        let height = self.height.max(right.height) + 1;
        Sub::checked(op(self.node, right.node), height, pos)
    }

    fn checked(node: Formula, height: usize, pos: usize) -> ParseResult<Self> {
        if height > MAX_FORMULA_HEIGHT {
            return Err(ParseErr::TooDeep(pos));
        }
        Ok(Sub {
            node: Box::new(node),
            height,
        })
    }
}

impl<'f> PropParser<'f> {
    pub fn parse(formula: &'f str) -> ParseResult<Formula> {
        let mut parser = PropParser {
            tokens: Tokenizer::new(formula).peekable(),
            depth: 0,
        };
        if parser.tokens.peek().is_none() {
            return Err(ParseErr::EmptyFormula);
        }
        let sub = parser.parse_equiv()?;
        match parser.tokens.next() {
            None => Ok(*sub.node),
            Some(Err(e)) => Err(e),
            Some(Ok(t)) if t.kind == TokenKind::RParen => Err(ParseErr::UnmatchedParen(t.src_pos)),
            Some(Ok(t)) => Err(ParseErr::Expected(
                "end of input".to_string(),
                format!("{} at position {}", t, t.src_pos),
            )),
        }
    }

    fn parse_equiv(&mut self) -> ParseResult<Sub> {
        let mut stub = self.parse_impl()?;

        while self.next_is(TokenKind::Equiv) {
            let pos = self.bump_operator()?;
            let right = self.parse_impl()?;
            stub = stub.join(right, pos, Formula::Equiv)?;
        }

        Ok(stub)
    }

    fn parse_impl(&mut self) -> ParseResult<Sub> {
        let mut stub = self.parse_or()?;

        while self.next_is(TokenKind::Impl) {
            let pos = self.bump_operator()?;
            let right = self.parse_or()?;
            stub = stub.join(right, pos, Formula::Impl)?;
        }

        Ok(stub)
    }

    fn parse_or(&mut self) -> ParseResult<Sub> {
        let mut stub = self.parse_and()?;

        while self.next_is(TokenKind::Or) {
            let pos = self.bump_operator()?;
            let right = self.parse_and()?;
            stub = stub.join(right, pos, Formula::Or)?;
        }

        Ok(stub)
    }

    fn parse_and(&mut self) -> ParseResult<Sub> {
        let mut stub = self.parse_not()?;

        while self.next_is(TokenKind::And) {
            let pos = self.bump_operator()?;
            let right = self.parse_not()?;
            stub = stub.join(right, pos, Formula::And)?;
        }

        Ok(stub)
    }

    fn parse_not(&mut self) -> ParseResult<Sub> {
        if self.next_is(TokenKind::Not) {
            let pos = self.bump_operator()?;
            self.descend(pos)?;
            let sub = self.parse_not()?.negated(pos)?;
            self.depth -= 1;
            Ok(sub)
        } else {
            self.parse_paren()
        }
    }

    fn parse_paren(&mut self) -> ParseResult<Sub> {
        if self.next_is(TokenKind::LParen) {
            let open = self.cur_token()?.src_pos;
            self.bump()?;
            if self.tokens.peek().is_none() {
                return Err(ParseErr::UnclosedParen(open));
            }
            self.descend(open)?;
            let exp = self.parse_equiv()?;
            self.depth -= 1;
            match self.tokens.next() {
                Some(Ok(Token {
                    kind: TokenKind::RParen,
                    ..
                })) => Ok(exp),
                Some(Ok(t)) => Err(ParseErr::Expected(
                    TokenKind::RParen.to_string(),
                    format!("{} at position {}", t, t.src_pos),
                )),
                Some(Err(e)) => Err(e),
                None => Err(ParseErr::UnclosedParen(open)),
            }
        } else {
            self.parse_var()
        }
    }

    fn parse_var(&mut self) -> ParseResult<Sub> {
        let (kind, spelling, pos) = {
            let t = self.cur_token()?;
            (t.kind, t.spelling, t.src_pos)
        };
        match kind {
            TokenKind::Ident => {
                self.bump()?;
                Ok(Sub::var(spelling))
            }
            // A binary connective where an operand should start has no left side
            k if k.is_binary() => Err(ParseErr::MissingOperand(spelling.to_string(), pos)),
            TokenKind::RParen => Err(ParseErr::UnmatchedParen(pos)),
            _ => Err(ParseErr::Expected(
                "identifier".to_string(),
                format!("{spelling} at position {pos}"),
            )),
        }
    }

    fn descend(&mut self, pos: usize) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseErr::TooDeep(pos));
        }
        Ok(())
    }

    fn next_is(&mut self, expected: TokenKind) -> bool {
        match self.tokens.peek() {
            Some(Ok(Token { kind, .. })) => *kind == expected,
            _ => false,
        }
    }

    /// Consumes a connective and makes sure something that can start an
    /// operand follows it. Returns the connective's position.
    fn bump_operator(&mut self) -> ParseResult<usize> {
        let (spelling, pos) = {
            let op = self.cur_token()?;
            (op.spelling, op.src_pos)
        };
        self.bump()?;
        match self.tokens.peek() {
            Some(Ok(t)) if t.kind.starts_operand() => Ok(pos),
            Some(Err(e)) => Err(e.clone()),
            _ => Err(ParseErr::MissingOperand(spelling.to_string(), pos)),
        }
    }

    fn bump(&mut self) -> ParseResult<()> {
        match self.tokens.next() {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => Err(e),
            None => Err(ParseErr::Expected(
                "token".to_string(),
                "end of input".to_string(),
            )),
        }
    }

    fn cur_token(&mut self) -> ParseResult<&Token<'f>> {
        match self.tokens.peek() {
            Some(Ok(t)) => Ok(t),
            Some(Err(e)) => Err(e.clone()),
            _ => Err(ParseErr::Expected(
                "token".to_string(),
                "end of input".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_map {
        ($func:ident, $( $f:expr, $e:expr );*) => {{
            $(
                let cs = $func($f).expect($f);
                assert_eq!($e, cs.to_string(), "f: {}", $f);
            )*
        }};
    }

    macro_rules! test_list_invalid {
        ($func:ident, $( $f:expr ),*) => {{
            $(
                let res = $func($f);
                assert!(res.is_err(), "f: {}\nFormula: {:?}", $f, res);
            )*
        }};
    }

    #[test]
    fn prop_valid() {
        test_map!(
            parse_prop_formula,
            "a", "a";
            "P1", "P1";
            "!a", "¬a";
            "!!a", "¬¬a";
            "not (a)", "¬a";
            "a -> b", "(a -> b)";
            "a-> b", "(a -> b)";
            "a    ->b", "(a -> b)";
            "a->b", "(a -> b)";
            "a → b", "(a -> b)";
            "a<->(b -> (!(c)))", "(a <-> (b -> ¬c))";
            "(b & a <-> (a) | !b)", "((b ∧ a) <-> (a ∨ ¬b))";
            "P and Q or R", "((P ∧ Q) ∨ R)";
            "P or Q and R", "(P ∨ (Q ∧ R))";
            "¬P ∧ Q", "(¬P ∧ Q)";
            "P ∨ Q → R ↔ S", "(((P ∨ Q) -> R) <-> S)";
            "P iff Q", "(P <-> Q)"
        );
    }

    #[test]
    fn binary_folds_are_left_associative() {
        test_map!(
            parse_prop_formula,
            "a -> b -> c", "((a -> b) -> c)";
            "a <-> b <-> c", "((a <-> b) <-> c)";
            "a & b & c", "((a ∧ b) ∧ c)";
            "a | b | c", "((a ∨ b) ∨ c)";
            "a -> (b -> c)", "(a -> (b -> c))"
        );
    }

    #[test]
    fn prop_invalid() {
        test_list_invalid!(
            parse_prop_formula,
            "",
            "   ",
            "-->a",
            "<--",
            "--><=>",
            "!->",
            "a!",
            "a-->",
            "b<=>",
            "<->a",
            "<->",
            "(a&b v2",
            "(a|b",
            "a b",
            "()",
            "a)",
            "(P ->",
            "P & & Q",
            "P ∧ $"
        );
    }

    #[test]
    fn error_kinds() {
        assert_eq!(Err(ParseErr::EmptyFormula), parse_prop_formula(" "));
        assert_eq!(Err(ParseErr::UnclosedParen(0)), parse_prop_formula("(P | Q"));
        assert_eq!(Err(ParseErr::UnclosedParen(0)), parse_prop_formula("("));
        assert_eq!(Err(ParseErr::UnmatchedParen(1)), parse_prop_formula("P)"));
        assert_eq!(Err(ParseErr::UnmatchedParen(1)), parse_prop_formula("()"));
        assert_eq!(
            Err(ParseErr::MissingOperand("->".to_string(), 3)),
            parse_prop_formula("(P ->")
        );
        assert_eq!(
            Err(ParseErr::MissingOperand("&".to_string(), 2)),
            parse_prop_formula("P & & Q")
        );
        assert_eq!(
            Err(ParseErr::MissingOperand("or".to_string(), 0)),
            parse_prop_formula("or P")
        );
        assert_eq!(
            Err(ParseErr::MissingOperand("!".to_string(), 0)),
            parse_prop_formula("!")
        );
        assert_eq!(
            Err(ParseErr::UnknownChar(6, '$')),
            parse_prop_formula("P ∧ $")
        );
        assert_eq!(
            Err(ParseErr::UnknownChar(2, '#')),
            parse_prop_formula("P # Q")
        );
        assert!(matches!(
            parse_prop_formula("P Q"),
            Err(ParseErr::Expected(_, _))
        ));
    }

    #[test]
    fn nesting_is_bounded() {
        let parens = format!("{}P{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(
            Err(ParseErr::TooDeep(MAX_NESTING_DEPTH)),
            parse_prop_formula(&parens)
        );

        let nots = format!("{}P", "!".repeat(100_000));
        assert_eq!(
            Err(ParseErr::TooDeep(MAX_NESTING_DEPTH)),
            parse_prop_formula(&nots)
        );

        let mixed = format!("{}P{}", "!(".repeat(50_000), ")".repeat(50_000));
        assert!(matches!(
            parse_prop_formula(&mixed),
            Err(ParseErr::TooDeep(_))
        ));

        let ok = format!(
            "{}P{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        assert_eq!(Ok(Formula::Var("P".to_string())), parse_prop_formula(&ok));
        let ok = format!("{}P", "!".repeat(MAX_NESTING_DEPTH));
        assert!(parse_prop_formula(&ok).is_ok());
    }

    #[test]
    fn height_is_bounded() {
        let chain = format!("P{}", " & P".repeat(100_000));
        assert_eq!(
            Err(ParseErr::TooDeep(4 * MAX_FORMULA_HEIGHT - 2)),
            parse_prop_formula(&chain)
        );

        let ok = format!("P{}", " -> P".repeat(MAX_FORMULA_HEIGHT - 1));
        assert!(parse_prop_formula(&ok).is_ok());
    }

    #[test]
    fn error_positions() {
        assert_eq!(None, ParseErr::EmptyFormula.position());
        assert_eq!(Some(3), ParseErr::MissingOperand("->".to_string(), 3).position());
        assert_eq!(Some(7), ParseErr::TooDeep(7).position());
        let e = parse_prop_formula("(a | b").unwrap_err();
        assert_eq!(Some(0), e.position());
        assert_eq!("Parenthesis opened at position 0 is never closed", e.to_string());
    }
}
