use std::rc::Rc;

use unscanny::Scanner;

use crate::error::SyntaxError;
use crate::value::Value;

/// A parsed expression.
#[derive(Debug)]
pub enum Expr {
    /// A constant.
    Literal(Value),
    /// The argument at a position.
    Arg(usize),
    /// A list literal: `[a, b]`.
    List(Vec<Expr>),
    /// A prefix operation: `!a`.
    Unary(UnOp, Box<Expr>),
    /// An infix operation: `a + b`.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `a ? b : c`.
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    /// `a.name`.
    Member(Box<Expr>, Rc<str>),
    /// `a[b]`.
    Index(Box<Expr>, Box<Expr>),
    /// `a(b, c)`.
    Call(Box<Expr>, Vec<Expr>),
    /// `a.name(b, c)`.
    Method(Box<Expr>, Rc<str>, Vec<Expr>),
}

/// A prefix operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UnOp {
    Not,
    BitNot,
    Neg,
    Pos,
    Inc,
    Dec,
    TypeOf,
}

/// An infix operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BinOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    fn from_punct(punct: &str) -> Option<Self> {
        Some(match punct {
            "||" => Self::Or,
            "&&" => Self::And,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "===" => Self::StrictEq,
            "!==" => Self::StrictNe,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            _ => return None,
        })
    }

    /// Binding strength, higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::BitOr => 3,
            Self::BitXor => 4,
            Self::BitAnd => 5,
            Self::Eq | Self::Ne | Self::StrictEq | Self::StrictNe => 6,
            Self::Lt | Self::Gt | Self::Le | Self::Ge => 7,
            Self::Shl | Self::Shr | Self::UShr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::Rem => 10,
        }
    }
}

/// How deeply expressions may nest before parsing gives up.
const MAX_DEPTH: usize = 64;

/// Punctuation, longest first so that scanning is greedy.
const PUNCTS: &[&str] = &[
    ">>>=", "===", "!==", ">>>", "<<=", ">>=", "**=", "==", "!=", "<=", ">=", "&&",
    "||", "<<", ">>", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
    "**", "=>", "+", "-", "*", "/", "%", "<", ">", "!", "~", "&", "|", "^", "?",
    ":", ",", ".", "(", ")", "[", "]", "{", "}", ";", "=",
];

/// Operators that would write to a variable.
const ASSIGNMENTS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Text(Rc<str>),
    Name(Rc<str>),
    Placeholder(usize),
    Punct(&'static str),
    End,
}

/// Parse expression text, returning the tree and the number of argument
/// positions its placeholders refer to.
pub fn parse(text: &str) -> Result<(Expr, usize), SyntaxError> {
    let (tokens, arity) = lex(text)?;
    let mut parser = Parser { tokens, cursor: 0, depth: 0 };

    // Like an empty function body, empty text yields nothing.
    if parser.done() {
        return Ok((Expr::Literal(Value::Undefined), arity));
    }

    let expr = parser.expr()?;
    if !parser.done() {
        return Err(parser.unexpected());
    }

    Ok((expr, arity))
}

/// Split the text into tokens and resolve placeholders to positions.
///
/// `_k` refers to position `k - 1`; a bare `_` takes the position right after
/// the highest one seen so far.
fn lex(text: &str) -> Result<(Vec<(Token, usize)>, usize), SyntaxError> {
    let mut s = Scanner::new(text);
    let mut tokens: Vec<(Token, usize)> = vec![];
    let mut arity: usize = 0;

    loop {
        s.eat_whitespace();
        let start = s.cursor();
        let Some(c) = s.peek() else { break };

        let token = if c.is_ascii_digit()
            || (c == '.' && s.scout(1).is_some_and(|next| next.is_ascii_digit()))
        {
            number(&mut s, start)?
        } else if c == '\'' || c == '"' {
            s.eat();
            quoted(&mut s, c, start)?
        } else if is_name_start(c) {
            let name = s.eat_while(is_name_continue);
            let property = matches!(tokens.last(), Some((Token::Punct("."), _)));
            match name.strip_prefix('_') {
                Some("") if !property => {
                    let position = arity;
                    arity = position.checked_add(1).ok_or_else(|| {
                        SyntaxError::new(start, format!("placeholder `{name}` is out of range"))
                    })?;
                    Token::Placeholder(position)
                }
                Some(digits)
                    if !property && digits.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    let n: usize = digits.parse().map_err(|_| {
                        SyntaxError::new(start, format!("placeholder `{name}` is out of range"))
                    })?;
                    let n = n.max(1);
                    arity = arity.max(n);
                    Token::Placeholder(n - 1)
                }
                _ => Token::Name(name.into()),
            }
        } else if let Some(punct) = PUNCTS.iter().find(|punct| s.after().starts_with(**punct)) {
            s.jump(start + punct.len());
            Token::Punct(*punct)
        } else {
            return Err(SyntaxError::new(start, format!("unexpected character `{c}`")));
        };

        tokens.push((token, start));
    }

    tokens.push((Token::End, text.len()));
    Ok((tokens, arity))
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_name_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn number(s: &mut Scanner, start: usize) -> Result<Token, SyntaxError> {
    s.eat_while(|c: char| c.is_ascii_digit());
    if s.eat_if('.') {
        s.eat_while(|c: char| c.is_ascii_digit());
    }

    let exponent = s.cursor();
    if s.eat_if(|c: char| c == 'e' || c == 'E') {
        s.eat_if(|c: char| c == '+' || c == '-');
        if s.eat_while(|c: char| c.is_ascii_digit()).is_empty() {
            return Err(SyntaxError::new(exponent, "missing exponent"));
        }
    }

    let text = s.from(start);
    text.parse()
        .map(Token::Number)
        .map_err(|_| SyntaxError::new(start, format!("invalid number `{text}`")))
}

/// Scan the rest of a quoted text after its opening quote.
fn quoted(s: &mut Scanner, quote: char, start: usize) -> Result<Token, SyntaxError> {
    let mut out = String::new();
    loop {
        match s.eat() {
            None => return Err(SyntaxError::new(start, "unterminated text")),
            Some(c) if c == quote => break,
            Some('\\') => match s.eat() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => return Err(SyntaxError::new(start, "unterminated text")),
            },
            Some(c) => out.push(c),
        }
    }
    Ok(Token::Text(out.into()))
}

/// A recursive descent parser over the token list.
///
/// `depth` counts the nodes under construction that still wait for a child,
/// which bounds both the recursion here and the depth of the finished tree.
struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.cursor].0
    }

    fn offset(&self) -> usize {
        self.tokens[self.cursor].1
    }

    fn done(&self) -> bool {
        *self.peek() == Token::End
    }

    /// Move to the next token. Stays on the final end token.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.cursor].0.clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    fn at(&self, punct: &str) -> bool {
        matches!(self.peek(), Token::Punct(p) if *p == punct)
    }

    fn eat(&mut self, punct: &str) -> bool {
        let at = self.at(punct);
        if at {
            self.advance();
        }
        at
    }

    fn expect(&mut self, punct: &str) -> Result<(), SyntaxError> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(SyntaxError::new(
                self.offset(),
                format!("expected `{punct}`, found {}", self.describe()),
            ))
        }
    }

    fn describe(&self) -> String {
        match self.peek() {
            Token::Number(n) => format!("number `{}`", Value::Number(*n)),
            Token::Text(text) => format!("text {text:?}"),
            Token::Name(name) => format!("`{name}`"),
            Token::Placeholder(_) => "placeholder".into(),
            Token::Punct(punct) => format!("`{punct}`"),
            Token::End => "end of expression".into(),
        }
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::new(self.offset(), format!("unexpected {}", self.describe()))
    }

    /// Go one level deeper. Failed parses never climb back out.
    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::new(self.offset(), "expression is nested too deeply"));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, SyntaxError> {
        self.enter()?;
        let expr = self.conditional()?;
        self.depth -= 1;
        Ok(expr)
    }

    fn conditional(&mut self) -> Result<Expr, SyntaxError> {
        let condition = self.binary(0)?;
        if ASSIGNMENTS.iter().any(|op| self.at(op)) {
            return Err(SyntaxError::new(self.offset(), "assignment is not supported"));
        }

        if !self.eat("?") {
            return Ok(condition);
        }

        let then = self.expr()?;
        self.expect(":")?;
        let otherwise = self.expr()?;
        Ok(Expr::Conditional(Box::new(condition), Box::new(then), Box::new(otherwise)))
    }

    /// Precedence climbing over the infix operators.
    fn binary(&mut self, min: u8) -> Result<Expr, SyntaxError> {
        let mut lhs = self.unary()?;
        let mut levels = 0;
        loop {
            let Token::Punct(punct) = *self.peek() else { break };
            let Some(op) = BinOp::from_punct(punct) else { break };
            if op.precedence() < min {
                break;
            }

            self.enter()?;
            levels += 1;
            self.advance();
            let rhs = self.binary(op.precedence() + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth -= levels;
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        let op = match self.peek() {
            Token::Punct("!") => UnOp::Not,
            Token::Punct("~") => UnOp::BitNot,
            Token::Punct("-") => UnOp::Neg,
            Token::Punct("+") => UnOp::Pos,
            Token::Punct("++") => UnOp::Inc,
            Token::Punct("--") => UnOp::Dec,
            Token::Name(name) if &**name == "typeof" => UnOp::TypeOf,
            _ => return self.postfix(),
        };

        let offset = self.offset();
        self.enter()?;
        self.advance();
        let operand = self.unary()?;
        self.depth -= 1;

        let reference = matches!(operand, Expr::Arg(_) | Expr::Member(..) | Expr::Index(..));
        if matches!(op, UnOp::Inc | UnOp::Dec) && !reference {
            return Err(SyntaxError::new(offset, "invalid operand for increment"));
        }

        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn postfix(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.primary()?;
        let mut levels = 0;
        loop {
            if matches!(self.peek(), Token::Punct("." | "[" | "(")) {
                self.enter()?;
                levels += 1;
            }

            if self.eat(".") {
                let offset = self.offset();
                let Token::Name(name) = self.advance() else {
                    return Err(SyntaxError::new(offset, "expected a property name"));
                };

                expr = if self.eat("(") {
                    Expr::Method(Box::new(expr), name, self.sequence(")")?)
                } else {
                    Expr::Member(Box::new(expr), name)
                };
            } else if self.eat("[") {
                let index = self.expr()?;
                self.expect("]")?;
                expr = Expr::Index(Box::new(expr), Box::new(index));
            } else if self.eat("(") {
                expr = Expr::Call(Box::new(expr), self.sequence(")")?);
            } else {
                break;
            }
        }
        self.depth -= levels;
        Ok(expr)
    }

    /// Comma-separated expressions up to and including `close`.
    fn sequence(&mut self, close: &str) -> Result<Vec<Expr>, SyntaxError> {
        let mut items = vec![];
        while !self.eat(close) {
            items.push(self.expr()?);
            if !self.eat(",") {
                self.expect(close)?;
                break;
            }
        }
        Ok(items)
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let offset = self.offset();
        if self.done() {
            return Err(self.unexpected());
        }

        Ok(match self.advance() {
            Token::Number(n) => Expr::Literal(Value::Number(n)),
            Token::Text(text) => Expr::Literal(Value::Str(text)),
            Token::Placeholder(position) => Expr::Arg(position),
            Token::Name(name) => Expr::Literal(match &*name {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                "null" => Value::Null,
                "undefined" => Value::Undefined,
                _ => {
                    return Err(SyntaxError::new(
                        offset,
                        format!("unknown identifier `{name}`"),
                    ));
                }
            }),
            Token::Punct("(") => {
                let inner = self.expr()?;
                self.expect(")")?;
                inner
            }
            Token::Punct("[") => Expr::List(self.sequence("]")?),
            Token::Punct(punct) => {
                return Err(SyntaxError::new(offset, format!("unexpected `{punct}`")));
            }
            Token::End => return Err(self.unexpected()),
        })
    }
}
