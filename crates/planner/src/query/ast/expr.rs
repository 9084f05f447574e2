//! Defines the AST for query expressions.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A path qualified by an alias, e.g. `parent.data` or `child_1.address.city`.
    Identifier(Ident),

    /// A string literal, e.g. `' + '`.
    Literal(String),

    /// A named parameter, e.g. `:value_0`.
    Param(String),

    /// A caller-supplied fragment, rendered verbatim.
    Raw(String),

    /// A parenthesized expression.
    Nested(Box<Expr>),

    /// Two or more operands joined by one logical operator, rendered as a
    /// single parenthesized unit: `(a OR b OR c)`.
    Junction {
        op: LogicalOperator,
        operands: Vec<Expr>,
    },

    /// A function call, e.g. `UPPER(x)` or `COUNT(DISTINCT a, b)`.
    FunctionCall(FunctionCall),

    /// String concatenation; the dialect picks `CONCAT(..)` or `||`.
    Concat(Vec<Expr>),

    /// A database-side formatting function applied to an expression,
    /// e.g. `date_format(parent.date, '%d/%m/%Y')`.
    Format {
        function: String,
        expr: Box<Expr>,
        pattern: String,
    },

    /// `expr LIKE pattern ESCAPE 'c'`
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape: char,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'parent' in 'parent.data'
    pub name: String,              // e.g., the 'data' in 'parent.data'
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub distinct: bool,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            distinct: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}
