//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::query::ast::{
    common::{EntityRef, JoinKind, OrderDir},
    expr::{Expr, Ident},
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The projection, e.g. `parent` or `COUNT(parent)`.
    pub columns: Vec<Expr>,

    /// The root entity of the query.
    /// e.g., `FROM Parent AS parent`
    pub from: Option<FromClause>,

    /// Relationship joins, in emission order.
    pub joins: Vec<JoinClause>,

    /// WHERE conditions, combined with AND.
    pub where_clause: Vec<Expr>,

    /// The GROUP BY expressions.
    pub group_by: Vec<Expr>,

    /// HAVING conditions, combined with AND.
    pub having: Vec<Expr>,

    /// The ORDER BY clause.
    pub order_by: Vec<OrderByExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub entity: EntityRef,
    pub alias: Option<String>,
}

/// A join along a relationship path, e.g. `LEFT JOIN parent.child AS child_1`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub path: Ident,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<OrderDir>,
}
