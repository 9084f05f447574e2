use crate::query::ast::expr::{Expr, Ident};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod renderer;

pub fn ident(qualifier: &str, name: &str) -> Expr {
    Expr::Identifier(Ident::qualified(qualifier, name))
}

pub fn literal(text: &str) -> Expr {
    Expr::Literal(text.to_string())
}

pub fn raw(fragment: &str) -> Expr {
    Expr::Raw(fragment.to_string())
}
