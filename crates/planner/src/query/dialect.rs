//! Defines the `Dialect` trait for query-language specific syntax.

pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "JPQL", "HQL").
    fn name(&self) -> &'static str;

    /// Returns the placeholder for a named parameter.
    ///
    /// Both supported dialects use `:name`.
    fn placeholder(&self, name: &str) -> String {
        format!(":{name}")
    }

    /// Wraps text in a string literal, doubling embedded quotes.
    fn quote_literal(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    /// The infix concatenation operator, or `None` when the dialect
    /// concatenates with a `CONCAT(..)` function call.
    fn concat_operator(&self) -> Option<&'static str>;

    /// Whether database functions unknown to the query language must be
    /// invoked through `FUNCTION('name', ..)`.
    fn wraps_native_functions(&self) -> bool;
}

/// Portable JPA query language.
///
/// - concatenation: `CONCAT(a, b, c)`
/// - native functions: `FUNCTION('date_format', x, '%Y')`
#[derive(Debug, Clone, Copy)]
pub struct Jpql;

impl Dialect for Jpql {
    fn name(&self) -> &'static str {
        "JPQL"
    }

    fn concat_operator(&self) -> Option<&'static str> {
        None
    }

    fn wraps_native_functions(&self) -> bool {
        true
    }
}

/// Hibernate query language.
///
/// - concatenation: `a || b || c`
/// - native functions are called directly: `date_format(x, '%Y')`
#[derive(Debug, Clone, Copy)]
pub struct Hql;

impl Dialect for Hql {
    fn name(&self) -> &'static str {
        "HQL"
    }

    fn concat_operator(&self) -> Option<&'static str> {
        Some("||")
    }

    fn wraps_native_functions(&self) -> bool {
        false
    }
}
