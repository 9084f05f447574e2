//! Defines the core rendering trait and context for converting AST to query text.

use crate::query::dialect::Dialect;

pub mod expr;
pub mod select;

/// A trait for any AST node that can be rendered into query text.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the query text and provides access to the dialect for
/// syntax-specific details. Parameter values are bound by name elsewhere;
/// the renderer only emits their placeholders.
pub struct Renderer<'a> {
    pub sql: String,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final query text.
    pub fn finish(self) -> String {
        self.sql
    }

    pub fn push_param(&mut self, name: &str) {
        let placeholder = self.dialect.placeholder(name);
        self.sql.push_str(&placeholder);
    }

    pub fn push_literal(&mut self, text: &str) {
        let literal = self.dialect.quote_literal(text);
        self.sql.push_str(&literal);
    }

    /// Renders `items` separated by `sep`.
    pub fn push_list<T: Render>(&mut self, items: &[T], sep: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(sep);
            }
            item.render(self);
        }
    }
}

/// Renders a node to a standalone string.
pub fn render_to_string<T: Render + ?Sized>(node: &T, dialect: &dyn Dialect) -> String {
    let mut renderer = Renderer::new(dialect);
    node.render(&mut renderer);
    renderer.finish()
}
