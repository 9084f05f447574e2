//! Provides a type-safe, fluent builder for constructing `Select` ASTs.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct order at compile time.

use crate::query::ast::{
    common::{EntityRef, JoinKind, OrderDir},
    expr::{Expr, Ident},
    select::{FromClause, JoinClause, OrderByExpr, Select},
};

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of projections.
    /// This is the entry point for building a select query.
    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify the root entity.
impl SelectBuilder<SelectState> {
    /// Adds a `FROM` clause specifying the root entity.
    pub fn from(mut self, entity: EntityRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            entity,
            alias: alias.map(String::from),
        });
        SelectBuilder {
            ast: self.ast,
            state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, we can add optional clauses like `JOIN`, `WHERE`, etc.
impl SelectBuilder<FromState> {
    /// Adds a relationship `JOIN` to the query.
    pub fn join(mut self, kind: JoinKind, path: Ident, alias: &str) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            path,
            alias: alias.to_string(),
        });
        self
    }

    /// Adds a condition to the `WHERE` clause. Conditions are AND-ed.
    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause.push(condition);
        self
    }

    /// Adds an expression to the `GROUP BY` clause.
    pub fn group_by(mut self, expr: Expr) -> Self {
        self.ast.group_by.push(expr);
        self
    }

    /// Adds a condition to the `HAVING` clause. Conditions are AND-ed.
    pub fn having(mut self, condition: Expr) -> Self {
        self.ast.having.push(condition);
        self
    }

    /// Adds an `ORDER BY` item to the query.
    pub fn order_by(mut self, expr: Expr, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByExpr { expr, direction });
        self
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{
            common::{EntityRef, JoinKind, OrderDir},
            expr::{Expr, Ident},
        },
        builder::select::SelectBuilder,
    };

    fn qual_ident(qualifier: &str, name: &str) -> Expr {
        Expr::Identifier(Ident::qualified(qualifier, name))
    }

    #[test]
    fn test_build_simple_select() {
        let ast = SelectBuilder::new()
            .select(vec![qual_ident("parent", "id")])
            .from(EntityRef::new("Parent"), Some("parent"))
            .build();

        assert_eq!(ast.columns, vec![qual_ident("parent", "id")]);
        let from = ast.from.unwrap();
        assert_eq!(from.entity.name, "Parent");
        assert_eq!(from.alias.as_deref(), Some("parent"));
        assert!(ast.where_clause.is_empty());
    }

    #[test]
    fn test_build_with_joins_grouping_and_ordering() {
        let ast = SelectBuilder::new()
            .select(vec![Expr::Identifier(Ident::new("parent"))])
            .from(EntityRef::new("Parent"), Some("parent"))
            .join(
                JoinKind::Left,
                Ident::qualified("parent", "child"),
                "child_1",
            )
            .where_clause(Expr::Raw("parent.active = true".to_string()))
            .group_by(qual_ident("child_1", "id"))
            .having(Expr::Raw("COUNT(parent) > 1".to_string()))
            .order_by(qual_ident("child_1", "name"), Some(OrderDir::Desc))
            .build();

        assert_eq!(ast.joins.len(), 1);
        assert_eq!(ast.joins[0].alias, "child_1");
        assert_eq!(ast.where_clause.len(), 1);
        assert_eq!(ast.group_by.len(), 1);
        assert_eq!(ast.having.len(), 1);
        assert_eq!(ast.order_by[0].direction, Some(OrderDir::Desc));
    }
}
