//! Renders columns into field expressions and search predicates.

use crate::{
    compile::alias::AliasRegistry,
    query::{
        ast::expr::{Expr, FunctionCall},
        ident, literal,
    },
    settings::CompilerSettings,
};
use model::{
    error::ColumnError,
    request::{column::Column, descriptor::FieldPath},
};

pub struct FieldExpressions<'a> {
    aliases: &'a AliasRegistry,
    relationships: &'a [String],
    settings: &'a CompilerSettings,
}

impl<'a> FieldExpressions<'a> {
    pub fn new(
        aliases: &'a AliasRegistry,
        relationships: &'a [String],
        settings: &'a CompilerSettings,
    ) -> Self {
        Self {
            aliases,
            relationships,
            settings,
        }
    }

    /// The expression a column stands for, or `None` for a blank column.
    ///
    /// Multi-field columns become one concatenation with the raw delimiter
    /// text between fields. Formats apply only when `for_search` is set.
    pub fn field_expression(
        &self,
        column: &Column,
        for_search: bool,
    ) -> Result<Option<Expr>, ColumnError> {
        if !column.is_multi_field() {
            return self.single_field(column, for_search);
        }

        let delimiters = column.delimiters();
        let mut parts = Vec::new();
        for (i, sub) in column.sub_columns()?.iter().enumerate() {
            if i > 0 {
                if let Some(delimiter) = delimiters.get(i - 1) {
                    parts.push(literal(delimiter));
                }
            }
            if let Some(expr) = self.single_field(sub, for_search)? {
                parts.push(expr);
            }
        }
        Ok(Some(Expr::Concat(parts)))
    }

    fn single_field(&self, column: &Column, for_search: bool) -> Result<Option<Expr>, ColumnError> {
        let Some(path) = column.field_path()? else {
            return Ok(None);
        };

        let expr = self.path_expression(path);
        let expr = match column.format() {
            Some(pattern) if for_search => Expr::Format {
                function: self.settings.format_function.clone(),
                expr: Box::new(expr),
                pattern: pattern.to_string(),
            },
            _ => expr,
        };
        Ok(Some(expr))
    }

    /// `<alias>.<remainder>` for a joined relationship, otherwise the full
    /// path under the root alias.
    pub fn path_expression(&self, path: &FieldPath) -> Expr {
        let joined = path
            .base_field()
            .filter(|base| self.relationships.iter().any(|r| r == *base))
            .and_then(|base| self.aliases.lookup(base));

        match joined {
            Some(alias) => ident(alias, &path.remainder()),
            None => ident(self.aliases.root_alias(), &path.name()),
        }
    }

    /// `UPPER(<expr>) LIKE UPPER(<'%' + :param + '%'>) ESCAPE '<c>'`
    pub fn search_predicate(&self, expr: Expr, param: &str) -> Expr {
        let pattern = Expr::Concat(vec![
            literal("%"),
            Expr::Param(param.to_string()),
            literal("%"),
        ]);

        Expr::Like {
            expr: Box::new(upper(expr)),
            pattern: Box::new(upper(pattern)),
            escape: self.settings.escape_char,
        }
    }
}

fn upper(expr: Expr) -> Expr {
    Expr::FunctionCall(FunctionCall::new("UPPER", vec![expr]))
}

/// Prefixes `%`, `_` and the escape character itself with `escape`.
pub fn escape_wildcards(text: &str, escape: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '%' || c == '_' || c == escape {
            escaped.push(escape);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        dialect::{Hql, Jpql},
        renderer::render_to_string,
    };

    fn fixture() -> (AliasRegistry, Vec<String>, CompilerSettings) {
        let mut aliases = AliasRegistry::new("Parent", 5);
        aliases.register("child");
        (aliases, vec!["child".to_string()], CompilerSettings::default())
    }

    fn render(column: &str, for_search: bool) -> String {
        let (aliases, relationships, settings) = fixture();
        let fields = FieldExpressions::new(&aliases, &relationships, &settings);
        let expr = fields
            .field_expression(&Column::new(column).unwrap(), for_search)
            .unwrap()
            .unwrap();
        render_to_string(&expr, &Jpql)
    }

    #[test]
    fn test_root_and_relationship_fields() {
        assert_eq!(render("data", false), "parent.data");
        assert_eq!(render("child.firstData", false), "child_1.firstData");
        assert_eq!(render("child?.firstData", false), "child_1.firstData");
        assert_eq!(render("embedded.city", false), "parent.embedded.city");
    }

    #[test]
    fn test_multi_field_concatenation() {
        assert_eq!(render("a + b", false), "CONCAT(parent.a, ' + ', parent.b)");
        assert_eq!(
            render("child?.firstData~data", false),
            "CONCAT(child_1.firstData, '~', parent.data)"
        );
    }

    #[test]
    fn test_format_only_for_search() {
        let (aliases, relationships, settings) = fixture();
        let fields = FieldExpressions::new(&aliases, &relationships, &settings);
        let mut column = Column::new("child.date").unwrap();
        column.set_format(Some("%d/%m/%Y".to_string()));

        let search = fields.field_expression(&column, true).unwrap().unwrap();
        let order = fields.field_expression(&column, false).unwrap().unwrap();

        assert_eq!(
            render_to_string(&search, &Hql),
            "date_format(child_1.date, '%d/%m/%Y')"
        );
        assert_eq!(render_to_string(&order, &Hql), "child_1.date");
    }

    #[test]
    fn test_blank_column_has_no_expression() {
        let (aliases, relationships, settings) = fixture();
        let fields = FieldExpressions::new(&aliases, &relationships, &settings);
        assert!(fields
            .field_expression(&Column::new("").unwrap(), true)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_search_predicate() {
        let (aliases, relationships, settings) = fixture();
        let fields = FieldExpressions::new(&aliases, &relationships, &settings);
        let predicate = fields.search_predicate(ident("parent", "data"), "value_0");

        assert_eq!(
            render_to_string(&predicate, &Jpql),
            "UPPER(parent.data) LIKE UPPER(CONCAT('%', :value_0, '%')) ESCAPE '#'"
        );
    }

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_wildcards("50% off_", '#'), "50#% off#_");
        assert_eq!(escape_wildcards("a#b", '#'), "a##b");
        assert_eq!(escape_wildcards("a!b%", '!'), "a!!b!%");
        assert_eq!(escape_wildcards("plain", '#'), "plain");
    }
}
