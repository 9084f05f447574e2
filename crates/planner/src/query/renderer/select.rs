use crate::query::{
    ast::{
        common::JoinKind,
        select::{FromClause, JoinClause, OrderByExpr, Select},
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("SELECT ");
        r.push_list(&self.columns, ", ");

        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }

        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }

        if !self.where_clause.is_empty() {
            r.sql.push_str(" WHERE ");
            r.push_list(&self.where_clause, " AND ");
        }

        if !self.group_by.is_empty() {
            r.sql.push_str(" GROUP BY ");
            r.push_list(&self.group_by, ", ");
        }

        if !self.having.is_empty() {
            r.sql.push_str(" HAVING ");
            r.push_list(&self.having, " AND ");
        }

        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.push_list(&self.order_by, ", ");
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        r.sql.push_str(&self.entity.name);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.sql.push_str(alias);
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        let keyword = match self.kind {
            JoinKind::Inner => "INNER JOIN ",
            JoinKind::Left => "LEFT JOIN ",
        };
        r.sql.push_str(keyword);
        self.path.render(r);
        r.sql.push_str(" AS ");
        r.sql.push_str(&self.alias);
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        if let Some(dir) = &self.direction {
            r.sql.push(' ');
            r.sql.push_str(dir.as_sql());
        }
    }
}
