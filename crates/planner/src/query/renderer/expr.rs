use crate::query::{
    ast::expr::{Expr, FunctionCall, Ident, LogicalOperator},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Literal(text) => r.push_literal(text),
            Expr::Param(name) => r.push_param(name),
            Expr::Raw(fragment) => r.sql.push_str(fragment),
            Expr::Nested(inner) => {
                r.sql.push('(');
                inner.render(r);
                r.sql.push(')');
            }
            Expr::Junction { op, operands } => {
                let sep = match op {
                    LogicalOperator::And => " AND ",
                    LogicalOperator::Or => " OR ",
                };
                r.sql.push('(');
                r.push_list(operands, sep);
                r.sql.push(')');
            }
            Expr::FunctionCall(func) => func.render(r),
            Expr::Concat(parts) => match r.dialect.concat_operator() {
                Some(op) => {
                    r.sql.push('(');
                    r.push_list(parts, &format!(" {op} "));
                    r.sql.push(')');
                }
                None => {
                    r.sql.push_str("CONCAT(");
                    r.push_list(parts, ", ");
                    r.sql.push(')');
                }
            },
            Expr::Format {
                function,
                expr,
                pattern,
            } => {
                if r.dialect.wraps_native_functions() {
                    r.sql.push_str("FUNCTION(");
                    r.push_literal(function);
                    r.sql.push_str(", ");
                } else {
                    r.sql.push_str(function);
                    r.sql.push('(');
                }
                expr.render(r);
                r.sql.push_str(", ");
                r.push_literal(pattern);
                r.sql.push(')');
            }
            Expr::Like {
                expr,
                pattern,
                escape,
            } => {
                expr.render(r);
                r.sql.push_str(" LIKE ");
                pattern.render(r);
                r.sql.push_str(" ESCAPE ");
                r.push_literal(&escape.to_string());
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(qualifier);
            r.sql.push('.');
        }
        r.sql.push_str(&self.name);
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.distinct {
            r.sql.push_str("DISTINCT ");
        }
        r.push_list(&self.args, ", ");
        r.sql.push(')');
    }
}
