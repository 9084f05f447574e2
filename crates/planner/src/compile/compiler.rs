//! Compiles a table request into page, total-count and filtered-count queries.

use crate::{
    compile::{
        alias::AliasRegistry,
        field::{FieldExpressions, escape_wildcards},
        join::JoinSet,
        params::QueryParams,
        rewrite::{referenced_fields, rewrite_paths},
    },
    entity::EntityMetadata,
    error::CompileError,
    query::{
        ast::{
            common::EntityRef,
            expr::{Expr, FunctionCall, Ident, LogicalOperator},
        },
        builder::select::SelectBuilder,
        raw,
        renderer::render_to_string,
    },
    settings::CompilerSettings,
};
use model::{core::value::Value, request::table::TableRequest};
use std::{collections::BTreeMap, fmt};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// The requested page of entities.
    Page,
    /// Row count ignoring the search text.
    TotalCount,
    /// Row count with the same filtering as the page.
    FilteredCount,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Page => "page",
            QueryKind::TotalCount => "total count",
            QueryKind::FilteredCount => "filtered count",
        };
        write!(f, "{name}")
    }
}

/// Query text plus everything needed to execute it. Pagination bounds are
/// set only for [`QueryKind::Page`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub kind: QueryKind,
    pub text: String,
    pub params: BTreeMap<String, Value>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQueries {
    pub page: CompiledQuery,
    pub total_count: CompiledQuery,
    pub filtered_count: CompiledQuery,
}

/// Binds one request to one entity.
///
/// Aliases and joins are resolved once at construction, from the request's
/// columns and from relationship paths referenced in the caller's fragments,
/// so every variant compiled from the same instance shares them.
#[derive(Debug)]
pub struct QueryCompiler<'a> {
    request: &'a TableRequest,
    entity: String,
    relationships: Vec<String>,
    settings: CompilerSettings,
    params: QueryParams,
    aliases: AliasRegistry,
    joins: JoinSet,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(
        entity: &dyn EntityMetadata,
        request: &'a TableRequest,
        params: QueryParams,
        settings: CompilerSettings,
    ) -> Result<Self, CompileError> {
        settings.validate()?;
        if !entity.is_valid_entity() {
            return Err(CompileError::InvalidEntity(entity.simple_name().to_string()));
        }
        request.validate()?;

        let relationships = entity.relationship_fields();
        let mut aliases = AliasRegistry::new(entity.simple_name(), settings.alias_prefix_len);
        let mut joins = JoinSet::resolve(
            &request.columns,
            &relationships,
            &mut aliases,
            settings.join_kind,
        )?;

        let root_alias = aliases.root_alias().to_string();
        for fragment in params.fragments() {
            for field in referenced_fields(fragment, &root_alias) {
                if relationships.contains(&field) {
                    joins.add(&mut aliases, &field, settings.join_kind);
                }
            }
        }
        let params = params.map_fragments(|f| rewrite_paths(f, &aliases, &relationships));

        debug!(
            "Compiler for {} resolved {} aliases and {} joins",
            entity.simple_name(),
            aliases.len(),
            joins.len()
        );

        Ok(Self {
            request,
            entity: entity.simple_name().to_string(),
            relationships,
            settings,
            params,
            aliases,
            joins,
        })
    }

    /// A compiler with no caller fragments and default settings.
    pub fn for_request(
        entity: &dyn EntityMetadata,
        request: &'a TableRequest,
    ) -> Result<Self, CompileError> {
        Self::new(entity, request, QueryParams::default(), CompilerSettings::default())
    }

    pub fn aliases(&self) -> &AliasRegistry {
        &self.aliases
    }

    pub fn joins(&self) -> &JoinSet {
        &self.joins
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn request(&self) -> &TableRequest {
        self.request
    }

    pub fn compile_all(&self) -> Result<CompiledQueries, CompileError> {
        Ok(CompiledQueries {
            page: self.compile(QueryKind::Page)?,
            total_count: self.compile(QueryKind::TotalCount)?,
            filtered_count: self.compile(QueryKind::FilteredCount)?,
        })
    }

    pub fn compile(&self, kind: QueryKind) -> Result<CompiledQuery, CompileError> {
        let mut bag = self.params.clone();
        let fields = FieldExpressions::new(&self.aliases, &self.relationships, &self.settings);
        let root = self.aliases.root_alias();

        let projection = match kind {
            QueryKind::Page => match bag.select() {
                Some(select) => raw(strip_select(select)),
                None => Expr::Identifier(Ident::new(root)),
            },
            QueryKind::TotalCount | QueryKind::FilteredCount => {
                count_projection(root, bag.group_by())
            }
        };

        let mut builder = SelectBuilder::new()
            .select(vec![projection])
            .from(EntityRef::new(self.entity.as_str()), Some(root));

        for join in self.joins.iter() {
            builder = builder.join(
                join.kind,
                Ident::qualified(join.parent_alias.as_str(), join.field.as_str()),
                &join.alias,
            );
        }

        let with_conditions = kind != QueryKind::TotalCount || self.settings.total_count_conditions;
        if with_conditions {
            for condition in bag.where_conditions() {
                builder = builder.where_clause(nested(condition));
            }
        }

        if kind != QueryKind::TotalCount {
            if let Some(search) = self.search_condition(&fields, &mut bag)? {
                builder = builder.where_clause(search);
            }
        }

        if kind == QueryKind::Page {
            for field in bag.group_by() {
                builder = builder.group_by(raw(field));
            }
            for condition in bag.having() {
                builder = builder.having(nested(condition));
            }

            for order in &self.request.order {
                let column = self.request.column(order.column())?;
                if !column.is_orderable() {
                    continue;
                }
                if let Some(expr) = fields.field_expression(column, false)? {
                    builder = builder.order_by(expr, Some(order.dir()));
                }
            }
            for order in bag.order_by() {
                builder = builder.order_by(raw(order), None);
            }
        }

        let dialect = self.settings.dialect();
        let text = render_to_string(&builder.build(), dialect);
        debug!("Compiled {} query: {}", kind, text);

        // Executors reject values for placeholders the text does not contain.
        let params: BTreeMap<String, Value> = bag
            .into_values()
            .into_iter()
            .filter(|(name, _)| mentions_placeholder(&text, &dialect.placeholder(name)))
            .collect();

        let (offset, limit) = match kind {
            QueryKind::Page => (Some(self.request.start), Some(self.request.limit()?)),
            _ => (None, None),
        };

        Ok(CompiledQuery {
            kind,
            text,
            params,
            offset,
            limit,
        })
    }

    /// One LIKE predicate per searchable column with non-empty effective
    /// search text, OR-ed into a single parenthesized unit.
    fn search_condition(
        &self,
        fields: &FieldExpressions,
        bag: &mut QueryParams,
    ) -> Result<Option<Expr>, CompileError> {
        let mut predicates = Vec::new();
        for column in &self.request.columns {
            if !column.is_searchable() {
                continue;
            }
            let text = self.request.search_text(column);
            if text.is_empty() {
                continue;
            }
            let Some(expr) = fields.field_expression(column, true)? else {
                continue;
            };

            let value = escape_wildcards(text, self.settings.escape_char);
            let name = bag.bind_next(&self.settings.param_prefix, value);
            predicates.push(fields.search_predicate(expr, &name));
        }

        if predicates.is_empty() {
            return Ok(None);
        }
        Ok(Some(Expr::Junction {
            op: LogicalOperator::Or,
            operands: predicates,
        }))
    }
}

fn nested(fragment: &str) -> Expr {
    Expr::Nested(Box::new(raw(fragment)))
}

/// `COUNT(root)`, or `COUNT(DISTINCT ..)` over the grouping expressions so
/// the count matches the number of grouped page rows.
fn count_projection(root: &str, group_by: &[String]) -> Expr {
    if group_by.is_empty() {
        return Expr::FunctionCall(FunctionCall::new(
            "COUNT",
            vec![Expr::Identifier(Ident::new(root))],
        ));
    }

    let mut count = FunctionCall::new("COUNT", group_by.iter().map(|g| raw(g)).collect());
    count.distinct = true;
    Expr::FunctionCall(count)
}

/// Whether `placeholder` occurs in `text` as a whole token, so `:id` does
/// not match inside `:idList`.
fn mentions_placeholder(text: &str, placeholder: &str) -> bool {
    text.match_indices(placeholder).any(|(start, _)| {
        let next = text[start + placeholder.len()..].chars().next();
        let prev = text[..start].chars().next_back();
        !next.is_some_and(|c| c.is_alphanumeric() || c == '_') && prev != Some(':')
    })
}

fn strip_select(select: &str) -> &str {
    let trimmed = select.trim_start();
    match trimmed.get(..7) {
        Some(keyword) if keyword.eq_ignore_ascii_case("select ") => trimmed[7..].trim_start(),
        _ => trimmed,
    }
}
