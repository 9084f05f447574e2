use crate::{compile::alias::AliasRegistry, query::ast::common::JoinKind};
use model::{
    error::ColumnError,
    request::{column::Column, descriptor::FieldPath},
};
use tracing::debug;

/// One relationship join: `<parent_alias>.<field> AS <alias>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRecord {
    pub parent_alias: String,
    pub field: String,
    pub alias: String,
    pub kind: JoinKind,
}

/// Relationship joins in first-seen order, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinSet {
    records: Vec<JoinRecord>,
}

impl JoinSet {
    /// Derives the joins needed by `columns`. Only base fields the entity
    /// reports as relationships are joined; any other dotted path is left
    /// for the query language to navigate.
    pub fn resolve(
        columns: &[Column],
        relationships: &[String],
        aliases: &mut AliasRegistry,
        default_kind: JoinKind,
    ) -> Result<Self, ColumnError> {
        let mut joins = JoinSet::default();
        for column in columns {
            joins.add_column(column, relationships, aliases, default_kind)?;
        }
        Ok(joins)
    }

    pub fn add_column(
        &mut self,
        column: &Column,
        relationships: &[String],
        aliases: &mut AliasRegistry,
        default_kind: JoinKind,
    ) -> Result<(), ColumnError> {
        if column.is_multi_field() {
            for sub in column.sub_columns()? {
                if let Some(path) = sub.field_path()? {
                    self.add_path(path, relationships, aliases, default_kind);
                }
            }
        } else if let Some(path) = column.field_path()? {
            self.add_path(path, relationships, aliases, default_kind);
        }
        Ok(())
    }

    fn add_path(
        &mut self,
        path: &FieldPath,
        relationships: &[String],
        aliases: &mut AliasRegistry,
        default_kind: JoinKind,
    ) {
        let Some(base) = path.base_field() else {
            return;
        };
        if !relationships.iter().any(|r| r == base) {
            return;
        }

        let kind = if path.is_nullable() {
            JoinKind::Left
        } else {
            default_kind
        };
        self.add(aliases, base, kind);
    }

    /// Adds a join for `field` unless one exists. A later left join request
    /// downgrades an existing inner join so nullable paths keep their rows.
    pub fn add(&mut self, aliases: &mut AliasRegistry, field: &str, kind: JoinKind) {
        if let Some(record) = self.records.iter_mut().find(|r| r.field == field) {
            if kind == JoinKind::Left {
                record.kind = JoinKind::Left;
            }
            return;
        }

        let alias = aliases.register(field);
        debug!("Joining {}.{} as {} ({:?})", aliases.root_alias(), field, alias, kind);
        self.records.push(JoinRecord {
            parent_alias: aliases.root_alias().to_string(),
            field: field.to_string(),
            alias,
            kind,
        });
    }

    pub fn get(&self, field: &str) -> Option<&JoinRecord> {
        self.records.iter().find(|r| r.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JoinRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
