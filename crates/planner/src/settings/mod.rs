use crate::{
    query::{
        ast::common::JoinKind,
        dialect::{Dialect, Hql, Jpql},
    },
    settings::error::SettingsError,
};
use serde::{Deserialize, Serialize};

pub mod error;

/// Target query language of the compiled text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    Jpql,
    Hql,
}

impl DialectKind {
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Jpql => &Jpql,
            DialectKind::Hql => &Hql,
        }
    }
}

/// Knobs controlling how a request is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    pub dialect: DialectKind,
    /// Join emitted for relationship columns. Nullable markers always
    /// force a left join regardless of this value.
    pub join_kind: JoinKind,
    pub escape_char: char,
    /// Characters kept from each path segment when building an alias.
    pub alias_prefix_len: usize,
    pub param_prefix: String,
    pub format_function: String,
    /// Apply the caller's extra WHERE conditions to the total count too.
    /// The search predicate never applies to it.
    pub total_count_conditions: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            join_kind: JoinKind::default(),
            escape_char: '#',
            alias_prefix_len: 5,
            param_prefix: "value_".to_string(),
            format_function: "date_format".to_string(),
            total_count_conditions: false,
        }
    }
}

impl CompilerSettings {
    /// Decodes settings from JSON and validates them. Missing keys take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: CompilerSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let c = self.escape_char;
        if matches!(c, '%' | '_' | '\'') || c.is_whitespace() {
            return Err(SettingsError::InvalidEscapeChar(c));
        }
        if self.alias_prefix_len == 0 {
            return Err(SettingsError::ZeroAliasPrefix);
        }
        if self.param_prefix.trim().is_empty() {
            return Err(SettingsError::EmptyParamPrefix);
        }
        if self.format_function.trim().is_empty() {
            return Err(SettingsError::EmptyFormatFunction);
        }
        Ok(())
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        self.dialect.dialect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CompilerSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.escape_char, '#');
        assert_eq!(settings.join_kind, JoinKind::Left);
        assert_eq!(settings.dialect().name(), "JPQL");
    }

    #[test]
    fn test_from_json_partial() {
        let settings =
            CompilerSettings::from_json(r#"{"dialect": "hql", "join_kind": "inner"}"#).unwrap();
        assert_eq!(settings.dialect, DialectKind::Hql);
        assert_eq!(settings.join_kind, JoinKind::Inner);
        assert_eq!(settings.param_prefix, "value_");
        assert_eq!(settings.dialect().name(), "HQL");
    }

    #[test]
    fn test_rejects_wildcard_escape() {
        let err = CompilerSettings::from_json(r#"{"escape_char": "%"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidEscapeChar('%')));
    }

    #[test]
    fn test_rejects_zero_prefix_and_bad_json() {
        let err = CompilerSettings::from_json(r#"{"alias_prefix_len": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::ZeroAliasPrefix));

        let err = CompilerSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Decode(_)));
    }
}
