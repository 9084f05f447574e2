//! Parser for the column descriptor mini-language.
//!
//! A descriptor names one or more entity fields:
//!
//! - `field`: a field on the root entity
//! - `child.field`: a field reached through the `child` relationship
//! - `child?.field`: same, but the relationship may be null
//! - `first + last`: a multi-field column rendered as a concatenation

use crate::error::ColumnError;
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "grammar/descriptor.pest"]
struct DescriptorParser;

/// One dotted segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub name: String,
    pub nullable: bool,
}

/// Dot-separated path to a field, e.g. `child?.firstData`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub segments: Vec<Segment>,
}

impl FieldPath {
    /// A path with two or more segments navigates a relationship.
    pub fn has_relationship(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn is_nullable(&self) -> bool {
        self.segments.iter().any(|s| s.nullable)
    }

    /// The relationship field the path navigates through, if any.
    pub fn base_field(&self) -> Option<&str> {
        if self.has_relationship() {
            self.segments.first().map(|s| s.name.as_str())
        } else {
            None
        }
    }

    /// The field inside the related entity, e.g. `firstData` for `child.firstData`.
    pub fn remainder(&self) -> String {
        self.segments
            .iter()
            .skip(1)
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// The path with nullable markers stripped.
    pub fn name(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self
            .segments
            .iter()
            .map(|s| {
                if s.nullable {
                    format!("{}?", s.name)
                } else {
                    s.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{raw}")
    }
}

/// The parsed form of a descriptor: its field paths and the literal text
/// found between each consecutive pair of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptor {
    pub paths: Vec<FieldPath>,
    pub delimiters: Vec<String>,
}

impl Descriptor {
    pub fn parse(input: &str) -> Result<Self, ColumnError> {
        let mut pairs =
            DescriptorParser::parse(Rule::descriptor, input).map_err(|e| ColumnError::Parse {
                descriptor: input.to_string(),
                message: e.variant.message().to_string(),
            })?;

        let mut descriptor = Descriptor::default();
        let Some(root) = pairs.next() else {
            return Ok(descriptor);
        };

        // Delimiters only count when they sit between two paths.
        let mut pending: Option<String> = None;
        for pair in root.into_inner() {
            match pair.as_rule() {
                Rule::field_path => {
                    if !descriptor.paths.is_empty() {
                        descriptor.delimiters.push(pending.take().unwrap_or_default());
                    }
                    descriptor.paths.push(parse_field_path(pair));
                }
                Rule::delimiter => pending = Some(pair.as_str().to_string()),
                _ => {}
            }
        }

        Ok(descriptor)
    }

    pub fn is_multi_field(&self) -> bool {
        self.paths.len() > 1
    }
}

fn parse_field_path(pair: Pair<Rule>) -> FieldPath {
    let segments = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::segment)
        .map(|segment| {
            let mut name = String::new();
            let mut nullable = false;
            for part in segment.into_inner() {
                match part.as_rule() {
                    Rule::ident => name = part.as_str().to_string(),
                    Rule::nullable => nullable = true,
                    _ => {}
                }
            }
            Segment { name, nullable }
        })
        .collect();

    FieldPath { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field() {
        let d = Descriptor::parse("field").unwrap();
        assert_eq!(d.paths.len(), 1);
        assert!(d.delimiters.is_empty());
        assert!(!d.paths[0].has_relationship());
        assert_eq!(d.paths[0].name(), "field");
    }

    #[test]
    fn test_relationship_path() {
        let d = Descriptor::parse("child.address.city").unwrap();
        let path = &d.paths[0];
        assert!(path.has_relationship());
        assert_eq!(path.base_field(), Some("child"));
        assert_eq!(path.remainder(), "address.city");
    }

    #[test]
    fn test_nullable_marker_is_stripped() {
        let d = Descriptor::parse("child?.firstData").unwrap();
        let path = &d.paths[0];
        assert!(path.is_nullable());
        assert_eq!(path.name(), "child.firstData");
        assert_eq!(path.to_string(), "child?.firstData");
    }

    #[test]
    fn test_multi_field_keeps_raw_delimiters() {
        let d = Descriptor::parse("a + b~c").unwrap();
        assert!(d.is_multi_field());
        assert_eq!(d.paths.len(), 3);
        assert_eq!(d.delimiters, vec![" + ".to_string(), "~".to_string()]);
    }

    #[test]
    fn test_surrounding_delimiters_are_ignored() {
        let d = Descriptor::parse("  first last  ").unwrap();
        assert_eq!(d.paths.len(), 2);
        assert_eq!(d.delimiters, vec![" ".to_string()]);
    }

    #[test]
    fn test_empty_descriptor() {
        let d = Descriptor::parse("").unwrap();
        assert!(d.paths.is_empty());
        assert!(!d.is_multi_field());
    }

    #[test]
    fn test_question_mark_between_fields_is_a_delimiter() {
        let d = Descriptor::parse("first?name").unwrap();
        assert_eq!(d.paths.len(), 2);
        assert_eq!(d.delimiters, vec!["?".to_string()]);
        assert!(!d.paths[0].is_nullable());
        assert_eq!(d.paths[1].name(), "name");
    }

    #[test]
    fn test_trailing_marker_is_nullable() {
        let d = Descriptor::parse("child.name?").unwrap();
        assert_eq!(d.paths.len(), 1);
        assert!(d.paths[0].is_nullable());
        assert_eq!(d.paths[0].name(), "child.name");
    }
}
