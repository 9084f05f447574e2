//! Rewrites relationship paths inside caller-supplied fragments.
//!
//! Callers write `parent.child.name`; the compiled query must say
//! `child_1.name`. Text inside single-quoted literals is left alone.

use crate::compile::alias::AliasRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathRef {
    start: usize,
    end: usize,
    field: String,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Finds `<root>.<field>.` occurrences outside string literals. `end` is
/// the index just past the second dot.
fn scan(fragment: &str, root_alias: &str) -> Vec<PathRef> {
    let bytes = fragment.as_bytes();
    let prefix = format!("{root_alias}.");
    let prefix = prefix.as_bytes();

    let mut refs = Vec::new();
    let mut in_literal = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            in_literal = !in_literal;
            i += 1;
            continue;
        }

        let boundary = i == 0 || !(is_ident_byte(bytes[i - 1]) || bytes[i - 1] == b'.');
        if !in_literal && boundary && bytes[i..].starts_with(prefix) {
            let field_start = i + prefix.len();
            let field_len = bytes[field_start..]
                .iter()
                .take_while(|b| is_ident_byte(**b))
                .count();
            let field_end = field_start + field_len;

            if field_len > 0 && bytes.get(field_end) == Some(&b'.') {
                refs.push(PathRef {
                    start: i,
                    end: field_end + 1,
                    field: fragment[field_start..field_end].to_string(),
                });
                i = field_end + 1;
                continue;
            }
        }
        i += 1;
    }
    refs
}

/// Fields navigated through the root alias in `fragment`, in order of
/// appearance and without duplicates.
pub fn referenced_fields(fragment: &str, root_alias: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for r in scan(fragment, root_alias) {
        if !fields.contains(&r.field) {
            fields.push(r.field);
        }
    }
    fields
}

/// Replaces `<root>.<field>.` with `<alias>.` for every joined relationship.
pub fn rewrite_paths(fragment: &str, aliases: &AliasRegistry, relationships: &[String]) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut last = 0;

    for r in scan(fragment, aliases.root_alias()) {
        if !relationships.iter().any(|f| *f == r.field) {
            continue;
        }
        let Some(alias) = aliases.lookup(&r.field) else {
            continue;
        };
        out.push_str(&fragment[last..r.start]);
        out.push_str(alias);
        out.push('.');
        last = r.end;
    }

    out.push_str(&fragment[last..]);
    out
}
