//! Deterministic short aliases for the root entity and its relationships.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use tracing::debug;

lazy_static! {
    /// Keywords that cannot be used as an identification variable.
    static ref RESERVED: HashSet<&'static str> = [
        "all", "and", "any", "as", "asc", "avg", "between", "by", "case", "count", "delete",
        "desc", "distinct", "else", "empty", "end", "exists", "false", "fetch", "from", "group",
        "having", "in", "inner", "is", "join", "key", "left", "like", "max", "member", "min",
        "new", "not", "null", "object", "of", "on", "or", "order", "outer", "select", "set",
        "some", "sum", "then", "true", "type", "update", "value", "when", "where",
    ]
    .into_iter()
    .collect();
}

/// Maps path keys to aliases for the lifetime of one compiler.
///
/// The root entity is always entry 0. A relationship path gets
/// `<prefix>_<ordinal>` where the prefix is built from the first
/// `prefix_len` characters of each segment and the ordinal is the number of
/// entries at insertion time. Re-registering a path returns its alias
/// without consuming an ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRegistry {
    prefix_len: usize,
    keys: Vec<String>,
    aliases: HashMap<String, String>,
}

impl AliasRegistry {
    pub fn new(root: &str, prefix_len: usize) -> Self {
        let mut registry = Self {
            prefix_len,
            keys: Vec::new(),
            aliases: HashMap::new(),
        };

        let natural = root.to_lowercase();
        let alias = if natural.is_empty() || RESERVED.contains(natural.as_str()) {
            format!("{}_0", registry.prefix(root))
        } else {
            natural
        };
        debug!("Root entity {} aliased as {}", root, alias);
        registry.insert(root, alias);
        registry
    }

    /// The root entity's key, i.e. its simple name.
    pub fn root(&self) -> &str {
        &self.keys[0]
    }

    pub fn root_alias(&self) -> &str {
        &self.aliases[self.root()]
    }

    pub fn register(&mut self, path: &str) -> String {
        if let Some(alias) = self.aliases.get(path) {
            return alias.clone();
        }

        let prefix = self.prefix(path);
        let mut ordinal = self.keys.len();
        let mut alias = format!("{prefix}_{ordinal}");
        while self.aliases.values().any(|a| *a == alias) {
            ordinal += 1;
            alias = format!("{prefix}_{ordinal}");
        }

        debug!("Registered alias {} for path {}", alias, path);
        self.insert(path, alias.clone());
        alias
    }

    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(path, alias)` pairs in registration order, root first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(|key| (key.as_str(), self.aliases[key].as_str()))
    }

    fn insert(&mut self, key: &str, alias: String) {
        self.keys.push(key.to_string());
        self.aliases.insert(key.to_string(), alias);
    }

    fn prefix(&self, path: &str) -> String {
        path.split('.')
            .map(|segment| {
                segment
                    .chars()
                    .take(self.prefix_len)
                    .collect::<String>()
                    .to_lowercase()
            })
            .collect::<Vec<_>>()
            .join("_")
    }
}
