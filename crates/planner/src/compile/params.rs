use model::core::value::Value;
use std::collections::BTreeMap;

/// Caller-supplied query fragments and named parameter values.
///
/// Fragments are kept in insertion order without duplicates; blank
/// fragments are ignored. Cloning gives an independent copy, which is how
/// each compiled variant gets its own parameter numbering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    select: Option<String>,
    where_conditions: Vec<String>,
    group_by: Vec<String>,
    having: Vec<String>,
    order_by: Vec<String>,
    values: BTreeMap<String, Value>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the page projection, e.g. `SELECT parent.id, parent.data`.
    pub fn set_select(&mut self, select: impl Into<String>) -> &mut Self {
        let select = select.into();
        self.select = if select.trim().is_empty() {
            None
        } else {
            Some(select)
        };
        self
    }

    pub fn add_where_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        push_unique(&mut self.where_conditions, condition.into());
        self
    }

    pub fn add_group_by_field(&mut self, field: impl Into<String>) -> &mut Self {
        push_unique(&mut self.group_by, field.into());
        self
    }

    pub fn add_having_condition(&mut self, condition: impl Into<String>) -> &mut Self {
        push_unique(&mut self.having, condition.into());
        self
    }

    pub fn add_order_condition(&mut self, order: impl Into<String>) -> &mut Self {
        push_unique(&mut self.order_by, order.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    pub fn where_conditions(&self) -> &[String] {
        &self.where_conditions
    }

    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    pub fn having(&self) -> &[String] {
        &self.having
    }

    pub fn order_by(&self) -> &[String] {
        &self.order_by
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> BTreeMap<String, Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binds `value` under `<prefix><n>` where `n` starts at the number of
    /// bound values and advances past names already taken.
    pub fn bind_next(&mut self, prefix: &str, value: impl Into<Value>) -> String {
        let mut n = self.values.len();
        let mut name = format!("{prefix}{n}");
        while self.values.contains_key(&name) {
            n += 1;
            name = format!("{prefix}{n}");
        }
        self.values.insert(name.clone(), value.into());
        name
    }

    /// Every fragment that can reference entity paths, SELECT override first.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.select
            .iter()
            .chain(&self.where_conditions)
            .chain(&self.group_by)
            .chain(&self.having)
            .chain(&self.order_by)
            .map(String::as_str)
    }

    /// Applies `f` to every fragment.
    pub fn map_fragments(mut self, f: impl Fn(&str) -> String) -> Self {
        self.select = self.select.map(|s| f(&s));
        for list in [
            &mut self.where_conditions,
            &mut self.group_by,
            &mut self.having,
            &mut self.order_by,
        ] {
            let mapped: Vec<String> = list.iter().map(|s| f(s)).collect();
            list.clear();
            for fragment in mapped {
                push_unique(list, fragment);
            }
        }
        self
    }
}

fn push_unique(list: &mut Vec<String>, fragment: String) {
    if fragment.trim().is_empty() || list.contains(&fragment) {
        return;
    }
    list.push(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragments_are_deduplicated_and_blank_ignored() {
        let mut params = QueryParams::new();
        params
            .add_where_condition("parent.active = true")
            .add_where_condition("  ")
            .add_where_condition("parent.active = true")
            .add_group_by_field("parent.id")
            .add_having_condition("COUNT(parent) > 1")
            .add_order_condition("parent.id DESC");

        assert_eq!(params.where_conditions(), &["parent.active = true".to_string()]);
        assert_eq!(params.group_by().len(), 1);
        assert_eq!(params.having().len(), 1);
        assert_eq!(params.order_by().len(), 1);
        assert_eq!(params.fragments().count(), 4);
    }

    #[test]
    fn test_bind_next_skips_taken_names() {
        let mut params = QueryParams::new();
        params.insert("value_1", 42_i64);

        let first = params.bind_next("value_", "a");
        let second = params.bind_next("value_", "b");

        assert_eq!(first, "value_2");
        assert_eq!(second, "value_3");
        assert_eq!(params.get("value_2"), Some(&Value::String("a".to_string())));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut base = QueryParams::new();
        base.insert("status", "open");

        let mut page = base.clone();
        let mut count = base.clone();
        let page_name = page.bind_next("value_", "x");
        let count_name = count.bind_next("value_", "x");

        assert_eq!(page_name, count_name);
        assert_eq!(base.len(), 1);
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_select_override() {
        let mut params = QueryParams::new();
        params.set_select("SELECT parent.id");
        assert_eq!(params.select(), Some("SELECT parent.id"));

        params.set_select("");
        assert_eq!(params.select(), None);
    }

    #[test]
    fn test_map_fragments() {
        let mut params = QueryParams::new();
        params
            .add_where_condition("a = 1")
            .add_where_condition("A = 1")
            .add_order_condition("b");

        let mapped = params.map_fragments(|s| s.to_lowercase());
        assert_eq!(mapped.where_conditions(), &["a = 1".to_string()]);
        assert_eq!(mapped.order_by(), &["b".to_string()]);
    }
}
