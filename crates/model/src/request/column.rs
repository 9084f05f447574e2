use crate::{
    error::ColumnError,
    request::{
        descriptor::{Descriptor, FieldPath},
        search::Search,
    },
};
use serde::{Deserialize, Serialize};

/// One reportable attribute of a table, described by a descriptor string.
///
/// The descriptor is parsed once at construction. Shape-dependent queries
/// (`has_relationship`, `is_nullable`, `sub_columns`) return a
/// [`ColumnError`] when asked of the wrong shape, so callers must branch on
/// [`Column::is_multi_field`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColumnParams", into = "ColumnParams")]
pub struct Column {
    data: String,
    name: String,
    searchable: bool,
    orderable: bool,
    search: Search,
    format: Option<String>,
    layout: Layout,
}

#[derive(Debug, Clone, PartialEq)]
enum Layout {
    /// Blank descriptor, typically an action column with no backing field.
    Empty,
    Single(FieldPath),
    Multi {
        paths: Vec<FieldPath>,
        delimiters: Vec<String>,
        formats: Vec<Option<String>>,
    },
}

impl Column {
    pub fn new(data: impl Into<String>) -> Result<Self, ColumnError> {
        Self::with_search(data, "")
    }

    /// Creates a column with a column-level search text override.
    pub fn with_search(
        data: impl Into<String>,
        search_text: impl Into<String>,
    ) -> Result<Self, ColumnError> {
        let data = data.into();
        let mut descriptor = Descriptor::parse(&data)?;
        let layout = match descriptor.paths.len() {
            0 => Layout::Empty,
            1 => Layout::Single(descriptor.paths.remove(0)),
            n => Layout::Multi {
                paths: descriptor.paths,
                delimiters: descriptor.delimiters,
                formats: vec![None; n],
            },
        };

        Ok(Self {
            data,
            name: String::new(),
            searchable: true,
            orderable: true,
            search: Search::new(search_text),
            format: None,
            layout,
        })
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_orderable(&self) -> bool {
        self.orderable
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    pub fn search_value(&self) -> &str {
        &self.search.value
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.searchable = searchable;
    }

    pub fn set_orderable(&mut self, orderable: bool) {
        self.orderable = orderable;
    }

    pub fn set_search(&mut self, search: Search) {
        self.search = search;
    }

    /// Sets the database-side format pattern used when this column is
    /// rendered for search. Sub-columns never inherit it; see
    /// [`Column::set_sub_column_format`].
    pub fn set_format(&mut self, format: Option<String>) {
        self.format = format;
    }

    pub fn set_sub_column_format(
        &mut self,
        index: usize,
        format: Option<String>,
    ) -> Result<(), ColumnError> {
        let descriptor = self.data.clone();
        match &mut self.layout {
            Layout::Multi { formats, .. } => {
                let len = formats.len();
                let slot = formats
                    .get_mut(index)
                    .ok_or(ColumnError::SubColumnOutOfRange {
                        descriptor,
                        index,
                        len,
                    })?;
                *slot = format;
                Ok(())
            }
            _ => Err(ColumnError::NotMultiField { descriptor }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.layout, Layout::Empty)
    }

    pub fn is_multi_field(&self) -> bool {
        matches!(self.layout, Layout::Multi { .. })
    }

    /// Field paths of this column with nullable markers stripped.
    pub fn field_list(&self) -> Vec<String> {
        match &self.layout {
            Layout::Empty => Vec::new(),
            Layout::Single(path) => vec![path.name()],
            Layout::Multi { paths, .. } => paths.iter().map(FieldPath::name).collect(),
        }
    }

    /// Literal text between consecutive fields; empty for single-field columns.
    pub fn delimiters(&self) -> &[String] {
        match &self.layout {
            Layout::Multi { delimiters, .. } => delimiters,
            _ => &[],
        }
    }

    /// The field path of a single-field column.
    pub fn field_path(&self) -> Result<Option<&FieldPath>, ColumnError> {
        match &self.layout {
            Layout::Empty => Ok(None),
            Layout::Single(path) => Ok(Some(path)),
            Layout::Multi { .. } => Err(self.multi_field_error()),
        }
    }

    pub fn has_relationship(&self) -> Result<bool, ColumnError> {
        Ok(self
            .field_path()?
            .is_some_and(FieldPath::has_relationship))
    }

    pub fn is_nullable(&self) -> Result<bool, ColumnError> {
        Ok(self.field_path()?.is_some_and(FieldPath::is_nullable))
    }

    /// The relationship navigation property, e.g. `child` for `child.firstData`.
    pub fn base_field(&self) -> Result<&str, ColumnError> {
        self.field_path()?
            .and_then(FieldPath::base_field)
            .ok_or_else(|| ColumnError::NoRelationship {
                descriptor: self.data.clone(),
            })
    }

    /// Splits a multi-field column into one column per field. Each
    /// sub-column inherits the parent's search and ordering flags.
    pub fn sub_columns(&self) -> Result<Vec<Column>, ColumnError> {
        let Layout::Multi { paths, formats, .. } = &self.layout else {
            return Err(ColumnError::NotMultiField {
                descriptor: self.data.clone(),
            });
        };

        Ok(paths
            .iter()
            .zip(formats)
            .map(|(path, format)| Column {
                data: path.to_string(),
                name: String::new(),
                searchable: self.searchable,
                orderable: self.orderable,
                search: self.search.clone(),
                format: format.clone(),
                layout: Layout::Single(path.clone()),
            })
            .collect())
    }

    fn multi_field_error(&self) -> ColumnError {
        ColumnError::MultiField {
            descriptor: self.data.clone(),
        }
    }
}

/// Wire shape of a column as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnParams {
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default = "default_true")]
    searchable: bool,
    #[serde(default = "default_true")]
    orderable: bool,
    #[serde(default)]
    search: Search,
}

fn default_true() -> bool {
    true
}

impl TryFrom<ColumnParams> for Column {
    type Error = ColumnError;

    fn try_from(params: ColumnParams) -> Result<Self, Self::Error> {
        let mut column = Column::new(params.data.unwrap_or_default())?;
        column.name = params.name;
        column.searchable = params.searchable;
        column.orderable = params.orderable;
        column.search = params.search;
        Ok(column)
    }
}

impl From<Column> for ColumnParams {
    fn from(column: Column) -> Self {
        Self {
            data: Some(column.data),
            name: column.name,
            searchable: column.searchable,
            orderable: column.orderable,
            search: column.search,
        }
    }
}
