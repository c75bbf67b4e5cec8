//! Listing query parameters
//!
//! [`ListOptions`] collects the filters the list endpoint accepts and encodes
//! them to the exact wire parameter names (`maxRecords`, `filterByFormula`,
//! `sort[0][field]`, ...). Encoding order does not matter: the URL layer
//! serializes parameters in canonical sorted order.

use crate::types::{CellFormat, QueryPairs};

/// Sort direction for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending (the API default)
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl SortDirection {
    /// Wire value for the `sort[n][direction]` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sort field of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Column name
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortField {
    /// Create a sort field with an explicit direction
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parse a field name with an optional leading `-` meaning descending.
    ///
    /// `"Name"` sorts ascending, `"-Age"` sorts descending.
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('-') {
            Some(field) => Self::new(field, SortDirection::Desc),
            None => Self::new(spec, SortDirection::Asc),
        }
    }
}

/// Query options for listing records.
///
/// ```rust
/// use airtable_client::ListOptions;
///
/// let options = ListOptions::new()
///     .view("Grid view")
///     .max_records(50)
///     .sort(["Name", "-Age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Name or id of a view; records come back in view order
    pub view: Option<String>,
    /// Maximum total number of records to return across all pages
    pub max_records: Option<u32>,
    /// Records per page (max 100)
    pub page_size: Option<u32>,
    /// Only return these fields
    pub fields: Vec<String>,
    /// Formula evaluated per record; falsy results are excluded
    pub formula: Option<String>,
    /// Sort fields, applied in order
    pub sort: Vec<SortField>,
    /// Cell value format
    pub cell_format: Option<CellFormat>,
    /// Time zone for `CellFormat::String` rendering
    pub time_zone: Option<String>,
    /// User locale for `CellFormat::String` rendering
    pub user_locale: Option<String>,
    /// Key `fields` by field id instead of column name
    pub return_fields_by_field_id: Option<bool>,
}

impl ListOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the view
    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Set the maximum total number of records
    #[must_use]
    pub fn max_records(mut self, max_records: u32) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Restrict returned fields
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the filter formula
    #[must_use]
    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Set sort fields from specs with an optional leading `-` for descending
    #[must_use]
    pub fn sort<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sort = specs
            .into_iter()
            .map(|spec| SortField::parse(spec.as_ref()))
            .collect();
        self
    }

    /// Set the cell format
    #[must_use]
    pub fn cell_format(mut self, cell_format: CellFormat) -> Self {
        self.cell_format = Some(cell_format);
        self
    }

    /// Set the time zone
    #[must_use]
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Set the user locale
    #[must_use]
    pub fn user_locale(mut self, user_locale: impl Into<String>) -> Self {
        self.user_locale = Some(user_locale.into());
        self
    }

    /// Key `fields` by field id instead of column name
    #[must_use]
    pub fn return_fields_by_field_id(mut self, enabled: bool) -> Self {
        self.return_fields_by_field_id = Some(enabled);
        self
    }

    /// Encode to wire query parameter pairs.
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();

        if let Some(view) = &self.view {
            pairs.push(("view".to_string(), view.clone()));
        }
        if let Some(max_records) = self.max_records {
            pairs.push(("maxRecords".to_string(), max_records.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
        for field in &self.fields {
            pairs.push(("fields[]".to_string(), field.clone()));
        }
        if let Some(formula) = &self.formula {
            pairs.push(("filterByFormula".to_string(), formula.clone()));
        }
        for (index, sort) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{index}][field]"), sort.field.clone()));
            pairs.push((
                format!("sort[{index}][direction]"),
                sort.direction.as_str().to_string(),
            ));
        }
        if let Some(cell_format) = self.cell_format {
            pairs.push(("cellFormat".to_string(), cell_format.as_str().to_string()));
        }
        if let Some(time_zone) = &self.time_zone {
            pairs.push(("timeZone".to_string(), time_zone.clone()));
        }
        if let Some(user_locale) = &self.user_locale {
            pairs.push(("userLocale".to_string(), user_locale.clone()));
        }
        if let Some(enabled) = self.return_fields_by_field_id {
            let value = if enabled { "1" } else { "0" };
            pairs.push(("returnFieldsByFieldId".to_string(), value.to_string()));
        }

        pairs
    }
}
