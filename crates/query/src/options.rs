use std::fmt;

use serde::{Deserialize, Serialize};

/// Default page size used by the content API when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the content API will return.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// Sort key for a query, e.g. `document.first_publication_date desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub field: String,
    pub direction: Direction,
}

impl Ordering {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => f.write_str(&self.field),
            Direction::Desc => write!(f, "{} desc", self.field),
        }
    }
}

/// Paging, ordering and cursor options for a document search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub page_size: Option<u32>,
    pub page: Option<u32>,
    pub orderings: Vec<Ordering>,
    /// Only return documents that come after this document id in the
    /// requested ordering.
    pub after: Option<String>,
    pub lang: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size.clamp(1, MAX_PAGE_SIZE));
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    pub fn effective_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Render the `orderings` parameter, or `None` when unordered.
    pub fn orderings_param(&self) -> Option<String> {
        if self.orderings.is_empty() {
            return None;
        }
        let fields: Vec<String> = self.orderings.iter().map(ToString::to_string).collect();
        Some(format!("[{}]", fields.join(",")))
    }

    /// Query-string pairs for the search endpoint, excluding `ref` and `q`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(orderings) = self.orderings_param() {
            params.push(("orderings", orderings));
        }
        if let Some(after) = &self.after {
            params.push(("after", after.clone()));
        }
        if let Some(lang) = &self.lang {
            params.push(("lang", lang.clone()));
        }
        params
    }
}
