//! Query string building for list and read endpoints

use std::fmt::Display;

/// Page selection shared by every list operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page number
    pub page_number: Option<u32>,
    /// Items per page (the API caps this at 100)
    pub page_size: Option<u32>,
}

impl ListOptions {
    pub fn page(number: u32, size: u32) -> Self {
        Self {
            page_number: Some(number),
            page_size: Some(size),
        }
    }
}

/// Ordered list of query parameters
///
/// Keys are emitted verbatim (`page[size]`, `filter[status]`), values are
/// percent-encoded.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.push(key, v);
        }
        self
    }

    /// Comma-join a list of values under one key; skipped when empty
    pub fn push_list<V: Display>(&mut self, key: &str, values: &[V]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.push(key, joined);
        }
        self
    }

    pub fn list_options(&mut self, opts: &ListOptions) -> &mut Self {
        self.push_opt("page[number]", opts.page_number);
        self.push_opt("page[size]", opts.page_size);
        self
    }

    /// `include=a,b` for related resources
    pub fn include<V: Display>(&mut self, values: &[V]) -> &mut Self {
        self.push_list("include", values)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render as `?k=v&k=v`, or an empty string when there are no params
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let joined = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }

    /// Append to a path
    pub fn apply(&self, path: &str) -> String {
        format!("{}{}", path, self.to_query_string())
    }
}
