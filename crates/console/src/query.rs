//! List query state and request URL building.
//!
//! Responsibilities:
//! - Hold the page, page size, search term, and filters of a list view.
//! - Build the exact request URL for that state.
//!
//! Does NOT handle:
//! - Deciding whether the URL should be fetched (see [`crate::RequestSession`]).
//!
//! # Invariants
//! - URL building is pure: identical inputs always produce identical strings
//! - `page_size` and `page` are always emitted; `q` and filters only when non-empty
//! - Parameters are *set*: a same-named parameter already in the base URL is
//!   replaced in place, anything else in the base query is kept
//! - A bare-path base yields a bare-path URL (path + query)

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::error::ListError;

/// Query parameter carrying the page size.
pub const PARAM_PAGE_SIZE: &str = "page_size";
/// Query parameter carrying the 1-based page number.
pub const PARAM_PAGE: &str = "page";
/// Query parameter carrying the free-text search term.
pub const PARAM_SEARCH: &str = "q";

const RELATIVE_ROOT: &str = "http://relative.invalid/";

/// Named list filters, kept in key order.
///
/// A `None` or empty value marks the filter as inactive; it is never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, Option<String>>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter, string-coercing its value.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), Some(value.to_string()));
        self
    }

    /// Add a filter explicitly cleared to "no value".
    pub fn without(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), None);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.insert(key.into(), value);
    }

    /// Value of an active filter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Filters that will be sent, in key order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(k, v)| match v.as_deref() {
            Some(v) if !v.is_empty() => Some((k.as_str(), v)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Overlay `other` onto these filters; `other` wins on key collisions.
    pub fn merged(mut self, other: &Filters) -> Self {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.to_string())))
                .collect(),
        )
    }
}

/// A validated collection URL: a bare path or an absolute `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    url: Url,
    relative: bool,
}

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, ListError> {
        let invalid = |reason: String| ListError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        if raw.trim().is_empty() {
            return Err(invalid("empty".to_string()));
        }

        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self {
                url,
                relative: false,
            }),
            Ok(url) => Err(invalid(format!("unsupported scheme '{}'", url.scheme()))),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let root = Url::parse(RELATIVE_ROOT).map_err(|e| invalid(e.to_string()))?;
                let url = root.join(raw).map_err(|e| invalid(e.to_string()))?;
                Ok(Self {
                    url,
                    relative: true,
                })
            }
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Apply `params` with set semantics and render the URL.
    pub fn with_params<'a>(&self, params: impl IntoIterator<Item = (&'a str, String)>) -> String {
        let mut pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        for (key, value) in params {
            set_param(&mut pairs, key, value);
        }

        let mut url = self.url.clone();
        url.set_fragment(None);
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(&pairs);
        }

        if self.relative {
            match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            }
        } else {
            url.to_string()
        }
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            f.write_str(self.url.path())?;
            if let Some(query) = self.url.query() {
                write!(f, "?{}", query)?;
            }
            Ok(())
        } else {
            f.write_str(self.url.as_str())
        }
    }
}

/// Replace the first `key` in place and drop later duplicates, or append.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value)),
    }
}

/// Page, page size, search term, and filters of one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub filters: Filters,
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            search: String::new(),
            filters: Filters::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Build the request URL against a raw base URL.
    pub fn to_url(&self, base_url: &str) -> Result<String, ListError> {
        Ok(self.url_for(&BaseUrl::parse(base_url)?))
    }

    /// Build the request URL against a validated base URL.
    pub fn url_for(&self, base: &BaseUrl) -> String {
        let mut params = vec![
            (PARAM_PAGE_SIZE, self.page_size.to_string()),
            (PARAM_PAGE, self.page.to_string()),
        ];
        if !self.search.is_empty() {
            params.push((PARAM_SEARCH, self.search.clone()));
        }
        params.extend(self.filters.active().map(|(k, v)| (k, v.to_string())));

        base.with_params(params)
    }
}
