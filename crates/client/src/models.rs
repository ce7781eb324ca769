//! Response payload types.
//!
//! Records (orders, instances, agreements, tickets) are passed through as
//! opaque JSON; only the pagination envelope is typed.

use serde::{Deserialize, Serialize};

/// An opaque collection record.
pub type Record = serde_json::Value;

/// Paginated collection envelope returned by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T = Record> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages needed to show `count` rows at `page_size` rows per page.
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.count, page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Ceiling division of `count` by `page_size`; 0 when `page_size` is 0.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_deserializes_envelope() {
        let page: Page = serde_json::from_value(json!({
            "count": 12,
            "next": "http://localhost/api/orders/?page=2",
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();

        assert_eq!(page.count, 12);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.total_pages(10), 2);
    }

    #[test]
    fn test_page_tolerates_missing_fields() {
        let page: Page = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.is_empty());
        assert_eq!(page.total_pages(10), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(11, 0), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_total_pages_covers_every_row(count in 0u64..1_000_000, page_size in 1u32..=500) {
            let pages = u64::from(total_pages(count, page_size));
            let size = u64::from(page_size);
            proptest::prop_assert!(pages * size >= count);
            if count > 0 {
                proptest::prop_assert!((pages - 1) * size < count);
            } else {
                proptest::prop_assert_eq!(pages, 0);
            }
        }
    }
}
