//! List query state and the generic controller driving one paginated
//! remote collection.
//!
//! The controller refetches explicitly: every tracked-field setter mutates
//! the query and then awaits `refresh()`. In-flight requests are not
//! de-duplicated or cancelled; the later-arriving response wins.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// Mutable search/sort/page parameters for one resource. The page number is
/// 1-indexed for display and deliberately unclamped: out-of-range values
/// (including 0 and negatives) pass through to the backend, which rejects
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search_term: String,
    pub page: i64,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_dir: SortDir,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: 1,
            page_size: 10,
            sort_by: "id".to_string(),
            sort_dir: SortDir::Asc,
        }
    }
}

impl ListQuery {
    /// A new search invalidates the previous page position.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Selecting the already-active field while ascending toggles to
    /// descending; anything else sorts the chosen field ascending. Either
    /// way the page resets.
    pub fn set_sort_field(&mut self, field: &str) {
        if self.sort_by == field && self.sort_dir == SortDir::Asc {
            self.sort_dir = SortDir::Desc;
        } else {
            self.sort_by = field.to_string();
            self.sort_dir = SortDir::Asc;
        }
        self.page = 1;
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size;
        self.page = 1;
    }

    /// Sets the page directly without touching any other field. Bounds are
    /// the caller's responsibility.
    pub fn set_page(&mut self, page: i64) {
        self.page = page;
    }

    /// Query parameters in the backend's wire contract; the backend pages
    /// are 0-indexed so the displayed page is sent minus one.
    pub fn wire_params(&self) -> [(&'static str, String); 5] {
        [
            ("page", (self.page - 1).to_string()),
            ("size", self.page_size.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("sortDir", self.sort_dir.as_str().to_string()),
            ("searchTerm", self.search_term.clone()),
        ]
    }
}

/// One server response to a list query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
}

/// Binds a [`ListController`] to one remote collection.
pub trait PageFetcher {
    type Item;

    fn fetch_page(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Page<Self::Item>, ApiError>> + Send;
}

/// Owns one resource's query state, the current page of items and the last
/// fetch error. A failed refresh keeps the previously fetched items so the
/// display degrades instead of clearing.
pub struct ListController<F: PageFetcher> {
    fetcher: F,
    query: ListQuery,
    items: Vec<F::Item>,
    total_pages: u32,
    error: Option<String>,
}

impl<F: PageFetcher> ListController<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            query: ListQuery::default(),
            items: Vec::new(),
            total_pages: 0,
            error: None,
        }
    }

    /// Constructs the controller and performs the initial fetch.
    pub async fn mount(fetcher: F) -> Self {
        let mut controller = Self::new(fetcher);
        controller.refresh().await;
        controller
    }

    pub async fn refresh(&mut self) {
        match self.fetcher.fetch_page(&self.query).await {
            Ok(page) => {
                self.items = page.content;
                self.total_pages = page.total_pages;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("failed to load: {e}"));
            }
        }
    }

    pub async fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.set_search_term(term);
        self.refresh().await;
    }

    pub async fn set_sort_field(&mut self, field: &str) {
        self.query.set_sort_field(field);
        self.refresh().await;
    }

    pub async fn set_page_size(&mut self, size: u32) {
        self.query.set_page_size(size);
        self.refresh().await;
    }

    pub async fn set_page(&mut self, page: i64) {
        self.query.set_page(page);
        self.refresh().await;
    }

    pub fn items(&self) -> &[F::Item] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[test]
    fn setters_reset_page_except_set_page() {
        let mut query = ListQuery::default();
        query.set_page(4);
        assert_eq!(query.page, 4);
        assert_eq!(query.search_term, "", "set_page touches nothing else");
        assert_eq!(query.page_size, 10);

        query.set_search_term("box");
        assert_eq!(query.page, 1);

        query.set_page(3);
        query.set_page_size(20);
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.set_sort_field("username");
        assert_eq!(query.page, 1);
    }

    #[test]
    fn sort_toggles_on_repeat_and_resets_on_switch() {
        let mut query = ListQuery::default();
        query.set_sort_field("email");
        assert_eq!(query.sort_by, "email");
        assert_eq!(query.sort_dir, SortDir::Asc);

        query.set_sort_field("email");
        assert_eq!(query.sort_dir, SortDir::Desc);

        query.set_sort_field("email");
        assert_eq!(query.sort_dir, SortDir::Asc);

        query.set_sort_field("email");
        query.set_sort_field("role");
        assert_eq!(query.sort_by, "role");
        assert_eq!(query.sort_dir, SortDir::Asc, "new field always ascends");
    }

    #[test]
    fn wire_params_shift_to_zero_indexed_pages() {
        let mut query = ListQuery::default();
        assert_eq!(query.wire_params()[0], ("page", "0".to_string()));

        // Unclamped: page 0 goes out as -1 for the backend to reject.
        query.set_page(0);
        assert_eq!(query.wire_params()[0], ("page", "-1".to_string()));
    }

    /// Programmable fetcher: records every query it sees and can be told
    /// to fail.
    struct StubFetcher {
        fail: AtomicBool,
        calls: Mutex<Vec<ListQuery>>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                fail: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for &StubFetcher {
        type Item = u32;

        async fn fetch_page(&self, query: &ListQuery) -> Result<Page<u32>, ApiError> {
            self.calls.lock().unwrap().push(query.clone());
            if self.fail.load(Ordering::Relaxed) {
                return Err(ApiError::Validation("backend down".to_string()));
            }
            Ok(Page {
                content: vec![1, 2, 3],
                total_pages: 2,
            })
        }
    }

    #[tokio::test]
    async fn every_setter_triggers_a_fetch() {
        let fetcher = StubFetcher::new();
        let mut controller = ListController::mount(&fetcher).await;
        controller.set_search_term("box").await;
        controller.set_sort_field("status").await;
        controller.set_page_size(5).await;
        controller.set_page(2).await;

        let calls = fetcher.calls.lock().unwrap();
        assert_eq!(calls.len(), 5, "mount plus four setters");
        assert_eq!(calls[1].search_term, "box");
        assert_eq!(calls[4].page, 2);
        drop(calls);
        assert_eq!(controller.items(), &[1, 2, 3]);
        assert_eq!(controller.total_pages(), 2);
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_items_and_sets_error() {
        let fetcher = StubFetcher::new();
        let mut controller = ListController::mount(&fetcher).await;
        assert_eq!(controller.items().len(), 3);

        fetcher.fail.store(true, Ordering::Relaxed);
        controller.set_search_term("x").await;

        assert_eq!(controller.items(), &[1, 2, 3], "prior page still shown");
        let error = controller.error().expect("error recorded");
        assert!(!error.is_empty());

        // Recovery clears the error.
        fetcher.fail.store(false, Ordering::Relaxed);
        controller.refresh().await;
        assert!(controller.error().is_none());
    }
}
