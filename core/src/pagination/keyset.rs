//! Fetch-`L+1`-and-truncate paging over the `(created_at, id)` order

use async_trait::async_trait;
use dt_shared::{CursorPage, PageQuery, PaginationConfig};

use super::cursor::Cursor;
use crate::errors::{DomainError, PaginationError};

/// Rows that can be placed in the keyset order
pub trait Keyed {
    /// Position of this row, used to build the next page's cursor
    fn keyset_cursor(&self) -> Cursor;
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: usize,
    after: Option<Cursor>,
}

impl PageRequest {
    /// Request `limit` rows strictly after `after`
    ///
    /// A zero limit is raised to one so that the next cursor can always be
    /// built from the last returned row.
    pub fn new(limit: usize, after: Option<Cursor>) -> Self {
        Self {
            limit: limit.max(1),
            after,
        }
    }

    /// First page of `limit` rows
    pub fn first(limit: usize) -> Self {
        Self::new(limit, None)
    }

    /// Clamp the query's limit and decode its cursor
    ///
    /// An empty `cursor` parameter is the same as no cursor.
    pub fn from_query(query: &PageQuery, config: &PaginationConfig) -> Result<Self, PaginationError> {
        let after = query.cursor().map(Cursor::decode).transpose()?;
        Ok(Self::new(query.effective_limit(config) as usize, after))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn after(&self) -> Option<&Cursor> {
        self.after.as_ref()
    }

    /// Rows to fetch from storage: one more than the page size
    pub fn fetch_size(&self) -> usize {
        self.limit + 1
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }

    /// Wire form with the cursor encoded
    pub fn into_cursor_page(self) -> CursorPage<T> {
        let next_cursor = self.next_cursor.map(|c| c.encode());
        CursorPage::new(self.items, next_cursor)
    }
}

/// Truncate up to `limit + 1` ordered rows into a page
///
/// If more than `limit` rows are given, the page holds the first `limit` and
/// the next cursor points at the last of them.
pub fn paginate<T: Keyed>(mut rows: Vec<T>, limit: usize) -> Page<T> {
    let limit = limit.max(1);
    if rows.len() > limit {
        rows.truncate(limit);
        let next_cursor = rows.last().map(Keyed::keyset_cursor);
        Page {
            items: rows,
            next_cursor,
        }
    } else {
        Page {
            items: rows,
            next_cursor: None,
        }
    }
}

/// Keyset selection over rows held in memory
///
/// Sorts by `(created_at, id)`, keeps rows strictly after `after` and returns
/// at most `fetch` of them.
pub fn select_after<T: Keyed + Clone>(rows: &[T], after: Option<&Cursor>, fetch: usize) -> Vec<T> {
    let mut keyed: Vec<(Cursor, &T)> = rows
        .iter()
        .map(|row| (row.keyset_cursor(), row))
        .filter(|(key, _)| after.map_or(true, |after| key > after))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed
        .into_iter()
        .take(fetch)
        .map(|(_, row)| row.clone())
        .collect()
}

/// A collection that can be listed page by page
///
/// Implementors only provide the storage query; [`KeysetPaginator::page`]
/// applies the truncation rule.
#[async_trait]
pub trait KeysetPaginator: Send + Sync {
    type Item: Keyed + Send;
    type Scope: Send + Sync;

    /// Up to `fetch` rows of `scope` strictly after `after`, in keyset order
    async fn fetch_after(
        &self,
        scope: &Self::Scope,
        after: Option<&Cursor>,
        fetch: usize,
    ) -> Result<Vec<Self::Item>, DomainError>;

    async fn page(
        &self,
        scope: &Self::Scope,
        request: &PageRequest,
    ) -> Result<Page<Self::Item>, DomainError> {
        let rows = self
            .fetch_after(scope, request.after(), request.fetch_size())
            .await?;
        Ok(paginate(rows, request.limit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Uuid,
        created_at: DateTime<Utc>,
    }

    impl Keyed for Row {
        fn keyset_cursor(&self) -> Cursor {
            Cursor::new(self.id, self.created_at)
        }
    }

    struct VecSource(Vec<Row>);

    #[async_trait]
    impl KeysetPaginator for VecSource {
        type Item = Row;
        type Scope = ();

        async fn fetch_after(
            &self,
            _scope: &(),
            after: Option<&Cursor>,
            fetch: usize,
        ) -> Result<Vec<Row>, DomainError> {
            Ok(select_after(&self.0, after, fetch))
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Five rows at distinct, increasing times
    fn five_rows() -> Vec<Row> {
        (0..5)
            .map(|i| Row {
                id: Uuid::from_u128(100 - i as u128),
                created_at: base_time() + Duration::seconds(i),
            })
            .collect()
    }

    async fn sweep(source: &VecSource, limit: usize) -> Vec<Page<Row>> {
        let mut pages = Vec::new();
        let mut request = PageRequest::first(limit);
        loop {
            let page = source.page(&(), &request).await.unwrap();
            let next = page.next_cursor;
            pages.push(page);
            match next {
                Some(cursor) => request = PageRequest::new(limit, Some(cursor)),
                None => break,
            }
        }
        pages
    }

    #[tokio::test]
    async fn test_five_rows_with_limit_two() {
        let rows = five_rows();
        let source = VecSource(rows.clone());

        let pages = sweep(&source, 2).await;

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].items, rows[0..2].to_vec());
        assert_eq!(pages[0].next_cursor, Some(rows[1].keyset_cursor()));
        assert_eq!(pages[1].items, rows[2..4].to_vec());
        assert_eq!(pages[1].next_cursor, Some(rows[3].keyset_cursor()));
        assert_eq!(pages[2].items, rows[4..5].to_vec());
        assert_eq!(pages[2].next_cursor, None);
    }

    #[tokio::test]
    async fn test_sweep_is_complete_with_timestamp_ties() {
        // Three rows share each timestamp, ids shuffled relative to insertion
        let mut rows = Vec::new();
        for i in 0..12u128 {
            rows.push(Row {
                id: Uuid::from_u128((i * 7) % 12 + 1),
                created_at: base_time() + Duration::seconds((i / 3) as i64),
            });
        }
        let source = VecSource(rows.clone());

        for limit in 1..=5 {
            let seen: Vec<Row> = sweep(&source, limit)
                .await
                .into_iter()
                .flat_map(|page| page.items)
                .collect();

            let mut expected = rows.clone();
            expected.sort_by_key(|r| r.keyset_cursor());
            assert_eq!(seen, expected, "limit {}", limit);
        }
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_cursor() {
        let rows = five_rows()[..4].to_vec();
        let source = VecSource(rows);

        let pages = sweep(&source, 2).await;

        assert_eq!(pages.len(), 2);
        assert!(pages[0].has_more());
        assert!(!pages[1].has_more());
        assert_eq!(pages[1].items.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let source = VecSource(Vec::new());
        let page = source.page(&(), &PageRequest::first(2)).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_request_from_query() {
        let config = PaginationConfig::default();

        let request = PageRequest::from_query(&PageQuery::default(), &config).unwrap();
        assert_eq!(request.limit(), 2);
        assert_eq!(request.fetch_size(), 3);
        assert!(request.after().is_none());

        let cursor = Cursor::new(Uuid::new_v4(), Utc::now());
        let query = PageQuery {
            limit: Some(50),
            cursor: Some(cursor.encode()),
        };
        let request = PageRequest::from_query(&query, &config).unwrap();
        assert_eq!(request.limit(), 10);
        assert_eq!(request.after(), Some(&cursor));

        let query = PageQuery {
            limit: Some(-1),
            cursor: Some(String::new()),
        };
        let request = PageRequest::from_query(&query, &config).unwrap();
        assert_eq!(request.limit(), 2);
        assert!(request.after().is_none());
    }

    #[test]
    fn test_request_rejects_bad_cursor() {
        let query = PageQuery {
            limit: None,
            cursor: Some("garbage!".to_string()),
        };

        let result = PageRequest::from_query(&query, &PaginationConfig::default());
        assert!(matches!(result, Err(PaginationError::InvalidCursor { .. })));
    }

    #[test]
    fn test_into_cursor_page() {
        let rows = five_rows();
        let page = paginate(rows[..3].to_vec(), 2);
        let expected = rows[1].keyset_cursor().encode();

        let wire = page.map(|row| row.id).into_cursor_page();

        assert_eq!(wire.data.len(), 2);
        assert!(wire.has_more);
        assert_eq!(wire.next_cursor.as_deref(), Some(expected.as_str()));
    }
}
