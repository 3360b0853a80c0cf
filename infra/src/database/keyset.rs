//! Keyset pagination over `(created_at, id)` in SQL
//!
//! `id` columns hold lowercase hyphenated UUIDs under a binary collation, so
//! their string order matches the byte order used by [`Cursor`].

use dt_core::pagination::Cursor;
use sqlx::{MySql, QueryBuilder};

/// Append the keyset predicate, ordering and `LIMIT` to a query whose
/// `WHERE` clause has already been started
///
/// Produces `AND (created_at, id) > (?, ?)` when a cursor is given, then
/// `ORDER BY created_at ASC, id ASC LIMIT ?`.
pub fn push_keyset_page(builder: &mut QueryBuilder<'_, MySql>, after: Option<&Cursor>, fetch: usize) {
    if let Some(cursor) = after {
        builder
            .push(" AND (created_at, id) > (")
            .push_bind(cursor.created_at)
            .push(", ")
            .push_bind(cursor.id.hyphenated().to_string())
            .push(")");
    }

    builder
        .push(" ORDER BY created_at ASC, id ASC LIMIT ")
        .push_bind(fetch as u64);
}
