//! Keyset pagination shared by every list operation
//!
//! Rows are totally ordered by `(created_at ASC, id ASC)`. A page is produced
//! by fetching `limit + 1` rows strictly after the cursor and truncating; the
//! extra row only signals that another page exists.

mod cursor;
mod keyset;

pub use cursor::{Cursor, CursorCodec};
pub use keyset::{paginate, select_after, Keyed, KeysetPaginator, Page, PageRequest};
