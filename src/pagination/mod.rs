//! Pagination module
//!
//! Walks a cursor-paginated collection as a lazy stream of items.
//!
//! # Overview
//!
//! A `WalkStrategy` knows how to fetch one page for a cursor, which cursor
//! comes next, and whether the page is the last one in its direction. The
//! walker itself is direction-agnostic: it requests pages one after another
//! and yields their items in server order until one of
//!
//! - the page is empty,
//! - the next cursor equals the one just used (stall guard),
//! - the strategy says the page touches the end of the collection.
//!
//! The last item of a page is the next cursor, so the boundary item may be
//! yielded twice when the server includes it in the following page. The
//! walker does not de-duplicate.

mod strategies;
mod types;
mod walker;

pub use strategies::{NewerItems, OlderItems};
pub use types::{Page, WalkStrategy};
pub use walker::{walk, WalkStream};

#[cfg(test)]
mod tests;
