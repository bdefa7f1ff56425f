//! The walk loop

use super::types::{Page, WalkStrategy};
use crate::error::{Error, Result};
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use tracing::debug;

/// Lazy stream of walked items
pub type WalkStream<T> = BoxStream<'static, Result<T>>;

/// Transient state between two page requests
struct WalkState<S: WalkStrategy> {
    strategy: S,
    /// Cursor for the next request; `None` once the walk is over
    current: Option<S::Cursor>,
    pages: u64,
}

/// Walk a paginated collection starting at `start`
///
/// Pages are requested one at a time, only as the consumer pulls. An error
/// from `fetch_page` is yielded once and ends the stream. Dropping the
/// stream stops further requests.
pub fn walk<S>(strategy: S, start: S::Cursor) -> WalkStream<S::Item>
where
    S: WalkStrategy + 'static,
    S::Cursor: 'static,
    S::Item: 'static,
{
    let state = WalkState {
        strategy,
        current: Some(start),
        pages: 0,
    };

    stream::try_unfold(state, next_page)
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<S::Item, Error>)))
        .try_flatten()
        .boxed()
}

async fn next_page<S: WalkStrategy>(
    mut state: WalkState<S>,
) -> Result<Option<(Vec<S::Item>, WalkState<S>)>> {
    let Some(current) = state.current.take() else {
        return Ok(None);
    };

    let page = state.strategy.fetch_page(&current).await?;
    state.pages += 1;

    if page.is_empty() {
        debug!(cursor = ?current, pages = state.pages, "Walk ended on empty page");
        return Ok(None);
    }

    debug!(
        cursor = ?current,
        items = page.items.len(),
        "Fetched page"
    );

    state.current = advance(&state.strategy, &current, &page);
    Ok(Some((page.items, state)))
}

/// Next cursor to request, or `None` when the walk should end after this page
fn advance<S: WalkStrategy>(
    strategy: &S,
    previous: &S::Cursor,
    page: &Page<S::Item>,
) -> Option<S::Cursor> {
    let Some(next) = strategy.next_cursor(page) else {
        debug!(cursor = ?previous, "Walk ended, no next cursor");
        return None;
    };

    if next == *previous {
        debug!(cursor = ?previous, "Walk ended, cursor did not advance");
        return None;
    }

    if !strategy.should_continue(page) {
        debug!(cursor = ?previous, "Walk ended at collection boundary");
        return None;
    }

    Some(next)
}
