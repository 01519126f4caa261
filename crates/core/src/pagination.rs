//! Paginated search aggregation
//!
//! Paged endpoints disagree on how they signal completion: some report a
//! total count, some a `hasMore` flag. Callers pass a closure that reads the
//! signal from each page; the loop here owns the termination rules.

use momentum_domain::{MomentumError, Result, SearchRequest};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::ports::BackendTransport;

/// Completion signal read from one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// Total number of matching items across all pages.
    Total(usize),
    /// Whether another page exists.
    HasMore(bool),
    /// The page carried no usable signal.
    Unknown,
}

/// Fixed properties of a paged endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedEndpoint<'a> {
    pub path: &'a str,
    /// Field holding the page's item list.
    pub items_field: &'a str,
    /// Hard ceiling on the number of page requests.
    pub max_pages: u32,
}

impl<'a> PagedEndpoint<'a> {
    pub const fn new(path: &'a str, max_pages: u32) -> Self {
        Self { path, items_field: "data", max_pages }
    }
}

/// Signal reader for endpoints that report a total count in `field`.
pub fn total_count(field: &'static str) -> impl Fn(&Value) -> PageSignal + Send + Sync {
    move |page| {
        page.get(field)
            .and_then(Value::as_u64)
            .map_or(PageSignal::Unknown, |total| {
                PageSignal::Total(usize::try_from(total).unwrap_or(usize::MAX))
            })
    }
}

/// Signal reader for endpoints that report a boolean continuation flag.
pub fn has_more(field: &'static str) -> impl Fn(&Value) -> PageSignal + Send + Sync {
    move |page| page.get(field).and_then(Value::as_bool).map_or(PageSignal::Unknown, PageSignal::HasMore)
}

/// Fetch pages until the desired count, the reported total, a `hasMore =
/// false` flag, an empty page or the page ceiling is reached.
///
/// `template.paging.page_number` is reset to 0 and advanced in place.
/// `desired = None` means everything. A 404 on the first page yields an
/// empty result; a 404 on a later page ends the loop with what was collected
/// instead of discarding the earlier pages.
#[instrument(skip(transport, template, signal), fields(path = %endpoint.path))]
pub async fn collect_pages<F>(
    transport: &dyn BackendTransport,
    endpoint: PagedEndpoint<'_>,
    template: &mut SearchRequest,
    desired: Option<usize>,
    signal: F,
) -> Result<Vec<Value>>
where
    F: Fn(&Value) -> PageSignal + Send + Sync,
{
    let page_size = template.paging.page_size;
    if page_size == 0 {
        return Err(MomentumError::InvalidInput("page size must be greater than zero".into()));
    }
    if endpoint.max_pages == 0 {
        return Err(MomentumError::InvalidInput("page ceiling must be greater than zero".into()));
    }

    let mut items: Vec<Value> = Vec::new();
    if desired == Some(0) {
        return Ok(items);
    }

    template.paging.page_number = 0;
    loop {
        let page_number = template.paging.page_number;
        let body = serde_json::to_value(&*template)?;
        let response = transport.post(endpoint.path, Some(&body)).await?;

        if response.is_not_found() {
            if page_number > 0 {
                warn!(page_number, accumulated = items.len(), "page not found, stopping early");
            } else {
                debug!("search endpoint returned 404, treating as no results");
            }
            break;
        }

        let mut page = response.into_required()?;
        let page_signal = signal(&page);
        let page_items = take_items(&mut page, endpoint.items_field)?;
        let page_len = page_items.len();
        items.extend(page_items);

        let target = match page_signal {
            PageSignal::Total(total) => Some(desired.map_or(total, |wanted| wanted.min(total))),
            PageSignal::HasMore(_) | PageSignal::Unknown => desired,
        };

        debug!(
            page_number,
            page_items = page_len,
            accumulated = items.len(),
            ?page_signal,
            "fetched search page"
        );

        let reached_target = target.is_some_and(|target| items.len() >= target);
        let exhausted = match page_signal {
            PageSignal::HasMore(more) => !more,
            PageSignal::Unknown => page_len < page_size as usize,
            PageSignal::Total(_) => false,
        };
        if reached_target || exhausted || page_len == 0 {
            break;
        }

        if page_number + 1 >= endpoint.max_pages {
            warn!(
                max_pages = endpoint.max_pages,
                accumulated = items.len(),
                "page ceiling reached before the backend signalled completion"
            );
            break;
        }
        template.paging.page_number = page_number + 1;
    }

    if let Some(wanted) = desired {
        items.truncate(wanted);
    }
    Ok(items)
}

fn take_items(page: &mut Value, field: &str) -> Result<Vec<Value>> {
    match page.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(MomentumError::Parse(format!(
            "expected `{field}` to be a list, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn total_count_reads_named_field() {
        let read = total_count("totalSearchCount");
        assert_eq!(read(&json!({"totalSearchCount": 7})), PageSignal::Total(7));
        assert_eq!(read(&json!({"totalCount": 7})), PageSignal::Unknown);
    }

    #[test]
    fn has_more_reads_flag() {
        let read = has_more("hasMore");
        assert_eq!(read(&json!({"hasMore": false})), PageSignal::HasMore(false));
        assert_eq!(read(&json!({"hasMore": "no"})), PageSignal::Unknown);
    }

    #[test]
    fn items_field_must_be_a_list() {
        assert!(take_items(&mut json!({"data": {}}), "data").is_err());
        assert!(take_items(&mut json!({}), "data").unwrap().is_empty());
        assert_eq!(take_items(&mut json!({"data": [1]}), "data").unwrap(), vec![json!(1)]);
    }
}
