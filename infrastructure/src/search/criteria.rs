//! Predicate evaluation for [`SearchRequest`].
//!
//! Each predicate is skipped when its request field is `None`. A present but
//! empty value list never matches, since no value in it can be satisfied.

use chrono::{DateTime, Utc};
use domain::{Document, SearchRequest};
use tracing::trace;

/// Checks whether `document` satisfies every active predicate of `request`.
pub fn matches(request: &SearchRequest, document: &Document) -> bool {
    let doc_id = document.id().map(|id| id.as_str()).unwrap_or_default();

    if let Some(prefixes) = &request.title_prefixes
        && !matches_title(prefixes, &document.title)
    {
        trace!(doc_id, "Title prefix filter not met, skipping doc.");
        return false;
    }
    if let Some(fragments) = &request.contains_contents
        && !matches_content(fragments, &document.content)
    {
        trace!(doc_id, "Content filter not met, skipping doc.");
        return false;
    }
    if let Some(author_ids) = &request.author_ids
        && !matches_author(author_ids, &document.author.id)
    {
        trace!(doc_id, "Author filter not met, skipping doc.");
        return false;
    }
    if let Some(from) = &request.created_from
        && !matches_created_from(from, &document.created)
    {
        trace!(doc_id, "Created before lower bound, skipping doc.");
        return false;
    }
    if let Some(to) = &request.created_to
        && !matches_created_to(to, &document.created)
    {
        trace!(doc_id, "Created after upper bound, skipping doc.");
        return false;
    }
    true
}

/// Case-sensitive literal prefix match against any of `prefixes`.
pub fn matches_title(prefixes: &[String], title: &str) -> bool {
    prefixes.iter().any(|prefix| title.starts_with(prefix.as_str()))
}

/// Case-sensitive literal containment of any of `fragments`.
pub fn matches_content(fragments: &[String], content: &str) -> bool {
    fragments
        .iter()
        .any(|fragment| content.contains(fragment.as_str()))
}

pub fn matches_author(author_ids: &[String], author_id: &str) -> bool {
    author_ids.iter().any(|id| id == author_id)
}

/// Inclusive: a document created exactly at `from` passes.
pub fn matches_created_from(from: &DateTime<Utc>, created: &DateTime<Utc>) -> bool {
    created >= from
}

/// Inclusive: a document created exactly at `to` passes.
pub fn matches_created_to(to: &DateTime<Utc>, created: &DateTime<Utc>) -> bool {
    created <= to
}
