//! Markdown rendering of issue listings and comment threads.

use std::fmt::Write;

use super::locator::RepositoryLocator;
use super::models::{IssueComment, UnifiedIssueRecord};

/// Renders an issue listing as readable Markdown.
#[must_use]
pub fn issue_listing_markdown(
    locator: &RepositoryLocator,
    records: &[UnifiedIssueRecord],
) -> String {
    let mut output = format!(
        "# Issues for {owner}/{name}\n\n",
        owner = locator.owner().as_str(),
        name = locator.repository().as_str()
    );
    for record in records {
        let _ignored = write!(
            output,
            "## Issue {number}: {title}\n{body}\n\n",
            number = record.number,
            title = record.title,
            body = record.body
        );
    }
    output
}

/// Renders a resource's comment thread as readable Markdown, starting with
/// the original body.
#[must_use]
pub fn comment_thread_markdown(
    number: u64,
    original_body: &str,
    comments: &[IssueComment],
) -> String {
    let mut output = format!("# Comments on issue {number}\n\n## Issue Body\n{original_body}\n\n");
    for comment in comments {
        let author = comment.author.as_deref().unwrap_or("unknown");
        let timestamp = comment.created_at.as_deref().unwrap_or("an unknown time");
        let _ignored = write!(
            output,
            "## {author} at {timestamp} says:\n{body}\n\n",
            body = comment.body
        );
    }
    output
}
