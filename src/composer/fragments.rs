//! Building blocks shared by the operation rules.
//!
//! Each operation describes its optional fragments as an ordered table of
//! [`Fragment`] rows and its short-circuit branches as a table of
//! [`Alternative`] rows. The composer evaluates the tables; the operation
//! modules only supply the tables and the index parameters.

use crate::template::Params;
use chrono::{DateTime, Utc};

/// Ellipsis appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Character budget for descriptions and summaries inside task lists.
pub const LIST_TEXT_BUDGET: usize = 100;

/// Character budget for pending-task descriptions in the plan prompt.
pub const PENDING_TEXT_BUDGET: usize = 150;

/// Character budget for the implementation guide in the verify prompt.
pub const GUIDE_SUMMARY_BUDGET: usize = 200;

/// Character budget for the analysis result in the verify prompt.
pub const ANALYSIS_SUMMARY_BUDGET: usize = 300;

/// An optional fragment filled into one slot of an index template.
///
/// `build` returns `None` when the input lacks the data the fragment needs;
/// the slot is then filled with the empty string and the fragment template
/// is never loaded.
pub(crate) struct Fragment<P> {
    /// Placeholder name in the index template.
    pub slot: &'static str,
    /// Fragment template name within the operation directory.
    pub template: &'static str,
    pub build: fn(&P) -> Option<Params>,
}

/// One branch of a set of mutually exclusive outcomes.
///
/// The first row whose `when` holds is rendered and returned as the whole
/// result; later rows are not evaluated.
pub(crate) struct Alternative<P> {
    pub template: &'static str,
    pub when: fn(&P) -> bool,
    pub params: fn(&P) -> Params,
}

/// Cut `text` to at most `budget` characters, marking the cut with `...`.
pub fn truncate(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Split `items` into the rendered head and the number left out.
pub fn capped<T>(items: &[T], cap: usize) -> (&[T], usize) {
    if items.len() > cap {
        (&items[..cap], items.len() - cap)
    } else {
        (items, 0)
    }
}

/// Human-readable timestamp used in every prompt.
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Like [`format_time`], but an unset timestamp renders as `""`.
pub fn format_optional_time(time: &Option<DateTime<Utc>>) -> String {
    time.as_ref().map(format_time).unwrap_or_default()
}
