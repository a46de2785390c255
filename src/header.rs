//! # Header Module
//!
//! This module is the header composer: it renders the managed comment header
//! for a given comment style and locates an existing header region in file
//! content.
//!
//! The managed region is bounded by the literal marker tokens
//! [`HEADER_START_MARKER`] and [`HEADER_END_MARKER`]. Detection is a small
//! line scanner (start marker, then end marker, then the closing fence for
//! block styles) rather than a single regex, so nested comment delimiters
//! inside the file cannot confuse it. Only the first occurrence in a file is
//! ever recognized.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::config::CommentStyle;

/// Literal token opening the managed header region.
pub const HEADER_START_MARKER: &str = "@auto-header-start";

/// Literal token closing the managed header region.
pub const HEADER_END_MARKER: &str = "@auto-header-end";

/// Error type for header composition.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// A date value could not be parsed; rendering refuses to emit garbage
  /// in place of a timestamp.
  #[error("Invalid date value '{value}': {source}")]
  InvalidDate { value: String, source: chrono::ParseError },
}

/// The field values rendered into a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
  /// Author name for the `Author:` field.
  pub author: String,
  /// Author email, rendered as `<email>` after the name.
  pub email: String,
  /// Creation timestamp (stable across runs once recorded).
  pub created: DateTime<Utc>,
  /// Last-modified timestamp (bumped on every run).
  pub modified: DateTime<Utc>,
}

/// Byte range of a located header within file content.
///
/// `end` is exclusive and includes the header's single trailing newline when
/// one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
  pub start: usize,
  pub end: usize,
}

/// Format a timestamp the way headers store it: RFC 3339 in UTC with
/// millisecond precision and a `Z` suffix (e.g. `2026-08-29T10:15:00.000Z`).
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
  timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp from header text or user input into UTC.
///
/// Accepts RFC 3339 (any offset), a naive `YYYY-MM-DDTHH:MM:SS` datetime
/// (assumed UTC), or a bare `YYYY-MM-DD` date (midnight UTC).
///
/// # Errors
///
/// Returns [`HeaderError::InvalidDate`] when the value matches none of the
/// accepted forms.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, HeaderError> {
  let trimmed = value.trim();

  match DateTime::parse_from_rfc3339(trimmed) {
    Ok(parsed) => return Ok(parsed.with_timezone(&Utc)),
    Err(rfc3339_err) => {
      if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
      }
      if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
      }

      Err(HeaderError::InvalidDate {
        value: trimmed.to_string(),
        source: rfc3339_err,
      })
    }
  }
}

/// Render the header block for the given comment style.
///
/// The result has no trailing newline; the updater joins it to the file body
/// with a blank-line separator.
///
/// For a block style:
///
/// ```text
/// /*
///  * @auto-header-start
///  * Author:         Ada Lovelace <ada@example.com>
///  * Created:        2026-08-29T10:15:00.000Z
///  * Last Modified:  2026-08-29T10:15:00.000Z
///  * @auto-header-end
///  */
/// ```
///
/// For a line style every line carries the line prefix instead of a fence.
pub fn render_header(style: &CommentStyle, fields: &HeaderFields) -> String {
  let created = format_timestamp(fields.created);
  let modified = format_timestamp(fields.modified);
  let author_line = format!("Author:         {} <{}>", fields.author, fields.email);
  let created_line = format!("Created:        {created}");
  let modified_line = format!("Last Modified:  {modified}");

  match style {
    CommentStyle::Block { start, end, line } => [
      start.clone(),
      format!("{line} {HEADER_START_MARKER}"),
      format!("{line} {author_line}"),
      format!("{line} {created_line}"),
      format!("{line} {modified_line}"),
      format!("{line} {HEADER_END_MARKER}"),
      end.clone(),
    ]
    .join("\n"),
    CommentStyle::Line { start } => [
      format!("{start} {HEADER_START_MARKER}"),
      format!("{start} {author_line}"),
      format!("{start} {created_line}"),
      format!("{start} {modified_line}"),
      format!("{start} {HEADER_END_MARKER}"),
    ]
    .join("\n"),
  }
}

/// Locate the first managed header region in `content`.
///
/// Line styles span from the line holding the start marker through the line
/// holding the end marker. Block styles additionally extend backwards to the
/// opening fence line (when the line directly above the start marker is one)
/// and forwards to the closing fence line. Returns `None` when either marker
/// is missing, or when a block style's closing fence never appears after the
/// end marker.
pub fn locate_header(style: &CommentStyle, content: &str) -> Option<HeaderSpan> {
  let lines = collect_lines(content);

  let marker_prefix = match style {
    CommentStyle::Block { line, .. } => line.trim(),
    CommentStyle::Line { start } => start.trim(),
  };

  let start_idx = lines.iter().position(|l| {
    let trimmed = l.text.trim_start();
    trimmed.starts_with(marker_prefix) && trimmed.contains(HEADER_START_MARKER)
  })?;

  let end_idx = lines[start_idx..].iter().position(|l| {
    let trimmed = l.text.trim_start();
    trimmed.starts_with(marker_prefix) && trimmed.contains(HEADER_END_MARKER)
  })? + start_idx;

  match style {
    CommentStyle::Line { .. } => Some(HeaderSpan {
      start: lines[start_idx].start,
      end: lines[end_idx].end,
    }),
    CommentStyle::Block { start, end, .. } => {
      // Extend back to the opening fence if it sits directly above the
      // start marker.
      let span_start = if start_idx > 0 && lines[start_idx - 1].text.trim() == start.trim() {
        lines[start_idx - 1].start
      } else {
        lines[start_idx].start
      };

      let fence = end.trim();
      let close_idx = lines[end_idx..]
        .iter()
        .position(|l| l.text.trim_end().ends_with(fence))?
        + end_idx;

      Some(HeaderSpan {
        start: span_start,
        end: lines[close_idx].end,
      })
    }
  }
}

/// Extract a parsable `Created:` timestamp from header text.
///
/// Absence and unparsable values are both normal outcomes (`None`), which
/// sends the caller down the git-history fallback chain. Never errors.
pub fn extract_created_date(header_text: &str) -> Option<DateTime<Utc>> {
  static CREATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Created:\s*(\S[^\r\n]*)").expect("created regex must compile"));

  let captures = CREATED_RE.captures(header_text)?;
  parse_timestamp(&captures[1]).ok()
}

struct Line<'a> {
  /// Byte offset of the line start within the content.
  start: usize,
  /// Byte offset one past the line's newline (or past the final byte).
  end: usize,
  text: &'a str,
}

fn collect_lines(content: &str) -> Vec<Line<'_>> {
  let mut lines = Vec::new();
  let mut offset = 0;

  for raw in content.split_inclusive('\n') {
    lines.push(Line {
      start: offset,
      end: offset + raw.len(),
      text: raw.trim_end_matches(['\n', '\r']),
    });
    offset += raw.len();
  }

  lines
}
