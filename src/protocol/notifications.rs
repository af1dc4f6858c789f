//! Typed webview-bound notification payloads.
//!
//! Each payload type pairs a serialisable parameter struct with its wire
//! method literal via [`NotificationParams`]. Field names use the wire's
//! camelCase; absent optional fields are omitted entirely.

use serde::{Deserialize, Serialize};

use crate::protocol::message::NotificationMessage;
use crate::{AppError, Result};

/// Largest line/character value an editor range may carry.
pub const MAX_RANGE_VALUE: u32 = 2_147_483_647;

// ── Editor geometry ───────────────────────────────────────────────────────────

/// Zero-based position in a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Position {
    /// Zero-based line index.
    pub line: u32,
    /// Zero-based character offset within the line.
    pub character: u32,
}

/// A range between two positions in a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Range {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

/// A selection range with its active cursor.
///
/// The cursor must sit at the range end; [`EditorSelection::new`] enforces
/// the invariant and [`EditorSelection::at_end`] derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditorSelection {
    /// The selected range.
    #[serde(flatten)]
    pub range: Range,
    /// Active cursor position; always equals `range.end`.
    pub cursor: Position,
}

impl EditorSelection {
    /// Build a selection, verifying the cursor sits at the range end.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Protocol`] when `cursor` differs from `range.end`.
    pub fn new(range: Range, cursor: Position) -> Result<Self> {
        if cursor == range.end {
            Ok(Self { range, cursor })
        } else {
            Err(AppError::Protocol(
                "selection cursor must equal the range end".into(),
            ))
        }
    }

    /// Build a selection with the cursor derived from the range end.
    #[must_use]
    pub fn at_end(range: Range) -> Self {
        Self {
            range,
            cursor: range.end,
        }
    }
}

/// Classification of a codemark entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodemarkType {
    /// Inline discussion comment.
    Comment,
    /// Tracked issue.
    Issue,
    /// Bookmark anchor.
    Bookmark,
    /// Open question.
    Question,
    /// Code trap / watchpoint.
    Trap,
    /// Permalink to a source location.
    Link,
}

// ── Notification payloads ─────────────────────────────────────────────────────

/// Typed notification payload carrying its wire method literal.
pub trait NotificationParams: Serialize {
    /// Wire method name of this notification.
    const METHOD: &'static str;

    /// Build the wire envelope for this payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ipc`] when the payload fails to serialize.
    fn to_message(&self) -> Result<NotificationMessage> {
        let params = serde_json::to_value(self).map_err(|err| {
            AppError::Ipc(format!("failed to serialise notification params: {err}"))
        })?;
        Ok(NotificationMessage::new(Self::METHOD, Some(params)))
    }
}

/// Ask the webview to reveal an existing codemark.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowCodemark {
    /// Codemark to reveal.
    pub codemark_id: String,
    /// Source file the codemark is anchored to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

impl NotificationParams for ShowCodemark {
    const METHOD: &'static str = "webview/codemark/show";
}

/// Ask the webview to reveal an existing review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowReview {
    /// Review to reveal.
    pub review_id: String,
    /// Source file to focus, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

impl NotificationParams for ShowReview {
    const METHOD: &'static str = "webview/review/show";
}

/// Ask the webview to open a message stream, optionally at a thread or
/// codemark.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowStream {
    /// Stream to open.
    pub stream_id: String,
    /// Thread within the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Codemark within the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codemark_id: Option<String>,
}

impl NotificationParams for ShowStream {
    const METHOD: &'static str = "webview/stream/show";
}

/// Start composing a new codemark over the given range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCodemark {
    /// Document the codemark anchors to.
    pub uri: String,
    /// Anchored source range.
    pub range: Range,
    /// Kind of codemark to compose.
    #[serde(rename = "type")]
    pub codemark_type: CodemarkType,
    /// Originating surface (context menu, shortcut, …).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl NotificationParams for NewCodemark {
    const METHOD: &'static str = "webview/codemark/new";
}

/// Start composing a new review seeded from the given range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Document the review starts from.
    pub uri: String,
    /// Seed source range.
    pub range: Range,
    /// Originating surface (context menu, shortcut, …).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl NotificationParams for NewReview {
    const METHOD: &'static str = "webview/review/new";
}
