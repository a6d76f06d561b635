//! Message content: the typed payload carried by every message.
//!
//! Content is a closed set of variants. Rendering to a display string is total:
//! variants without a textual form render a fixed fallback instead of failing,
//! so a display layer never has to special-case new media types.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

// ─── Media sub-types ─────────────────────────────────────────────────────────

/// An image attachment. Only metadata lives in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageValue {
  pub file_name:  String,
  pub media_type: String,
}

/// An arbitrary file attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValue {
  pub file_name:  String,
  pub media_type: String,
  pub size_bytes: u64,
}

/// A recorded voice note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceValue {
  pub duration_secs: u32,
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// The payload of a message. Exactly one variant per message.
///
/// The variant name doubles as the `kind` reported by [`Content::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Content {
  Text(String),
  Image(ImageValue),
  File(FileValue),
  Voice(VoiceValue),
}

impl Content {
  /// Convenience constructor for plain text.
  pub fn text(text: impl Into<String>) -> Self { Self::Text(text.into()) }

  /// The variant name, e.g. `"Text"` or `"Image"`.
  pub fn kind(&self) -> &'static str { self.into() }

  /// The searchable text of this content, if it has any.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      Self::Text(text) => Some(text),
      Self::Image(_) | Self::File(_) | Self::Voice(_) => None,
    }
  }

  /// Render for display. Never fails.
  pub fn render(&self) -> Cow<'_, str> {
    match self {
      Self::Text(text) => Cow::Borrowed(text),
      Self::Image(_) | Self::File(_) | Self::Voice(_) => Cow::Owned(format!(
        "No implementation for {} to print it",
        self.kind()
      )),
    }
  }
}

impl fmt::Display for Content {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render())
  }
}
