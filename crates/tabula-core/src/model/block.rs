use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::cell::{AttachmentCell, CellValue};

/// The column value kinds a block can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Date,
    Number,
    File,
    Report,
    Control,
}

impl BlockType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
            Self::File => "file",
            Self::Report => "report",
            Self::Control => "control",
        }
    }

    /// Attachment-shaped types store `{kind, file}` cells instead of scalars.
    #[must_use]
    pub const fn is_attachment(self) -> bool {
        matches!(self, Self::File | Self::Report)
    }

    /// The seed value a fresh cell of this type receives.
    #[must_use]
    pub fn default_cell(self) -> CellValue {
        match self {
            Self::File | Self::Report => CellValue::Attachment(AttachmentCell::none()),
            Self::Number => CellValue::Number(0.0),
            Self::Text | Self::Date | Self::Control => CellValue::Text(String::new()),
        }
    }
}

/// A column definition belonging to exactly one project.
///
/// Blocks absent from the project's workspace order are "sidebar" (inactive);
/// blocks present are rendered as table headers, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub color: String,
}

/// The user-supplied parts of a new block; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub label: String,
    pub block_type: BlockType,
    pub color: String,
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for BlockType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "text" => Ok(Self::Text),
            "date" => Ok(Self::Date),
            "number" => Ok(Self::Number),
            "file" => Ok(Self::File),
            "report" => Ok(Self::Report),
            "control" => Ok(Self::Control),
            _ => Err(ParseEnumError {
                expected: "block type",
                got: s.to_string(),
            }),
        }
    }
}
