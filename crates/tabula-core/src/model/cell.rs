use serde::{Deserialize, Serialize};

use super::block::BlockType;

/// Whether an attachment slot holds a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[default]
    None,
    Present,
}

/// A file handle as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub url: String,
}

/// An attachment cell: `{kind, file}`, with the two fields kept in step by
/// the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttachmentCell {
    pub kind: AttachmentKind,
    #[serde(default)]
    pub file: Option<FileRef>,
}

impl AttachmentCell {
    /// The empty slot: `{kind: none, file: null}`.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: AttachmentKind::None,
            file: None,
        }
    }

    /// A filled slot.
    #[must_use]
    pub const fn present(file: FileRef) -> Self {
        Self {
            kind: AttachmentKind::Present,
            file: Some(file),
        }
    }

    /// Returns `true` if no file is attached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}

/// A row's value for one block, shaped by that block's declared type.
///
/// Scalar columns (`text`, `date`, `control`) hold plain strings; `number`
/// columns hold floats; `file`/`report` columns hold attachment slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Attachment(AttachmentCell),
}

impl CellValue {
    /// Whether this value has the shape `block_type` requires.
    #[must_use]
    pub const fn matches(&self, block_type: BlockType) -> bool {
        match self {
            Self::Text(_) => matches!(
                block_type,
                BlockType::Text | BlockType::Date | BlockType::Control
            ),
            Self::Number(_) => matches!(block_type, BlockType::Number),
            Self::Attachment(_) => block_type.is_attachment(),
        }
    }

    /// Returns the scalar text, if this is a text-shaped cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the attachment slot, if this is an attachment cell.
    #[must_use]
    pub const fn as_attachment(&self) -> Option<&AttachmentCell> {
        match self {
            Self::Attachment(a) => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttachmentCell, AttachmentKind, CellValue, FileRef};
    use crate::model::block::BlockType;

    #[test]
    fn empty_attachment_serializes_like_the_wire() {
        let cell = AttachmentCell::none();
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "none", "file": null}));
    }

    #[test]
    fn present_keeps_kind_and_file_in_step() {
        let cell = AttachmentCell::present(FileRef {
            name: "report.pdf".to_string(),
            url: "/files/report.pdf".to_string(),
        });
        assert_eq!(cell.kind, AttachmentKind::Present);
        assert!(!cell.is_empty());
    }

    #[test]
    fn value_shape_matching() {
        assert!(CellValue::Text("x".to_string()).matches(BlockType::Text));
        assert!(CellValue::Text(String::new()).matches(BlockType::Date));
        assert!(CellValue::Text(String::new()).matches(BlockType::Control));
        assert!(!CellValue::Text(String::new()).matches(BlockType::File));

        assert!(CellValue::Number(3.0).matches(BlockType::Number));
        assert!(!CellValue::Number(3.0).matches(BlockType::Text));

        let attachment = CellValue::Attachment(AttachmentCell::none());
        assert!(attachment.matches(BlockType::File));
        assert!(attachment.matches(BlockType::Report));
        assert!(!attachment.matches(BlockType::Date));
    }

    #[test]
    fn untagged_serialization_shapes() {
        assert_eq!(
            serde_json::to_value(CellValue::Text("hi".to_string())).unwrap(),
            serde_json::json!("hi")
        );
        assert_eq!(
            serde_json::to_value(CellValue::Number(2.5)).unwrap(),
            serde_json::json!(2.5)
        );
        assert_eq!(
            serde_json::to_value(CellValue::Attachment(AttachmentCell::none())).unwrap(),
            serde_json::json!({"kind": "none", "file": null})
        );
    }
}
