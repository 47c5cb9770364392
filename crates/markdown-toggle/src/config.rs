//! Markdown field options.
//!
//! Options are supplied as camelCase JSON, e.g.
//!
//! ```json
//! {
//!   "fieldName": "description",
//!   "attachments": {
//!     "attachmentResource": "description_images",
//!     "attachmentFieldName": "image_path",
//!     "attachmentRecordIdFieldName": "apartment_id",
//!     "attachmentResourceIdFieldName": "apartment_resource_id"
//!   }
//! }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for one markdown-edited column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownFieldOptions {
    /// Column holding the markdown text.
    pub field_name: String,
    /// Image attachment tracking; absent when uploads are not linked to records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<AttachmentOptions>,
}

/// Where attachment rows live and how they link back to the edited record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentOptions {
    /// Resource storing one row per attachment.
    pub attachment_resource: String,
    /// Field in the attachment resource holding the stored file key.
    pub attachment_field_name: String,
    /// Field in the attachment resource holding the id of the edited record.
    pub attachment_record_id_field_name: String,
    /// Field in the attachment resource holding the id of the edited resource.
    pub attachment_resource_id_field_name: String,
}

/// Column data types relevant to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Short string.
    String,
    /// Long text.
    Text,
    /// Rich text.
    Richtext,
    /// Any other type, by name.
    #[serde(untagged)]
    Other(String),
}

impl ColumnType {
    /// Returns `true` if the column can store markdown.
    pub fn holds_markdown(&self) -> bool {
        matches!(self, Self::String | Self::Text | Self::Richtext)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Text => f.write_str("text"),
            Self::Richtext => f.write_str("richtext"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A resource column as seen by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Column data type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    /// Create a column descriptor.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

impl MarkdownFieldOptions {
    /// Options for `field_name` without attachment tracking.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            attachments: None,
        }
    }

    /// Parse options from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the configured column exists on `resource` and can hold markdown.
    pub fn validate(&self, resource: &str, columns: &[ColumnDescriptor]) -> Result<(), ConfigError> {
        let column = columns
            .iter()
            .find(|c| c.name == self.field_name)
            .ok_or_else(|| ConfigError::ColumnNotFound {
                column: self.field_name.clone(),
                resource: resource.to_string(),
            })?;

        if !column.column_type.holds_markdown() {
            return Err(ConfigError::UnsupportedColumnType {
                column: self.field_name.clone(),
                found: column.column_type.to_string(),
            });
        }

        tracing::debug!(
            resource,
            column = %self.field_name,
            attachments = self.attachments.is_some(),
            "markdown field options validated"
        );
        Ok(())
    }
}
