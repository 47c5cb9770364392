//! Image attachment links in markdown.
//!
//! Uploaded images are referenced from markdown as `![alt](url "title")`. Only links pointing
//! at S3 storage (URL containing `s3` or `amazonaws`) are treated as attachments. The helpers
//! here are pure: they compute which attachment keys to create and delete, and leave the
//! store itself to the caller.

use crate::error::AttachmentError;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

static IMAGE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(\s*([^)\s]+)(?:\s+"([^"]*)")?\s*\)"#)
        .expect("image link pattern is valid")
});

/// One `![alt](url "title")` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLink {
    /// Alt text (may be empty).
    pub alt: String,
    /// Link target.
    pub url: String,
    /// Optional quoted title.
    pub title: Option<String>,
}

impl ImageLink {
    /// Returns `true` if the link points at S3 storage.
    pub fn is_attachment(&self) -> bool {
        self.url.contains("s3") || self.url.contains("amazonaws")
    }
}

/// Every image link in `markdown`, in document order.
pub fn image_links(markdown: &str) -> Vec<ImageLink> {
    IMAGE_LINK
        .captures_iter(markdown)
        .map(|caps| ImageLink {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
            title: caps.get(3).map(|m| m.as_str().to_string()),
        })
        .collect()
}

/// Image links in `markdown` that point at S3 storage.
pub fn attachment_links(markdown: &str) -> Vec<ImageLink> {
    image_links(markdown)
        .into_iter()
        .filter(ImageLink::is_attachment)
        .collect()
}

/// Storage key of an attachment URL: its path without the leading `/`.
pub fn attachment_key(url: &str) -> Result<String, AttachmentError> {
    let parsed = Url::parse(url).map_err(|e| AttachmentError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let key = parsed.path().trim_start_matches('/');
    if key.is_empty() {
        return Err(AttachmentError::InvalidUrl {
            url: url.to_string(),
            reason: "empty path".to_string(),
        });
    }
    Ok(key.to_string())
}

/// Keys to create and delete so stored attachments match the links in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSync {
    /// Keys linked from the document with no stored row yet, sorted.
    pub to_create: Vec<String>,
    /// Stored keys no longer linked from the document, sorted.
    pub to_delete: Vec<String>,
}

impl AttachmentSync {
    /// Returns `true` if stored attachments already match the document.
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}

/// Compare stored attachment keys against the attachment links in `markdown`.
///
/// Links whose URL cannot be parsed are skipped.
pub fn plan_attachment_sync<S: AsRef<str>>(
    existing_keys: &[S],
    markdown: &str,
) -> AttachmentSync {
    let existing: BTreeSet<&str> = existing_keys.iter().map(AsRef::<str>::as_ref).collect();
    let mut linked: BTreeSet<String> = BTreeSet::new();

    for link in attachment_links(markdown) {
        match attachment_key(&link.url) {
            Ok(key) => {
                linked.insert(key);
            }
            Err(e) => tracing::debug!("skipping attachment link: {e}"),
        }
    }

    AttachmentSync {
        to_create: linked
            .iter()
            .filter(|key| !existing.contains(key.as_str()))
            .cloned()
            .collect(),
        to_delete: existing
            .iter()
            .filter(|key| !linked.contains(**key))
            .map(|key| key.to_string())
            .collect(),
    }
}
