//
//  atlas-cli
//  api/wiki/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Wiki wire types and normalized entities.
//!
//! The wiki models everything as "content" (pages, comments and attachments
//! share one envelope); the beans here mirror that envelope and the
//! normalized types split it back into the shapes users actually see.
//! List responses paginate by continuation: `_links.next` carries the
//! relative path of the following page when one exists.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire beans (deserialization)
// ---------------------------------------------------------------------------

/// A space as embedded in content or returned by the space endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceBean {
    /// Space key (e.g. `DOCS`).
    pub key: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description container (present when expanded).
    #[serde(default)]
    pub description: Option<DescriptionBean>,
}

/// Description container of a space.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionBean {
    #[serde(default)]
    pub plain: Option<PlainTextBean>,
}

/// Plain-text rendition of a description.
#[derive(Debug, Clone, Deserialize)]
pub struct PlainTextBean {
    #[serde(default)]
    pub value: String,
}

/// Version block of a content object.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfoBean {
    /// Monotonic version number, starting at 1.
    pub number: u64,

    /// Timestamp of this version.
    #[serde(default)]
    pub when: Option<String>,

    /// Author of this version.
    #[serde(default)]
    pub by: Option<AuthorBean>,
}

/// The author of a content version.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorBean {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

impl AuthorBean {
    /// The best available identity string for display.
    pub fn identity(&self) -> Option<String> {
        self.display_name.clone().or_else(|| self.username.clone())
    }
}

/// One ancestor entry; the service orders them root first.
#[derive(Debug, Clone, Deserialize)]
pub struct AncestorBean {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,
}

/// Body container of a content object.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyBean {
    #[serde(default)]
    pub storage: Option<StorageBean>,
}

/// Storage-format rendition of a body.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageBean {
    #[serde(default)]
    pub value: String,
}

/// Metadata container of a content object.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataBean {
    #[serde(default)]
    pub labels: Option<LabelContainerBean>,
}

/// Paged label container.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelContainerBean {
    #[serde(default)]
    pub results: Vec<LabelBean>,
}

/// A single label.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelBean {
    #[serde(default)]
    pub prefix: Option<String>,

    pub name: String,
}

/// Attachment extension block (media type and size).
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionsBean {
    #[serde(default, rename = "mediaType")]
    pub media_type: Option<String>,

    #[serde(default, rename = "fileSize")]
    pub file_size: Option<u64>,
}

/// The `_links` block of content objects and list responses.
#[derive(Debug, Clone, Deserialize)]
pub struct LinksBean {
    /// Relative path of the next result page, when more exist.
    #[serde(default)]
    pub next: Option<String>,
}

/// The content envelope shared by pages, comments and attachments.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBean {
    /// Opaque content id.
    pub id: String,

    /// Content kind (`page`, `comment`, `attachment`).
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,

    /// Lifecycle status (`current`, `trashed`, ...).
    #[serde(default)]
    pub status: Option<String>,

    /// Title; the file name for attachments.
    #[serde(default)]
    pub title: String,

    /// Owning space (present when expanded).
    #[serde(default)]
    pub space: Option<SpaceBean>,

    /// Version block (present when expanded).
    #[serde(default)]
    pub version: Option<VersionInfoBean>,

    /// Ancestor chain, root first (present when expanded).
    #[serde(default)]
    pub ancestors: Vec<AncestorBean>,

    /// Body container (present when expanded).
    #[serde(default)]
    pub body: Option<BodyBean>,

    /// Metadata container (present when expanded).
    #[serde(default)]
    pub metadata: Option<MetadataBean>,

    /// Attachment extensions.
    #[serde(default)]
    pub extensions: Option<ExtensionsBean>,
}

/// A paged list of content objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentListResponse {
    #[serde(default)]
    pub results: Vec<ContentBean>,

    #[serde(default, rename = "_links")]
    pub links: Option<LinksBean>,
}

/// A paged list of spaces.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceListResponse {
    #[serde(default)]
    pub results: Vec<SpaceBean>,

    #[serde(default, rename = "_links")]
    pub links: Option<LinksBean>,
}

// ---------------------------------------------------------------------------
// Payloads (serialization)
// ---------------------------------------------------------------------------

/// `{"key": ...}` space reference.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceKeyPayload {
    pub key: String,
}

/// `{"id": ...}` ancestor reference; a single entry sets the parent.
#[derive(Debug, Clone, Serialize)]
pub struct AncestorPayload {
    pub id: String,
}

/// Container reference used when posting comments.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerPayload {
    pub id: String,

    #[serde(rename = "type")]
    pub container_type: String,
}

/// `{"number": ...}` version payload; updates must send current + 1.
#[derive(Debug, Clone, Serialize)]
pub struct VersionPayload {
    pub number: u64,
}

/// Body payload in storage representation.
#[derive(Debug, Clone, Serialize)]
pub struct BodyPayload {
    pub storage: StoragePayload,
}

impl BodyPayload {
    /// Wraps raw storage-format markup into the body envelope.
    pub fn storage(value: &str) -> Self {
        Self {
            storage: StoragePayload {
                value: value.to_string(),
                representation: "storage".to_string(),
            },
        }
    }
}

/// Storage rendition payload.
#[derive(Debug, Clone, Serialize)]
pub struct StoragePayload {
    pub value: String,
    pub representation: String,
}

/// A label to add; the wiki expects an array of these.
#[derive(Debug, Clone, Serialize)]
pub struct LabelPayload {
    pub prefix: String,
    pub name: String,
}

/// The content envelope for create and update requests.
///
/// Pages set `title`/`space`/`ancestors`; comments set `container`; updates
/// additionally carry `id` and the bumped `version`.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub content_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceKeyPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<AncestorPayload>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyPayload>,
}

// ---------------------------------------------------------------------------
// Normalized entities
// ---------------------------------------------------------------------------

/// A fully normalized wiki page, as rendered by both output modes.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `id` | Opaque page id |
/// | `title` | Page title |
/// | `space_key` | Key of the owning space |
/// | `status` | Lifecycle status |
/// | `version` | Current version number |
/// | `parent_id` | Direct parent page id, if nested |
/// | `labels` | Labels in service order |
/// | `body` | Storage-format body, when fetched |
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub space_key: String,
    pub status: String,
    pub version: u64,
    pub parent_id: Option<String>,
    pub labels: Vec<String>,
    pub body: Option<String>,
}

/// The row shape produced by `page list`, `page search` and `page children`.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub space_key: String,
    pub status: String,
    pub version: u64,
}

/// One entry of a page tree, depth 0 being the requested root.
#[derive(Debug, Clone, Serialize)]
pub struct TreePage {
    pub id: String,
    pub title: String,
    pub depth: usize,
}

/// A normalized space.
#[derive(Debug, Clone, Serialize)]
pub struct Space {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
}

/// A normalized page comment.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub created: Option<String>,
}

/// A normalized attachment.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub media_type: Option<String>,
    pub size: u64,
}

// ---------------------------------------------------------------------------
// Wire → normalized projections
// ---------------------------------------------------------------------------

impl From<ContentBean> for Page {
    fn from(bean: ContentBean) -> Self {
        Page {
            id: bean.id,
            title: bean.title,
            space_key: bean.space.map(|s| s.key).unwrap_or_default(),
            status: bean.status.unwrap_or_default(),
            version: bean.version.map(|v| v.number).unwrap_or(0),
            parent_id: bean.ancestors.last().map(|a| a.id.clone()),
            labels: bean
                .metadata
                .and_then(|m| m.labels)
                .unwrap_or_default()
                .results
                .into_iter()
                .map(|l| l.name)
                .collect(),
            body: bean.body.and_then(|b| b.storage).map(|s| s.value),
        }
    }
}

impl From<&ContentBean> for PageSummary {
    fn from(bean: &ContentBean) -> Self {
        PageSummary {
            id: bean.id.clone(),
            title: bean.title.clone(),
            space_key: bean
                .space
                .as_ref()
                .map(|s| s.key.clone())
                .unwrap_or_default(),
            status: bean.status.clone().unwrap_or_default(),
            version: bean.version.as_ref().map(|v| v.number).unwrap_or(0),
        }
    }
}

impl From<ContentBean> for Comment {
    fn from(bean: ContentBean) -> Self {
        Comment {
            id: bean.id,
            author: bean
                .version
                .as_ref()
                .and_then(|v| v.by.as_ref())
                .and_then(|b| b.identity()),
            body: bean
                .body
                .and_then(|b| b.storage)
                .map(|s| s.value)
                .unwrap_or_default(),
            created: bean.version.and_then(|v| v.when),
        }
    }
}

impl From<ContentBean> for Attachment {
    fn from(bean: ContentBean) -> Self {
        let extensions = bean.extensions;
        Attachment {
            id: bean.id,
            filename: bean.title,
            media_type: extensions.as_ref().and_then(|e| e.media_type.clone()),
            size: extensions.and_then(|e| e.file_size).unwrap_or(0),
        }
    }
}

impl From<SpaceBean> for Space {
    fn from(bean: SpaceBean) -> Self {
        Space {
            key: bean.key,
            name: bean.name.unwrap_or_default(),
            description: bean
                .description
                .and_then(|d| d.plain)
                .map(|p| p.value)
                .filter(|v| !v.is_empty()),
        }
    }
}
