//
//  atlas-cli
//  api/tracker/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Tracker wire types and normalized entities.
//!
//! Three groups live here:
//!
//! - **Wire beans** (`*Bean`, `*Response`): deserialization targets matching
//!   the tracker's REST schema exactly. Never shown to users.
//! - **Payloads** (`*Request`, `*Payload`): serialization shapes for create,
//!   update, transition, link and label mutations. Optional fields are
//!   skipped when `None`, which is how "omitted leaves the field untouched"
//!   is expressed on the wire; an explicit empty list is sent as `[]` and
//!   clears the field.
//! - **Normalized entities** (`Issue`, `Version`, ...): transport-agnostic
//!   projections the adapter returns. Both output renderers consume these.
//!
//! # Notes
//!
//! - The tracker names things in camelCase; wire and payload structs carry
//!   `rename` attributes so the Rust side stays snake_case
//! - Assignment uses the name-based identity scheme; `NamePayload` with a
//!   `None` name serializes as `{"name": null}`, which unassigns

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire beans (deserialization)
// ---------------------------------------------------------------------------

/// A value addressed purely by display name (status, priority, issue type).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    /// Display name of the referenced value.
    pub name: String,
}

/// A user as the tracker reports one.
///
/// Name-based instances populate `name`; others only send `displayName`.
/// [`UserBean::identity`] picks whichever is present.
#[derive(Debug, Clone, Deserialize)]
pub struct UserBean {
    /// Login name, if the instance exposes one.
    #[serde(default)]
    pub name: Option<String>,

    /// Human display name.
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

impl UserBean {
    /// The best available identity string for display and round-trips.
    pub fn identity(&self) -> Option<String> {
        self.name.clone().or_else(|| self.display_name.clone())
    }
}

/// Parent issue reference inside the fields object.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentBean {
    /// Key of the parent issue.
    pub key: String,
}

/// Time tracking block of an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeTrackingBean {
    /// The original estimate in duration notation (e.g. `3d 4h`).
    #[serde(default, rename = "originalEstimate")]
    pub original_estimate: Option<String>,

    /// The remaining estimate in duration notation.
    #[serde(default, rename = "remainingEstimate")]
    pub remaining_estimate: Option<String>,
}

/// A project version as the tracker reports one.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionBean {
    /// Opaque version id.
    pub id: String,

    /// Version name (e.g. `1.4.0`).
    pub name: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Start date as `YYYY-MM-DD`.
    #[serde(default, rename = "startDate")]
    pub start_date: Option<String>,

    /// Release date as `YYYY-MM-DD`.
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,

    /// Whether the version has been released.
    #[serde(default)]
    pub released: bool,
}

/// One side of an issue link.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedIssueBean {
    /// Key of the issue on this side of the link.
    pub key: String,
}

/// The type of an issue link, with its directional phrases.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkTypeBean {
    /// Type name (e.g. `Blocks`, `Relates`).
    pub name: String,
}

/// A link between two issues as embedded in the fields object.
///
/// Exactly one of `inward_issue`/`outward_issue` is present, telling which
/// direction the link points from the perspective of the fetched issue.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueLinkBean {
    /// Opaque link id (used for deletion).
    pub id: String,

    /// The link type.
    #[serde(rename = "type")]
    pub link_type: LinkTypeBean,

    /// Present when the link points at the fetched issue.
    #[serde(default, rename = "inwardIssue")]
    pub inward_issue: Option<LinkedIssueBean>,

    /// Present when the link points away from the fetched issue.
    #[serde(default, rename = "outwardIssue")]
    pub outward_issue: Option<LinkedIssueBean>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentBean {
    /// Opaque comment id.
    #[serde(default)]
    pub id: Option<String>,

    /// Comment author.
    #[serde(default)]
    pub author: Option<UserBean>,

    /// Comment body text.
    #[serde(default)]
    pub body: Option<String>,

    /// Creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
}

/// The paged comment container inside the fields object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentContainerBean {
    /// Comments in service order.
    #[serde(default)]
    pub comments: Vec<CommentBean>,
}

/// The `fields` object of an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFieldsBean {
    /// One-line summary.
    #[serde(default)]
    pub summary: String,

    /// Long-form description, if set.
    #[serde(default)]
    pub description: Option<String>,

    /// Issue type reference.
    #[serde(default)]
    pub issuetype: Option<NamedRef>,

    /// Workflow status reference.
    #[serde(default)]
    pub status: Option<NamedRef>,

    /// Priority reference, if set.
    #[serde(default)]
    pub priority: Option<NamedRef>,

    /// Assignee, if assigned.
    #[serde(default)]
    pub assignee: Option<UserBean>,

    /// Labels in service order.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Parent issue, if this is a subtask or child.
    #[serde(default)]
    pub parent: Option<ParentBean>,

    /// Time tracking block, if estimated.
    #[serde(default)]
    pub timetracking: Option<TimeTrackingBean>,

    /// Versions this issue is fixed in.
    #[serde(default, rename = "fixVersions")]
    pub fix_versions: Vec<VersionBean>,

    /// Versions this issue affects.
    #[serde(default)]
    pub versions: Vec<VersionBean>,

    /// Links to other issues.
    #[serde(default)]
    pub issuelinks: Vec<IssueLinkBean>,

    /// Comment container, present when comments were expanded.
    #[serde(default)]
    pub comment: Option<CommentContainerBean>,
}

/// An issue as returned by the issue and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueBean {
    /// Project-scoped issue key (e.g. `PROJ-123`).
    pub key: String,

    /// The fields object.
    pub fields: IssueFieldsBean,
}

/// Response of the search endpoint, paged by offset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Index of the first returned issue.
    pub start_at: u64,

    /// Page size that was applied.
    pub max_results: u64,

    /// Total number of matches across all pages.
    pub total: u64,

    /// Issues on this page, in service order.
    #[serde(default)]
    pub issues: Vec<IssueBean>,
}

/// Response of the transition discovery endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    /// Transitions currently available on the issue.
    #[serde(default)]
    pub transitions: Vec<TransitionBean>,
}

/// One available workflow transition.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionBean {
    /// Opaque transition id, posted back to execute it.
    pub id: String,

    /// Transition name as shown in the workflow.
    pub name: String,

    /// Status the issue lands in.
    #[serde(default)]
    pub to: Option<NamedRef>,
}

/// A remote (web) link attached to an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLinkBean {
    /// Opaque remote link id.
    #[serde(default)]
    pub id: Option<i64>,

    /// The linked object.
    pub object: RemoteLinkObjectBean,
}

/// The object portion of a remote link.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLinkObjectBean {
    /// Target URL.
    pub url: String,

    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
}

/// An uploaded attachment as the tracker confirms it.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentBean {
    /// Opaque attachment id.
    pub id: String,

    /// Stored file name.
    pub filename: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// Declared content type.
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}

/// A project as the tracker reports one.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectBean {
    /// Project key (e.g. `PROJ`).
    pub key: String,

    /// Display name.
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Project lead.
    #[serde(default)]
    pub lead: Option<UserBean>,

    /// Issue types configured for the project (detail endpoint only).
    #[serde(default, rename = "issueTypes")]
    pub issue_types: Vec<IssueTypeBean>,
}

/// An issue type configured on a project.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTypeBean {
    /// Opaque issue type id.
    pub id: String,

    /// Type name (e.g. `Bug`, `Task`).
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether issues of this type are subtasks.
    #[serde(default)]
    pub subtask: bool,
}

// ---------------------------------------------------------------------------
// Payloads (serialization)
// ---------------------------------------------------------------------------

/// `{"name": ...}` payload fragment.
///
/// `None` serializes as an explicit `null`, which the assignment endpoint
/// interprets as "unassign".
#[derive(Debug, Clone, Serialize)]
pub struct NamePayload {
    /// The referenced name, or `null`.
    pub name: Option<String>,
}

impl NamePayload {
    /// References a value by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()) }
    }

    /// The explicit `null` reference (unassign).
    pub fn null() -> Self {
        Self { name: None }
    }
}

/// `{"key": ...}` payload fragment.
#[derive(Debug, Clone, Serialize)]
pub struct KeyPayload {
    /// The referenced key.
    pub key: String,
}

/// Time tracking payload for create/update.
#[derive(Debug, Clone, Serialize)]
pub struct TimeTrackingPayload {
    /// Original estimate in duration notation.
    #[serde(rename = "originalEstimate")]
    pub original_estimate: String,
}

/// The `fields` envelope for issue create and update.
///
/// Every member is optional: `None` omits the field entirely (leaving it
/// untouched on update), while `Some` of an empty collection is forwarded
/// and clears it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueFieldsPayload {
    /// Owning project (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<KeyPayload>,

    /// Issue type by name (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuetype: Option<NamePayload>,

    /// One-line summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamePayload>,

    /// Full replacement label set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    /// Parent issue by key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<KeyPayload>,

    /// Time tracking block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timetracking: Option<TimeTrackingPayload>,

    /// Full replacement fix-version set, by name.
    #[serde(rename = "fixVersions", skip_serializing_if = "Option::is_none")]
    pub fix_versions: Option<Vec<NamePayload>>,

    /// Full replacement affected-version set, by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<NamePayload>>,

    /// Assignee identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NamePayload>,
}

impl IssueFieldsPayload {
    /// Whether any field would actually be sent.
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().map(|o| o.is_empty()).unwrap_or(true))
            .unwrap_or(true)
    }
}

/// Envelope for issue create (POST) and update (PUT).
#[derive(Debug, Clone, Serialize)]
pub struct IssueRequest {
    /// The fields to set.
    pub fields: IssueFieldsPayload,
}

/// Response of issue creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssueBean {
    /// Key of the freshly created issue.
    pub key: String,
}

/// A single label mutation verb.
///
/// Serializes externally tagged: `{"add": "x"}` or `{"remove": "x"}`.
#[derive(Debug, Clone, Serialize)]
pub enum LabelVerb {
    /// Adds a label, keeping existing ones.
    #[serde(rename = "add")]
    Add(String),

    /// Removes a label if present.
    #[serde(rename = "remove")]
    Remove(String),
}

/// Verb-style label update envelope.
#[derive(Debug, Clone, Serialize)]
pub struct LabelUpdateRequest {
    /// The update verbs block.
    pub update: LabelUpdateVerbs,
}

/// The `update` block carrying label verbs.
#[derive(Debug, Clone, Serialize)]
pub struct LabelUpdateVerbs {
    /// Label add/remove operations, applied in order.
    pub labels: Vec<LabelVerb>,
}

/// Payload executing a workflow transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    /// The transition to execute, by id.
    pub transition: TransitionIdPayload,
}

/// `{"id": ...}` fragment of a transition request.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionIdPayload {
    /// Opaque transition id from discovery.
    pub id: String,
}

/// Payload creating a link between two issues.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRequest {
    /// Link type by name.
    #[serde(rename = "type")]
    pub link_type: NamePayload,

    /// The issue the link points away from.
    #[serde(rename = "outwardIssue")]
    pub outward_issue: KeyPayload,

    /// The issue the link points at.
    #[serde(rename = "inwardIssue")]
    pub inward_issue: KeyPayload,
}

/// Payload adding a comment to an issue.
#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    /// Comment body text.
    pub body: String,
}

/// Payload creating a remote link on an issue.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteLinkRequest {
    /// The linked object.
    pub object: RemoteLinkObjectPayload,
}

/// Object portion of a remote link payload.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteLinkObjectPayload {
    /// Target URL.
    pub url: String,

    /// Display title.
    pub title: String,
}

/// Response of remote link creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRemoteLinkBean {
    /// Id assigned to the new remote link.
    #[serde(default)]
    pub id: Option<i64>,
}

/// Payload for version create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VersionRequest {
    /// Version name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owning project key (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start date as `YYYY-MM-DD`.
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Release date as `YYYY-MM-DD`.
    #[serde(rename = "releaseDate", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Released flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,
}

// ---------------------------------------------------------------------------
// Normalized entities
// ---------------------------------------------------------------------------

/// A fully normalized issue, as rendered by both output modes.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `key` | Project-scoped issue key |
/// | `issue_type` | Issue type name |
/// | `summary` | One-line summary |
/// | `description` | Long-form description, if set |
/// | `status` | Current workflow status |
/// | `priority` | Priority name, if set |
/// | `assignee` | Assignee identity, if assigned |
/// | `labels` | Labels in service order |
/// | `parent` | Parent issue key, if any |
/// | `estimate` | Original time estimate, if tracked |
/// | `remaining` | Remaining time estimate, if tracked |
/// | `fix_versions` | Fix version names, in service order |
/// | `affected_versions` | Affected version names, in service order |
/// | `links` | Issue links (type, direction, other key) |
/// | `remote_links` | Remote web links |
/// | `comments` | Comments in service order |
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub key: String,
    pub issue_type: String,
    pub summary: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    pub parent: Option<String>,
    pub estimate: Option<String>,
    pub remaining: Option<String>,
    pub fix_versions: Vec<String>,
    pub affected_versions: Vec<String>,
    pub links: Vec<IssueLink>,
    pub remote_links: Vec<RemoteLink>,
    pub comments: Vec<Comment>,
}

/// The row shape produced by `issue list` and `issue search`.
#[derive(Debug, Clone, Serialize)]
pub struct IssueSummary {
    pub key: String,
    pub issue_type: String,
    pub status: String,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub summary: String,
}

/// A normalized link entry on an issue.
///
/// `direction` is `outward` when the link points from this issue at `key`
/// (e.g. this issue *blocks* `key`) and `inward` for the converse.
#[derive(Debug, Clone, Serialize)]
pub struct IssueLink {
    pub link_type: String,
    pub direction: String,
    pub key: String,
}

/// A normalized remote link entry.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteLink {
    pub id: Option<i64>,
    pub url: String,
    pub title: Option<String>,
}

/// A normalized comment.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub author: Option<String>,
    pub body: String,
    pub created: Option<String>,
}

/// A normalized project version.
#[derive(Debug, Clone, Serialize)]
pub struct Version {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub release_date: Option<String>,
    pub released: bool,
}

/// A normalized project.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub lead: Option<String>,
}

/// A normalized issue type.
#[derive(Debug, Clone, Serialize)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    pub subtask: bool,
    pub description: Option<String>,
}

/// A normalized workflow transition.
#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: Option<String>,
}

/// A normalized attachment confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    pub mime_type: Option<String>,
    pub size: u64,
}

// ---------------------------------------------------------------------------
// Wire → normalized projections
// ---------------------------------------------------------------------------

impl From<IssueBean> for Issue {
    fn from(bean: IssueBean) -> Self {
        let fields = bean.fields;
        Issue {
            key: bean.key,
            issue_type: fields.issuetype.map(|t| t.name).unwrap_or_default(),
            summary: fields.summary,
            description: fields.description,
            status: fields.status.map(|s| s.name).unwrap_or_default(),
            priority: fields.priority.map(|p| p.name),
            assignee: fields.assignee.and_then(|u| u.identity()),
            labels: fields.labels,
            parent: fields.parent.map(|p| p.key),
            estimate: fields
                .timetracking
                .as_ref()
                .and_then(|t| t.original_estimate.clone()),
            remaining: fields
                .timetracking
                .as_ref()
                .and_then(|t| t.remaining_estimate.clone()),
            fix_versions: fields.fix_versions.into_iter().map(|v| v.name).collect(),
            affected_versions: fields.versions.into_iter().map(|v| v.name).collect(),
            links: fields.issuelinks.into_iter().map(IssueLink::from).collect(),
            remote_links: Vec::new(),
            comments: fields
                .comment
                .unwrap_or_default()
                .comments
                .into_iter()
                .map(Comment::from)
                .collect(),
        }
    }
}

impl From<&IssueBean> for IssueSummary {
    fn from(bean: &IssueBean) -> Self {
        IssueSummary {
            key: bean.key.clone(),
            issue_type: bean
                .fields
                .issuetype
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            status: bean
                .fields
                .status
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            priority: bean.fields.priority.as_ref().map(|p| p.name.clone()),
            assignee: bean.fields.assignee.as_ref().and_then(|u| u.identity()),
            summary: bean.fields.summary.clone(),
        }
    }
}

impl From<IssueLinkBean> for IssueLink {
    fn from(bean: IssueLinkBean) -> Self {
        match (bean.outward_issue, bean.inward_issue) {
            (Some(other), _) => IssueLink {
                link_type: bean.link_type.name,
                direction: "outward".to_string(),
                key: other.key,
            },
            (None, Some(other)) => IssueLink {
                link_type: bean.link_type.name,
                direction: "inward".to_string(),
                key: other.key,
            },
            (None, None) => IssueLink {
                link_type: bean.link_type.name,
                direction: "outward".to_string(),
                key: String::new(),
            },
        }
    }
}

impl From<CommentBean> for Comment {
    fn from(bean: CommentBean) -> Self {
        Comment {
            author: bean.author.and_then(|u| u.identity()),
            body: bean.body.unwrap_or_default(),
            created: bean.created,
        }
    }
}

impl From<RemoteLinkBean> for RemoteLink {
    fn from(bean: RemoteLinkBean) -> Self {
        RemoteLink {
            id: bean.id,
            url: bean.object.url,
            title: bean.object.title,
        }
    }
}

impl From<VersionBean> for Version {
    fn from(bean: VersionBean) -> Self {
        Version {
            id: bean.id,
            name: bean.name,
            description: bean.description,
            start_date: bean.start_date,
            release_date: bean.release_date,
            released: bean.released,
        }
    }
}

impl From<ProjectBean> for Project {
    fn from(bean: ProjectBean) -> Self {
        Project {
            key: bean.key,
            name: bean.name,
            description: bean.description,
            lead: bean.lead.and_then(|u| u.identity()),
        }
    }
}

impl From<IssueTypeBean> for IssueType {
    fn from(bean: IssueTypeBean) -> Self {
        IssueType {
            id: bean.id,
            name: bean.name,
            subtask: bean.subtask,
            description: bean.description,
        }
    }
}

impl From<TransitionBean> for Transition {
    fn from(bean: TransitionBean) -> Self {
        Transition {
            id: bean.id,
            name: bean.name,
            to: bean.to.map(|t| t.name),
        }
    }
}

impl From<AttachmentBean> for Attachment {
    fn from(bean: AttachmentBean) -> Self {
        Attachment {
            id: bean.id,
            filename: bean.filename,
            mime_type: bean.mime_type,
            size: bean.size,
        }
    }
}
