//
//  atlas-cli
//  api/tracker/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Issue tracker adapter.
//!
//! # Overview
//!
//! [`TrackerApi`] maps issue, version and project operations onto the
//! tracker's REST surface under `/rest/api/2`. Each method corresponds to
//! one CLI subcommand, takes CLI-level parameters, and returns normalized
//! entities from [`models`]. All requests go through the shared
//! [`Transport`], which owns authentication, retries and fault mapping.
//!
//! # Example
//!
//! ```no_run
//! use atlas_cli::api::{Transport, tracker::TrackerApi};
//! use atlas_cli::config::Credentials;
//!
//! # async fn example() -> Result<(), atlas_cli::Fault> {
//! let transport = Transport::new(Credentials::resolve()?)?;
//! let tracker = TrackerApi::new(&transport);
//!
//! let issue = tracker.get_issue("PROJ-123").await?;
//! println!("{}: {}", issue.key, issue.summary);
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Search and list paginate transparently; with a result cap the page
//!   size shrinks to the remainder so no surplus request is issued
//! - Mutations that the service answers with `204 No Content` return `()`

pub mod models;

use std::path::Path;

use crate::api::upload;
use crate::api::{Fault, Transport};

use models::*;

/// Route prefix of the tracker's REST surface.
const ROOT: &str = "/rest/api/2";

/// Page size requested when walking uncapped result sets.
const PAGE_SIZE: usize = 50;

/// Adapter over the issue tracker's REST surface.
pub struct TrackerApi<'a> {
    transport: &'a Transport,
}

impl<'a> TrackerApi<'a> {
    /// Creates an adapter borrowing the shared transport.
    ///
    /// # Parameters
    ///
    /// * `transport` - The shared transport carrying credentials and retries
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    // -- Issues --------------------------------------------------------------

    /// Fetches one issue with its links, comments and remote links.
    ///
    /// Requests every field, then merges the remote links from their own
    /// endpoint, so the returned issue is the complete detail view.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue key (e.g. `PROJ-123`)
    ///
    /// # Returns
    ///
    /// Returns `Ok(Issue)` with links, comments and remote links populated,
    /// or a fault if the issue does not exist or a request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, tracker::TrackerApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// let issue = TrackerApi::new(&transport).get_issue("PROJ-123").await?;
    /// println!("{} is {}", issue.key, issue.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_issue(&self, key: &str) -> Result<Issue, Fault> {
        let bean: IssueBean = self
            .transport
            .get(
                &format!("{ROOT}/issue/{key}"),
                &[("fields", "*all".to_string())],
            )
            .await?;
        let remote: Vec<RemoteLinkBean> = self
            .transport
            .get(&format!("{ROOT}/issue/{key}/remotelink"), &[])
            .await?;

        let mut issue = Issue::from(bean);
        issue.remote_links = remote.into_iter().map(RemoteLink::from).collect();
        Ok(issue)
    }

    /// Lists issues of a project, newest first.
    ///
    /// # Parameters
    ///
    /// * `project` - The project key whose issues to list
    /// * `limit` - Optional cap on the number of rows returned
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<IssueSummary>)` ordered by creation date, newest
    /// first, or a fault if the project does not exist.
    pub async fn list_issues(
        &self,
        project: &str,
        limit: Option<usize>,
    ) -> Result<Vec<IssueSummary>, Fault> {
        let jql = format!("project = {project} ORDER BY created DESC");
        self.search(&jql, limit).await
    }

    /// Runs a raw JQL query, walking result pages transparently.
    ///
    /// The query string is forwarded verbatim; the service is the only
    /// authority on its syntax. With `limit` set, each page request asks for
    /// no more than the remaining count and the walk stops as soon as the
    /// cap is reached.
    ///
    /// # Parameters
    ///
    /// * `jql` - The query, passed through unparsed
    /// * `limit` - Optional cap on the number of rows returned
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<IssueSummary>)` in service order, or a fault if the
    /// service rejects the query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, tracker::TrackerApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// let rows = TrackerApi::new(&transport)
    ///     .search("assignee = currentUser() AND status != Done", Some(20))
    ///     .await?;
    /// for row in rows {
    ///     println!("{} {}", row.key, row.summary);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(
        &self,
        jql: &str,
        limit: Option<usize>,
    ) -> Result<Vec<IssueSummary>, Fault> {
        let mut rows: Vec<IssueSummary> = Vec::new();
        let mut start_at: u64 = 0;

        loop {
            let page_size = match limit {
                Some(limit) => {
                    let remaining = limit.saturating_sub(rows.len());
                    if remaining == 0 {
                        break;
                    }
                    remaining.min(PAGE_SIZE)
                }
                None => PAGE_SIZE,
            };

            let page: SearchResponse = self
                .transport
                .get(
                    &format!("{ROOT}/search"),
                    &[
                        ("jql", jql.to_string()),
                        ("startAt", start_at.to_string()),
                        ("maxResults", page_size.to_string()),
                    ],
                )
                .await?;

            let count = page.issues.len() as u64;
            rows.extend(page.issues.iter().map(IssueSummary::from));

            if let Some(limit) = limit {
                if rows.len() >= limit {
                    rows.truncate(limit);
                    break;
                }
            }

            start_at = page.start_at + count;
            if count == 0 || start_at >= page.total {
                break;
            }
        }

        Ok(rows)
    }

    /// Creates an issue, returning the key the tracker assigned.
    ///
    /// # Parameters
    ///
    /// * `request` - The fields envelope; project, type and summary are the
    ///   members the service requires
    ///
    /// # Returns
    ///
    /// Returns `Ok(String)` carrying the new issue's key, or a fault if a
    /// named field value does not exist on the service.
    pub async fn create_issue(&self, request: &IssueRequest) -> Result<String, Fault> {
        let created: CreatedIssueBean = self
            .transport
            .post(&format!("{ROOT}/issue"), request)
            .await?;
        Ok(created.key)
    }

    /// Updates issue fields; members absent from the payload stay untouched.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue key to update
    /// * `request` - The fields envelope; an empty list member clears the
    ///   field, an absent member keeps it
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the service acknowledges the write.
    pub async fn update_issue(&self, key: &str, request: &IssueRequest) -> Result<(), Fault> {
        self.transport
            .put_no_content(&format!("{ROOT}/issue/{key}"), request)
            .await
    }

    /// Deletes an issue.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue key to delete
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on deletion, or a not-found fault if the key
    /// does not resolve.
    pub async fn delete_issue(&self, key: &str) -> Result<(), Fault> {
        self.transport
            .delete(&format!("{ROOT}/issue/{key}"), &[])
            .await
    }

    /// Assigns an issue, or unassigns it when the payload carries `null`.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue key to assign
    /// * `assignee` - The `{"name": ...}` payload; [`NamePayload::null`]
    ///   serializes an explicit `null`, which the service reads as
    ///   "unassign"
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the assignment is applied.
    pub async fn assign_issue(&self, key: &str, assignee: &NamePayload) -> Result<(), Fault> {
        self.transport
            .put_no_content(&format!("{ROOT}/issue/{key}/assignee"), assignee)
            .await
    }

    // -- Workflow ------------------------------------------------------------

    /// Lists the transitions currently available on an issue.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue whose workflow position to inspect
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Transition>)` with the transitions the workflow
    /// offers from the issue's current status.
    pub async fn transitions(&self, key: &str) -> Result<Vec<Transition>, Fault> {
        let response: TransitionsResponse = self
            .transport
            .get(&format!("{ROOT}/issue/{key}/transitions"), &[])
            .await?;
        Ok(response
            .transitions
            .into_iter()
            .map(Transition::from)
            .collect())
    }

    /// Moves an issue through the workflow by transition or status name.
    ///
    /// Matching is case-insensitive against the transition name first and
    /// its target status second.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue to move
    /// * `target` - A transition name (e.g. `Start Progress`) or target
    ///   status name (e.g. `In Progress`)
    ///
    /// # Returns
    ///
    /// Returns `Ok(Transition)` describing the executed transition, or a
    /// not-found fault listing the transitions that were actually available
    /// when nothing matches.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, tracker::TrackerApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// let done = TrackerApi::new(&transport)
    ///     .transition_issue("PROJ-123", "done")
    ///     .await?;
    /// println!("moved via {}", done.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn transition_issue(&self, key: &str, target: &str) -> Result<Transition, Fault> {
        let available = self.transitions(key).await?;

        let matched = available
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(target))
            .or_else(|| {
                available.iter().find(|t| {
                    t.to.as_deref()
                        .map(|s| s.eq_ignore_ascii_case(target))
                        .unwrap_or(false)
                })
            })
            .cloned();

        let transition = matched.ok_or_else(|| {
            let names: Vec<&str> = available.iter().map(|t| t.name.as_str()).collect();
            Fault::NotFound(format!(
                "no transition \"{target}\" available on {key} (available: {})",
                names.join(", ")
            ))
        })?;

        let request = TransitionRequest {
            transition: TransitionIdPayload {
                id: transition.id.clone(),
            },
        };
        self.transport
            .post_no_content(&format!("{ROOT}/issue/{key}/transitions"), &request)
            .await?;
        Ok(transition)
    }

    // -- Comments ------------------------------------------------------------

    /// Lists the comments on an issue, oldest first.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue whose comments to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Comment>)` in service order (oldest first).
    pub async fn comments(&self, key: &str) -> Result<Vec<Comment>, Fault> {
        let container: CommentContainerBean = self
            .transport
            .get(&format!("{ROOT}/issue/{key}/comment"), &[])
            .await?;
        Ok(container.comments.into_iter().map(Comment::from).collect())
    }

    /// Adds a comment to an issue.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue to comment on
    /// * `body` - The comment text, passed through unformatted
    ///
    /// # Returns
    ///
    /// Returns `Ok(Comment)` as the service stored it, with author and
    /// timestamp filled in.
    pub async fn add_comment(&self, key: &str, body: &str) -> Result<Comment, Fault> {
        let request = CommentRequest {
            body: body.to_string(),
        };
        let created: CommentBean = self
            .transport
            .post(&format!("{ROOT}/issue/{key}/comment"), &request)
            .await?;
        Ok(Comment::from(created))
    }

    // -- Labels --------------------------------------------------------------

    /// Adds and removes labels without replacing the whole set.
    ///
    /// The mutation goes through the service's update verbs, so labels
    /// applied by others in the meantime survive.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue whose labels to change
    /// * `add` - Labels to add; existing ones are ignored by the service
    /// * `remove` - Labels to remove; absent ones are ignored by the service
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once both verb lists are applied.
    pub async fn update_labels(
        &self,
        key: &str,
        add: Vec<String>,
        remove: Vec<String>,
    ) -> Result<(), Fault> {
        let verbs: Vec<LabelVerb> = add
            .into_iter()
            .map(LabelVerb::Add)
            .chain(remove.into_iter().map(LabelVerb::Remove))
            .collect();
        let request = LabelUpdateRequest {
            update: LabelUpdateVerbs { labels: verbs },
        };
        self.transport
            .put_no_content(&format!("{ROOT}/issue/{key}"), &request)
            .await
    }

    // -- Links ---------------------------------------------------------------

    /// Links `from` to `to`; `from` takes the outward side of the relation.
    ///
    /// Both issues reflect the link afterwards, each from its own
    /// direction.
    ///
    /// # Parameters
    ///
    /// * `from` - The issue on the outward side, e.g. the one that blocks
    /// * `to` - The issue on the inward side, e.g. the one being blocked
    /// * `link_type` - The relation name as the service defines it, such as
    ///   `Blocks` or `Relates`
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the link exists.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, tracker::TrackerApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// TrackerApi::new(&transport)
    ///     .link_issues("PROJ-1", "PROJ-2", "Blocks")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn link_issues(&self, from: &str, to: &str, link_type: &str) -> Result<(), Fault> {
        let request = LinkRequest {
            link_type: NamePayload::new(link_type),
            outward_issue: KeyPayload {
                key: from.to_string(),
            },
            inward_issue: KeyPayload {
                key: to.to_string(),
            },
        };
        self.transport
            .post_no_content(&format!("{ROOT}/issueLink"), &request)
            .await
    }

    /// Removes the link between two issues, whichever direction it points.
    ///
    /// The link id is looked up from `from`'s side first, so the pair can
    /// be given in either order.
    ///
    /// # Parameters
    ///
    /// * `from` - One end of the link
    /// * `to` - The other end, matched case-insensitively
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` when the link is gone, or a not-found fault if the
    /// two issues were not linked.
    pub async fn unlink_issues(&self, from: &str, to: &str) -> Result<(), Fault> {
        let bean: IssueBean = self
            .transport
            .get(
                &format!("{ROOT}/issue/{from}"),
                &[("fields", "issuelinks".to_string())],
            )
            .await?;

        let touches = |side: &Option<LinkedIssueBean>| {
            side.as_ref()
                .map(|i| i.key.eq_ignore_ascii_case(to))
                .unwrap_or(false)
        };
        let link = bean
            .fields
            .issuelinks
            .iter()
            .find(|l| touches(&l.inward_issue) || touches(&l.outward_issue));

        match link {
            Some(link) => {
                self.transport
                    .delete(&format!("{ROOT}/issueLink/{}", link.id), &[])
                    .await
            }
            None => Err(Fault::NotFound(format!("no link between {from} and {to}"))),
        }
    }

    // -- Remote links --------------------------------------------------------

    /// Attaches a web link to an issue, returning the assigned id.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue to attach the link to
    /// * `url` - The address the link points at
    /// * `title` - The text shown for the link
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(id))` with the id the service assigned, or
    /// `Ok(None)` when the service omits it from the response.
    pub async fn add_remote_link(
        &self,
        key: &str,
        url: &str,
        title: &str,
    ) -> Result<Option<i64>, Fault> {
        let request = RemoteLinkRequest {
            object: RemoteLinkObjectPayload {
                url: url.to_string(),
                title: title.to_string(),
            },
        };
        let created: CreatedRemoteLinkBean = self
            .transport
            .post(&format!("{ROOT}/issue/{key}/remotelink"), &request)
            .await?;
        Ok(created.id)
    }

    /// Lists the remote links on an issue.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue whose web links to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<RemoteLink>)` with id, url and title per link; an
    /// issue without remote links yields an empty vector.
    pub async fn remote_links(&self, key: &str) -> Result<Vec<RemoteLink>, Fault> {
        let beans: Vec<RemoteLinkBean> = self
            .transport
            .get(&format!("{ROOT}/issue/{key}/remotelink"), &[])
            .await?;
        Ok(beans.into_iter().map(RemoteLink::from).collect())
    }

    /// Removes a remote link by its id.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue the link hangs off
    /// * `id` - The link id as reported by [`remote_links`](Self::remote_links)
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the link is deleted.
    pub async fn remove_remote_link(&self, key: &str, id: i64) -> Result<(), Fault> {
        self.transport
            .delete(&format!("{ROOT}/issue/{key}/remotelink/{id}"), &[])
            .await
    }

    // -- Attachments ---------------------------------------------------------

    /// Uploads a file as an issue attachment.
    ///
    /// The path is checked locally before any request goes out; the upload
    /// itself streams the file and is never retried.
    ///
    /// # Parameters
    ///
    /// * `key` - The issue to attach the file to
    /// * `path` - A readable local file; the attachment keeps its file name
    ///
    /// # Returns
    ///
    /// Returns `Ok(Attachment)` describing the stored file, or an
    /// invalid-arguments fault before any request if the path does not
    /// point at a readable file.
    pub async fn attach(&self, key: &str, path: &Path) -> Result<Attachment, Fault> {
        let form = upload::attachment_form(path).await?;
        let created: Vec<AttachmentBean> = self
            .transport
            .post_multipart(&format!("{ROOT}/issue/{key}/attachments"), form)
            .await?;
        created
            .into_iter()
            .next()
            .map(Attachment::from)
            .ok_or_else(|| Fault::Unknown("attachment upload returned no result".to_string()))
    }

    // -- Versions ------------------------------------------------------------

    /// Lists the versions of a project.
    ///
    /// # Parameters
    ///
    /// * `project` - The project key, e.g. `PROJ`
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Version>)` in the service's order, released and
    /// unreleased alike.
    pub async fn versions(&self, project: &str) -> Result<Vec<Version>, Fault> {
        let beans: Vec<VersionBean> = self
            .transport
            .get(&format!("{ROOT}/project/{project}/versions"), &[])
            .await?;
        Ok(beans.into_iter().map(Version::from).collect())
    }

    /// Fetches one version by id.
    ///
    /// # Parameters
    ///
    /// * `id` - The numeric version id; names are not accepted here
    ///
    /// # Returns
    ///
    /// Returns `Ok(Version)` with its release and archive flags and dates.
    pub async fn version(&self, id: &str) -> Result<Version, Fault> {
        let bean: VersionBean = self
            .transport
            .get(&format!("{ROOT}/version/{id}"), &[])
            .await?;
        Ok(Version::from(bean))
    }

    /// Creates a version in a project.
    ///
    /// # Parameters
    ///
    /// * `request` - The version fields; name and project are required,
    ///   everything else optional
    ///
    /// # Returns
    ///
    /// Returns `Ok(Version)` with the id the service assigned.
    pub async fn create_version(&self, request: &VersionRequest) -> Result<Version, Fault> {
        let bean: VersionBean = self.transport.post(&format!("{ROOT}/version"), request).await?;
        Ok(Version::from(bean))
    }

    /// Updates version fields; members absent from the payload stay untouched.
    ///
    /// # Parameters
    ///
    /// * `id` - The numeric id of the version to change
    /// * `request` - The fields to set; `None` members are left out of the
    ///   payload entirely
    ///
    /// # Returns
    ///
    /// Returns `Ok(Version)` reflecting the state after the update.
    pub async fn update_version(&self, id: &str, request: &VersionRequest) -> Result<Version, Fault> {
        let bean: VersionBean = self
            .transport
            .put(&format!("{ROOT}/version/{id}"), request)
            .await?;
        Ok(Version::from(bean))
    }

    /// Deletes a version, optionally moving dependent issues to replacements.
    ///
    /// # Parameters
    ///
    /// * `id` - The numeric id of the version to delete
    /// * `move_fix_to` - Replacement version id for issues fixing the
    ///   deleted one; omitted, those references are simply dropped
    /// * `move_affected_to` - Same, for issues affected by it
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the version and its references are gone.
    pub async fn delete_version(
        &self,
        id: &str,
        move_fix_to: Option<&str>,
        move_affected_to: Option<&str>,
    ) -> Result<(), Fault> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(target) = move_fix_to {
            query.push(("moveFixIssuesTo", target.to_string()));
        }
        if let Some(target) = move_affected_to {
            query.push(("moveAffectedIssuesTo", target.to_string()));
        }
        self.transport
            .delete(&format!("{ROOT}/version/{id}"), &query)
            .await
    }

    // -- Projects ------------------------------------------------------------

    /// Lists all projects visible to the authenticated user.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Project>)` with key, name and lead per project.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, tracker::TrackerApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// for project in TrackerApi::new(&transport).projects().await? {
    ///     println!("{} {}", project.key, project.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn projects(&self) -> Result<Vec<Project>, Fault> {
        let beans: Vec<ProjectBean> = self.transport.get(&format!("{ROOT}/project"), &[]).await?;
        Ok(beans.into_iter().map(Project::from).collect())
    }

    /// Fetches one project by key.
    ///
    /// # Parameters
    ///
    /// * `key` - The project key, e.g. `PROJ`
    ///
    /// # Returns
    ///
    /// Returns `Ok(Project)` with name, description and lead.
    pub async fn project(&self, key: &str) -> Result<Project, Fault> {
        let bean: ProjectBean = self
            .transport
            .get(&format!("{ROOT}/project/{key}"), &[])
            .await?;
        Ok(Project::from(bean))
    }

    /// Lists the issue types configured on a project.
    ///
    /// # Parameters
    ///
    /// * `key` - The project whose types to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<IssueType>)` with id, name and the sub-task flag
    /// per type.
    pub async fn issue_types(&self, key: &str) -> Result<Vec<IssueType>, Fault> {
        let bean: ProjectBean = self
            .transport
            .get(&format!("{ROOT}/project/{key}"), &[])
            .await?;
        Ok(bean.issue_types.into_iter().map(IssueType::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use mockito::Matcher;
    use serde_json::json;

    fn test_transport(server: &mockito::ServerGuard) -> Transport {
        let credentials = Credentials {
            base_url: server.url(),
            email: "dev@example.com".to_string(),
            token: "secret".to_string(),
        };
        Transport::new(credentials).unwrap()
    }

    fn issue_json(key: &str) -> serde_json::Value {
        json!({
            "key": key,
            "fields": {
                "summary": format!("Summary of {key}"),
                "issuetype": {"name": "Task"},
                "status": {"name": "Open"},
                "priority": {"name": "Medium"},
                "assignee": {"name": "dev"}
            }
        })
    }

    /// Mocks the pair of requests `get_issue` makes, with the given links.
    async fn mock_issue_with_links(
        server: &mut mockito::ServerGuard,
        key: &str,
        links: serde_json::Value,
    ) {
        let mut body = issue_json(key);
        body["fields"]["issuelinks"] = links;
        server
            .mock("GET", format!("/rest/api/2/issue/{key}").as_str())
            .match_query(Matcher::UrlEncoded("fields".into(), "*all".into()))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;
        server
            .mock("GET", format!("/rest/api/2/issue/{key}/remotelink").as_str())
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
    }

    #[test]
    fn test_omitted_and_cleared_list_fields_serialize_differently() {
        let untouched = IssueFieldsPayload::default();
        let value = serde_json::to_value(&untouched).unwrap();
        assert_eq!(value, json!({}));

        let cleared = IssueFieldsPayload {
            fix_versions: Some(Vec::new()),
            ..Default::default()
        };
        let value = serde_json::to_value(&cleared).unwrap();
        assert_eq!(value, json!({"fixVersions": []}));
    }

    #[tokio::test]
    async fn test_search_caps_first_request_at_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("jql".into(), "project = PROJ".into()),
                Matcher::UrlEncoded("startAt".into(), "0".into()),
                Matcher::UrlEncoded("maxResults".into(), "3".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 0,
                    "maxResults": 3,
                    "total": 5,
                    "issues": [issue_json("PROJ-1"), issue_json("PROJ-2"), issue_json("PROJ-3")]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let rows = TrackerApi::new(&transport)
            .search("project = PROJ", Some(3))
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key, "PROJ-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_walks_all_pages_without_limit() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("startAt".into(), "0".into()),
                Matcher::UrlEncoded("maxResults".into(), "50".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 0,
                    "maxResults": 2,
                    "total": 3,
                    "issues": [issue_json("PROJ-1"), issue_json("PROJ-2")]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("startAt".into(), "2".into()),
                Matcher::UrlEncoded("maxResults".into(), "50".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 2,
                    "maxResults": 2,
                    "total": 3,
                    "issues": [issue_json("PROJ-3")]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let rows = TrackerApi::new(&transport)
            .search("order by created", None)
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].key, "PROJ-3");
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_issue_sends_fields_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue")
            .match_body(Matcher::Json(json!({
                "fields": {
                    "project": {"key": "PROJ"},
                    "issuetype": {"name": "Bug"},
                    "summary": "Broken login",
                    "labels": ["auth"]
                }
            })))
            .with_status(201)
            .with_body(json!({"id": "10042", "key": "PROJ-42"}).to_string())
            .create_async()
            .await;

        let request = IssueRequest {
            fields: IssueFieldsPayload {
                project: Some(KeyPayload {
                    key: "PROJ".to_string(),
                }),
                issuetype: Some(NamePayload::new("Bug")),
                summary: Some("Broken login".to_string()),
                labels: Some(vec!["auth".to_string()]),
                ..Default::default()
            },
        };

        let transport = test_transport(&server);
        let key = TrackerApi::new(&transport)
            .create_issue(&request)
            .await
            .unwrap();

        assert_eq!(key, "PROJ-42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_assign_sends_name_and_unassign_sends_null() {
        let mut server = mockito::Server::new_async().await;
        let assign = server
            .mock("PUT", "/rest/api/2/issue/PROJ-1/assignee")
            .match_body(Matcher::Json(json!({"name": "dev"})))
            .with_status(204)
            .create_async()
            .await;
        let unassign = server
            .mock("PUT", "/rest/api/2/issue/PROJ-1/assignee")
            .match_body(Matcher::Json(json!({"name": null})))
            .with_status(204)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let tracker = TrackerApi::new(&transport);
        tracker
            .assign_issue("PROJ-1", &NamePayload::new("dev"))
            .await
            .unwrap();
        tracker
            .assign_issue("PROJ-1", &NamePayload::null())
            .await
            .unwrap();

        assign.assert_async().await;
        unassign.assert_async().await;
    }

    #[tokio::test]
    async fn test_transition_matches_name_case_insensitively() {
        let mut server = mockito::Server::new_async().await;
        let discovery = server
            .mock("GET", "/rest/api/2/issue/PROJ-1/transitions")
            .with_status(200)
            .with_body(
                json!({
                    "transitions": [
                        {"id": "11", "name": "Start Progress", "to": {"name": "In Progress"}},
                        {"id": "31", "name": "Done", "to": {"name": "Done"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let execute = server
            .mock("POST", "/rest/api/2/issue/PROJ-1/transitions")
            .match_body(Matcher::Json(json!({"transition": {"id": "31"}})))
            .with_status(204)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let transition = TrackerApi::new(&transport)
            .transition_issue("PROJ-1", "done")
            .await
            .unwrap();

        assert_eq!(transition.name, "Done");
        discovery.assert_async().await;
        execute.assert_async().await;
    }

    #[tokio::test]
    async fn test_transition_unknown_target_lists_available() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-1/transitions")
            .with_status(200)
            .with_body(
                json!({
                    "transitions": [
                        {"id": "11", "name": "Start Progress", "to": {"name": "In Progress"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let transport = test_transport(&server);
        let err = TrackerApi::new(&transport)
            .transition_issue("PROJ-1", "Shipped")
            .await
            .unwrap_err();

        match err {
            Fault::NotFound(message) => {
                assert!(message.contains("Shipped"));
                assert!(message.contains("Start Progress"));
            }
            other => panic!("unexpected fault: {other}"),
        }
    }

    #[tokio::test]
    async fn test_label_mutation_uses_update_verbs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/rest/api/2/issue/PROJ-1")
            .match_body(Matcher::Json(json!({
                "update": {"labels": [{"add": "ui"}, {"remove": "backend"}]}
            })))
            .with_status(204)
            .create_async()
            .await;

        let transport = test_transport(&server);
        TrackerApi::new(&transport)
            .update_labels("PROJ-1", vec!["ui".to_string()], vec!["backend".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_link_issues_sends_directional_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issueLink")
            .match_body(Matcher::Json(json!({
                "type": {"name": "Blocks"},
                "outwardIssue": {"key": "PROJ-1"},
                "inwardIssue": {"key": "PROJ-2"}
            })))
            .with_status(201)
            .create_async()
            .await;

        let transport = test_transport(&server);
        TrackerApi::new(&transport)
            .link_issues("PROJ-1", "PROJ-2", "Blocks")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_link_reported_from_both_sides() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest/api/2/issueLink")
            .with_status(201)
            .create_async()
            .await;
        mock_issue_with_links(
            &mut server,
            "PROJ-1",
            json!([{"id": "9001", "type": {"name": "Blocks"}, "outwardIssue": {"key": "PROJ-2"}}]),
        )
        .await;
        mock_issue_with_links(
            &mut server,
            "PROJ-2",
            json!([{"id": "9001", "type": {"name": "Blocks"}, "inwardIssue": {"key": "PROJ-1"}}]),
        )
        .await;

        let transport = test_transport(&server);
        let tracker = TrackerApi::new(&transport);
        tracker
            .link_issues("PROJ-1", "PROJ-2", "Blocks")
            .await
            .unwrap();

        let one = tracker.get_issue("PROJ-1").await.unwrap();
        assert_eq!(one.links.len(), 1);
        assert_eq!(one.links[0].link_type, "Blocks");
        assert_eq!(one.links[0].direction, "outward");
        assert_eq!(one.links[0].key, "PROJ-2");

        let two = tracker.get_issue("PROJ-2").await.unwrap();
        assert_eq!(two.links[0].direction, "inward");
        assert_eq!(two.links[0].key, "PROJ-1");
    }

    #[tokio::test]
    async fn test_unlink_without_link_reports_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-1")
            .match_query(Matcher::UrlEncoded("fields".into(), "issuelinks".into()))
            .with_status(200)
            .with_body(
                json!({"key": "PROJ-1", "fields": {"summary": "x", "issuelinks": []}}).to_string(),
            )
            .create_async()
            .await;

        let transport = test_transport(&server);
        let err = TrackerApi::new(&transport)
            .unlink_issues("PROJ-1", "PROJ-2")
            .await
            .unwrap_err();

        assert!(matches!(err, Fault::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unlink_deletes_discovered_link_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-1")
            .match_query(Matcher::UrlEncoded("fields".into(), "issuelinks".into()))
            .with_status(200)
            .with_body(
                json!({
                    "key": "PROJ-1",
                    "fields": {
                        "summary": "x",
                        "issuelinks": [{
                            "id": "9001",
                            "type": {"name": "Blocks"},
                            "outwardIssue": {"key": "PROJ-2"}
                        }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/rest/api/2/issueLink/9001")
            .with_status(204)
            .create_async()
            .await;

        let transport = test_transport(&server);
        TrackerApi::new(&transport)
            .unlink_issues("PROJ-1", "PROJ-2")
            .await
            .unwrap();

        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_version_delete_moves_dependent_issues() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/rest/api/2/version/10000")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("moveFixIssuesTo".into(), "10001".into()),
                Matcher::UrlEncoded("moveAffectedIssuesTo".into(), "10001".into()),
            ]))
            .with_status(204)
            .create_async()
            .await;

        let transport = test_transport(&server);
        TrackerApi::new(&transport)
            .delete_version("10000", Some("10001"), Some("10001"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_issue_merges_remote_links() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-1")
            .match_query(Matcher::UrlEncoded("fields".into(), "*all".into()))
            .with_status(200)
            .with_body(issue_json("PROJ-1").to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/rest/api/2/issue/PROJ-1/remotelink")
            .with_status(200)
            .with_body(
                json!([
                    {"id": 1, "object": {"url": "https://docs.example.com", "title": "Design doc"}}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let transport = test_transport(&server);
        let issue = TrackerApi::new(&transport)
            .get_issue("PROJ-1")
            .await
            .unwrap();

        assert_eq!(issue.key, "PROJ-1");
        assert_eq!(issue.remote_links.len(), 1);
        assert_eq!(issue.remote_links[0].url, "https://docs.example.com");
    }
}
