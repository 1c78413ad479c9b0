//
//  atlas-cli
//  api/wiki/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Wiki adapter.
//!
//! # Overview
//!
//! [`WikiApi`] maps page, space, label, comment and attachment operations
//! onto the wiki's REST surface under `/wiki/rest/api`. Each method
//! corresponds to one CLI subcommand and returns normalized entities from
//! [`models`]. All requests go through the shared [`Transport`].
//!
//! # Notes
//!
//! - List responses paginate by continuation: the walk follows `_links.next`
//!   until it runs out or a result cap is reached
//! - Page updates re-read the page first and send `version + 1`; a
//!   concurrent edit makes the service reject the write, which surfaces as
//!   a conflict fault

pub mod models;

use std::path::Path;

use crate::api::upload;
use crate::api::{Fault, Transport};

use models::*;

/// Route prefix of the wiki's REST surface.
const ROOT: &str = "/wiki/rest/api";

/// Page size requested when walking uncapped result sets.
const PAGE_SIZE: usize = 50;

/// Expansions for a full page fetch.
const PAGE_EXPAND: &str = "body.storage,version,space,ancestors,metadata.labels";

/// Expansions for list rows.
const SUMMARY_EXPAND: &str = "version,space";

/// Expansions for comments.
const COMMENT_EXPAND: &str = "body.storage,version";

/// Resolves a `_links.next` value against the site root.
///
/// Continuation paths usually arrive relative to the wiki application
/// (`/rest/api/...`); some instances include the context path already.
fn continuation_path(next: &str) -> String {
    if next.starts_with("/wiki/") {
        next.to_string()
    } else {
        format!("/wiki{next}")
    }
}

/// Adapter over the wiki's REST surface.
pub struct WikiApi<'a> {
    transport: &'a Transport,
}

impl<'a> WikiApi<'a> {
    /// Creates an adapter borrowing the shared transport.
    ///
    /// # Parameters
    ///
    /// * `transport` - The shared transport carrying credentials and retries
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Walks a paged content listing, following continuation links.
    ///
    /// The first request asks for no more than the remaining cap; the walk
    /// stops as soon as the cap is reached, so no surplus continuation
    /// request is issued.
    async fn walk_content(
        &self,
        path: &str,
        mut query: Vec<(&'static str, String)>,
        limit: Option<usize>,
    ) -> Result<Vec<ContentBean>, Fault> {
        let page_size = limit.map(|l| l.min(PAGE_SIZE)).unwrap_or(PAGE_SIZE);
        if page_size == 0 {
            return Ok(Vec::new());
        }
        query.push(("limit", page_size.to_string()));

        let mut beans: Vec<ContentBean> = Vec::new();
        let mut page: ContentListResponse = self.transport.get(path, &query).await?;
        loop {
            beans.extend(page.results);

            if let Some(limit) = limit {
                if beans.len() >= limit {
                    beans.truncate(limit);
                    break;
                }
            }

            match page.links.as_ref().and_then(|l| l.next.clone()) {
                Some(next) => {
                    page = self.transport.get(&continuation_path(&next), &[]).await?;
                }
                None => break,
            }
        }
        Ok(beans)
    }

    // -- Pages ---------------------------------------------------------------

    /// Fetches one page with body, labels, version and ancestry.
    ///
    /// # Parameters
    ///
    /// * `id` - The numeric page id; titles are not accepted here
    ///
    /// # Returns
    ///
    /// Returns `Ok(Page)` with the storage-format body included.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, wiki::WikiApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// let page = WikiApi::new(&transport).get_page("98310").await?;
    /// println!("{} (v{})", page.title, page.version);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_page(&self, id: &str) -> Result<Page, Fault> {
        let bean: ContentBean = self
            .transport
            .get(
                &format!("{ROOT}/content/{id}"),
                &[("expand", PAGE_EXPAND.to_string())],
            )
            .await?;
        Ok(Page::from(bean))
    }

    /// Lists the pages of a space.
    ///
    /// # Parameters
    ///
    /// * `space` - The space key, e.g. `DOCS`
    /// * `limit` - Cap on returned rows; `None` walks every result page
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<PageSummary>)` in the service's order, without
    /// bodies.
    pub async fn list_pages(
        &self,
        space: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PageSummary>, Fault> {
        let beans = self
            .walk_content(
                &format!("{ROOT}/content"),
                vec![
                    ("spaceKey", space.to_string()),
                    ("type", "page".to_string()),
                    ("expand", SUMMARY_EXPAND.to_string()),
                ],
                limit,
            )
            .await?;
        Ok(beans.iter().map(PageSummary::from).collect())
    }

    /// Runs a raw CQL query, walking result pages transparently.
    ///
    /// The query string is forwarded verbatim; the service is the only
    /// authority on its syntax.
    ///
    /// # Parameters
    ///
    /// * `cql` - The query, e.g. `space = DOCS and title ~ "setup"`
    /// * `limit` - Cap on returned rows; `None` walks every result page
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<PageSummary>)` with the matches, or an
    /// invalid-arguments fault when the service rejects the query.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, wiki::WikiApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// let rows = WikiApi::new(&transport)
    ///     .search("space = DOCS and label = onboarding", Some(20))
    ///     .await?;
    /// for row in rows {
    ///     println!("{} {}", row.id, row.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(
        &self,
        cql: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PageSummary>, Fault> {
        let beans = self
            .walk_content(
                &format!("{ROOT}/content/search"),
                vec![
                    ("cql", cql.to_string()),
                    ("expand", SUMMARY_EXPAND.to_string()),
                ],
                limit,
            )
            .await?;
        Ok(beans.iter().map(PageSummary::from).collect())
    }

    /// Creates a page, optionally nested under a parent.
    ///
    /// # Parameters
    ///
    /// * `space` - The space to create the page in
    /// * `title` - The page title, unique within the space
    /// * `body` - The body in storage format
    /// * `parent` - Id of the page to nest under; `None` creates at the
    ///   space root
    /// * `status` - `draft` parks the page unpublished; `None` leaves the
    ///   choice to the service, which publishes immediately
    ///
    /// # Returns
    ///
    /// Returns `Ok(Page)` with the id the service assigned, or a conflict
    /// fault when the title is already taken in the space.
    pub async fn create_page(
        &self,
        space: &str,
        title: &str,
        body: &str,
        parent: Option<&str>,
        status: Option<&str>,
    ) -> Result<Page, Fault> {
        let request = ContentRequest {
            id: None,
            content_type: "page".to_string(),
            status: status.map(str::to_string),
            title: Some(title.to_string()),
            space: Some(SpaceKeyPayload {
                key: space.to_string(),
            }),
            ancestors: parent.map(|id| {
                vec![AncestorPayload {
                    id: id.to_string(),
                }]
            }),
            container: None,
            version: None,
            body: Some(BodyPayload::storage(body)),
        };
        let bean: ContentBean = self
            .transport
            .post(&format!("{ROOT}/content?expand={PAGE_EXPAND}"), &request)
            .await?;
        Ok(Page::from(bean))
    }

    /// Updates a page's title and/or body, bumping the version by one.
    ///
    /// The current revision is read first and merged with the changes.
    /// That cycle is not atomic; a concurrent edit surfaces as a conflict.
    ///
    /// # Parameters
    ///
    /// * `id` - The page to update
    /// * `title` - The new title; `None` keeps the current one
    /// * `body` - The new storage-format body; `None` keeps the current one
    ///
    /// # Returns
    ///
    /// Returns `Ok(Page)` at its new version, or a conflict fault when
    /// someone else edited the page between the read and the write.
    pub async fn update_page(
        &self,
        id: &str,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<Page, Fault> {
        let current: ContentBean = self
            .transport
            .get(
                &format!("{ROOT}/content/{id}"),
                &[("expand", PAGE_EXPAND.to_string())],
            )
            .await?;

        let next_version = current.version.as_ref().map(|v| v.number).unwrap_or(0) + 1;
        let merged_body = body.map(str::to_string).or_else(|| {
            current
                .body
                .as_ref()
                .and_then(|b| b.storage.as_ref())
                .map(|s| s.value.clone())
        });

        let request = ContentRequest {
            id: Some(current.id.clone()),
            content_type: "page".to_string(),
            status: None,
            title: Some(title.map(str::to_string).unwrap_or(current.title)),
            space: current.space.map(|s| SpaceKeyPayload { key: s.key }),
            ancestors: None,
            container: None,
            version: Some(VersionPayload {
                number: next_version,
            }),
            body: merged_body.map(|b| BodyPayload::storage(&b)),
        };
        let bean: ContentBean = self
            .transport
            .put(&format!("{ROOT}/content/{id}?expand={PAGE_EXPAND}"), &request)
            .await?;
        Ok(Page::from(bean))
    }

    /// Deletes a page.
    ///
    /// # Parameters
    ///
    /// * `id` - The page to delete; its children move up, not away
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the page is trashed.
    pub async fn delete_page(&self, id: &str) -> Result<(), Fault> {
        self.transport
            .delete(&format!("{ROOT}/content/{id}"), &[])
            .await
    }

    // -- Labels --------------------------------------------------------------

    /// Lists the labels on a page.
    ///
    /// # Parameters
    ///
    /// * `id` - The page whose labels to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<String>)` with the bare label names.
    pub async fn labels(&self, id: &str) -> Result<Vec<String>, Fault> {
        let container: LabelContainerBean = self
            .transport
            .get(&format!("{ROOT}/content/{id}/label"), &[])
            .await?;
        Ok(container.results.into_iter().map(|l| l.name).collect())
    }

    /// Adds labels to a page, returning the labels the service confirmed.
    ///
    /// # Parameters
    ///
    /// * `id` - The page to label
    /// * `names` - Label names to add, all under the `global` prefix
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<String>)` with the full label set after the add.
    pub async fn add_labels(&self, id: &str, names: &[String]) -> Result<Vec<String>, Fault> {
        let payload: Vec<LabelPayload> = names
            .iter()
            .map(|name| LabelPayload {
                prefix: "global".to_string(),
                name: name.clone(),
            })
            .collect();
        let container: LabelContainerBean = self
            .transport
            .post(&format!("{ROOT}/content/{id}/label"), &payload)
            .await?;
        Ok(container.results.into_iter().map(|l| l.name).collect())
    }

    /// Removes a label from a page.
    ///
    /// # Parameters
    ///
    /// * `id` - The page to unlabel
    /// * `name` - The label name to remove
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the label is gone.
    pub async fn remove_label(&self, id: &str, name: &str) -> Result<(), Fault> {
        self.transport
            .delete(&format!("{ROOT}/content/{id}/label/{name}"), &[])
            .await
    }

    // -- Comments ------------------------------------------------------------

    /// Lists the comments on a page, oldest first.
    ///
    /// # Parameters
    ///
    /// * `id` - The page whose comments to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Comment>)` with author, timestamp and rendered body
    /// per comment.
    pub async fn comments(&self, id: &str) -> Result<Vec<Comment>, Fault> {
        let beans = self
            .walk_content(
                &format!("{ROOT}/content/{id}/child/comment"),
                vec![("expand", COMMENT_EXPAND.to_string())],
                None,
            )
            .await?;
        Ok(beans.into_iter().map(Comment::from).collect())
    }

    /// Adds a comment to a page.
    ///
    /// # Parameters
    ///
    /// * `page_id` - The page to comment on
    /// * `body` - The comment body in storage format
    ///
    /// # Returns
    ///
    /// Returns `Ok(Comment)` as the service stored it, with author and
    /// timestamp filled in.
    pub async fn add_comment(&self, page_id: &str, body: &str) -> Result<Comment, Fault> {
        let request = ContentRequest {
            id: None,
            content_type: "comment".to_string(),
            status: None,
            title: None,
            space: None,
            ancestors: None,
            container: Some(ContainerPayload {
                id: page_id.to_string(),
                container_type: "page".to_string(),
            }),
            version: None,
            body: Some(BodyPayload::storage(body)),
        };
        let bean: ContentBean = self
            .transport
            .post(&format!("{ROOT}/content?expand={COMMENT_EXPAND}"), &request)
            .await?;
        Ok(Comment::from(bean))
    }

    // -- Attachments ---------------------------------------------------------

    /// Uploads a file as a page attachment.
    ///
    /// The path is checked locally before any request goes out; the upload
    /// itself streams the file and is never retried.
    ///
    /// # Parameters
    ///
    /// * `id` - The page to attach the file to
    /// * `path` - A readable local file; the attachment keeps its file name
    ///
    /// # Returns
    ///
    /// Returns `Ok(Attachment)` describing the stored file, or an
    /// invalid-arguments fault before any request if the path does not
    /// point at a readable file.
    pub async fn attach(&self, id: &str, path: &Path) -> Result<Attachment, Fault> {
        let form = upload::attachment_form(path).await?;
        let response: ContentListResponse = self
            .transport
            .post_multipart(&format!("{ROOT}/content/{id}/child/attachment"), form)
            .await?;
        response
            .results
            .into_iter()
            .next()
            .map(Attachment::from)
            .ok_or_else(|| Fault::Unknown("attachment upload returned no result".to_string()))
    }

    /// Lists the attachments on a page.
    ///
    /// # Parameters
    ///
    /// * `id` - The page whose attachments to list
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Attachment>)` with name, size and media type per
    /// file.
    pub async fn attachments(&self, id: &str) -> Result<Vec<Attachment>, Fault> {
        let beans = self
            .walk_content(
                &format!("{ROOT}/content/{id}/child/attachment"),
                Vec::new(),
                None,
            )
            .await?;
        Ok(beans.into_iter().map(Attachment::from).collect())
    }

    // -- Hierarchy -----------------------------------------------------------

    /// Lists the direct child pages of a page.
    ///
    /// # Parameters
    ///
    /// * `id` - The parent page
    /// * `limit` - Cap on returned rows; `None` walks every result page
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<PageSummary>)` with the immediate children only;
    /// use [`tree`](Self::tree) for deeper levels.
    pub async fn children(
        &self,
        id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PageSummary>, Fault> {
        let beans = self
            .walk_content(
                &format!("{ROOT}/content/{id}/child/page"),
                vec![("expand", SUMMARY_EXPAND.to_string())],
                limit,
            )
            .await?;
        Ok(beans.iter().map(PageSummary::from).collect())
    }

    /// Walks the page tree under a root, depth first, in sibling order.
    ///
    /// # Parameters
    ///
    /// * `id` - The root page; it appears first, at depth 0
    /// * `max_depth` - Levels below the root to expand; pages at the cap
    ///   are listed but not expanded further
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<TreePage>)` in render order, each entry carrying
    /// its depth.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use atlas_cli::api::{Transport, wiki::WikiApi};
    /// use atlas_cli::config::Credentials;
    ///
    /// # async fn example() -> Result<(), atlas_cli::Fault> {
    /// let transport = Transport::new(Credentials::resolve()?)?;
    /// for entry in WikiApi::new(&transport).tree("98310", 2).await? {
    ///     println!("{}{}", "  ".repeat(entry.depth), entry.title);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn tree(&self, id: &str, max_depth: usize) -> Result<Vec<TreePage>, Fault> {
        let root: ContentBean = self
            .transport
            .get(&format!("{ROOT}/content/{id}"), &[])
            .await?;

        let mut pages: Vec<TreePage> = Vec::new();
        let mut stack: Vec<(String, String, usize)> = vec![(root.id, root.title, 0)];

        while let Some((page_id, title, depth)) = stack.pop() {
            pages.push(TreePage {
                id: page_id.clone(),
                title,
                depth,
            });
            if depth >= max_depth {
                continue;
            }
            let children = self
                .walk_content(
                    &format!("{ROOT}/content/{page_id}/child/page"),
                    vec![("expand", SUMMARY_EXPAND.to_string())],
                    None,
                )
                .await?;
            for child in children.into_iter().rev() {
                stack.push((child.id, child.title, depth + 1));
            }
        }
        Ok(pages)
    }

    // -- Spaces --------------------------------------------------------------

    /// Lists spaces visible to the authenticated user.
    ///
    /// # Parameters
    ///
    /// * `limit` - Cap on returned rows; `None` walks every result page
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Space>)` with key, name and plain-text description
    /// per space.
    pub async fn spaces(&self, limit: Option<usize>) -> Result<Vec<Space>, Fault> {
        let page_size = limit.map(|l| l.min(PAGE_SIZE)).unwrap_or(PAGE_SIZE);
        if page_size == 0 {
            return Ok(Vec::new());
        }

        let mut spaces: Vec<Space> = Vec::new();
        let mut page: SpaceListResponse = self
            .transport
            .get(
                &format!("{ROOT}/space"),
                &[
                    ("limit", page_size.to_string()),
                    ("expand", "description.plain".to_string()),
                ],
            )
            .await?;
        loop {
            spaces.extend(page.results.into_iter().map(Space::from));

            if let Some(limit) = limit {
                if spaces.len() >= limit {
                    spaces.truncate(limit);
                    break;
                }
            }

            match page.links.as_ref().and_then(|l| l.next.clone()) {
                Some(next) => {
                    page = self.transport.get(&continuation_path(&next), &[]).await?;
                }
                None => break,
            }
        }
        Ok(spaces)
    }

    /// Fetches one space by key.
    ///
    /// # Parameters
    ///
    /// * `key` - The space key, e.g. `DOCS`
    ///
    /// # Returns
    ///
    /// Returns `Ok(Space)` with its name and description.
    pub async fn space(&self, key: &str) -> Result<Space, Fault> {
        let bean: SpaceBean = self
            .transport
            .get(
                &format!("{ROOT}/space/{key}"),
                &[("expand", "description.plain".to_string())],
            )
            .await?;
        Ok(Space::from(bean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;

    fn test_transport(server: &mockito::ServerGuard) -> Transport {
        let credentials = Credentials {
            base_url: server.url(),
            email: "dev@example.com".to_string(),
            token: "secret".to_string(),
        };
        Transport::new(credentials).unwrap()
    }

    fn page_json(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "type": "page",
            "status": "current",
            "title": title,
            "space": {"key": "DOCS"},
            "version": {"number": 1}
        })
    }

    #[test]
    fn test_continuation_path_gains_context_prefix_once() {
        assert_eq!(
            continuation_path("/rest/api/content/search?cql=x&start=25"),
            "/wiki/rest/api/content/search?cql=x&start=25"
        );
        assert_eq!(
            continuation_path("/wiki/rest/api/space?start=25"),
            "/wiki/rest/api/space?start=25"
        );
    }

    #[tokio::test]
    async fn test_search_follows_continuation_links() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/wiki/rest/api/content/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("cql".into(), "mycql".into()),
                Matcher::UrlEncoded("limit".into(), "50".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "results": [page_json("1", "First")],
                    "_links": {"next": "/rest/api/content/search?cql=mycql&start=1"}
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/wiki/rest/api/content/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("cql".into(), "mycql".into()),
                Matcher::UrlEncoded("start".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(json!({"results": [page_json("2", "Second")]}).to_string())
            .expect(1)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let rows = WikiApi::new(&transport).search("mycql", None).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "First");
        assert_eq!(rows[1].title, "Second");
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_stops_once_limit_is_reached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/wiki/rest/api/content/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("cql".into(), "mycql".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "results": [page_json("1", "First"), page_json("2", "Second")],
                    "_links": {"next": "/rest/api/content/search?cql=mycql&start=2"}
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let rows = WikiApi::new(&transport)
            .search("mycql", Some(2))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_page_sends_bumped_version() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wiki/rest/api/content/42")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "id": "42",
                    "type": "page",
                    "status": "current",
                    "title": "Old title",
                    "space": {"key": "DOCS"},
                    "version": {"number": 4},
                    "body": {"storage": {"value": "<p>old</p>", "representation": "storage"}}
                })
                .to_string(),
            )
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/wiki/rest/api/content/42")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "id": "42",
                "type": "page",
                "title": "New title",
                "version": {"number": 5},
                "body": {"storage": {"value": "<p>old</p>"}}
            })))
            .with_status(200)
            .with_body(
                json!({
                    "id": "42",
                    "type": "page",
                    "status": "current",
                    "title": "New title",
                    "space": {"key": "DOCS"},
                    "version": {"number": 5}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let transport = test_transport(&server);
        let page = WikiApi::new(&transport)
            .update_page("42", Some("New title"), None)
            .await
            .unwrap();

        assert_eq!(page.version, 5);
        assert_eq!(page.title, "New title");
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_page_nests_under_parent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/wiki/rest/api/content")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({
                "type": "page",
                "title": "Runbook",
                "space": {"key": "DOCS"},
                "ancestors": [{"id": "99"}],
                "body": {"storage": {"representation": "storage"}}
            })))
            .with_status(200)
            .with_body(
                json!({
                    "id": "100",
                    "type": "page",
                    "status": "current",
                    "title": "Runbook",
                    "space": {"key": "DOCS"},
                    "version": {"number": 1},
                    "ancestors": [{"id": "99", "title": "Parent"}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let transport = test_transport(&server);
        let page = WikiApi::new(&transport)
            .create_page("DOCS", "Runbook", "<p>steps</p>", Some("99"), None)
            .await
            .unwrap();

        assert_eq!(page.id, "100");
        assert_eq!(page.parent_id.as_deref(), Some("99"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_tree_walks_depth_first_in_sibling_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wiki/rest/api/content/1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_json("1", "Root").to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/wiki/rest/api/content/1/child/page")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({"results": [page_json("2", "Alpha"), page_json("3", "Beta")]}).to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", "/wiki/rest/api/content/2/child/page")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"results": [page_json("4", "Alpha child")]}).to_string())
            .create_async()
            .await;
        for id in ["3", "4"] {
            server
                .mock("GET", &format!("/wiki/rest/api/content/{id}/child/page")[..])
                .match_query(Matcher::Any)
                .with_status(200)
                .with_body(json!({"results": []}).to_string())
                .create_async()
                .await;
        }

        let transport = test_transport(&server);
        let pages = WikiApi::new(&transport).tree("1", 5).await.unwrap();

        let order: Vec<(&str, usize)> = pages
            .iter()
            .map(|p| (p.title.as_str(), p.depth))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Root", 0),
                ("Alpha", 1),
                ("Alpha child", 2),
                ("Beta", 1)
            ]
        );
    }

    #[tokio::test]
    async fn test_tree_depth_cap_stops_expansion() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/wiki/rest/api/content/1")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_json("1", "Root").to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/wiki/rest/api/content/1/child/page")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"results": [page_json("2", "Alpha")]}).to_string())
            .create_async()
            .await;
        let below_cap = server
            .mock("GET", "/wiki/rest/api/content/2/child/page")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let transport = test_transport(&server);
        let pages = WikiApi::new(&transport).tree("1", 1).await.unwrap();

        assert_eq!(pages.len(), 2);
        below_cap.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_labels_posts_global_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/wiki/rest/api/content/42/label")
            .match_body(Matcher::Json(json!([
                {"prefix": "global", "name": "infra"}
            ])))
            .with_status(200)
            .with_body(json!({"results": [{"prefix": "global", "name": "infra"}]}).to_string())
            .create_async()
            .await;

        let transport = test_transport(&server);
        let labels = WikiApi::new(&transport)
            .add_labels("42", &["infra".to_string()])
            .await
            .unwrap();

        assert_eq!(labels, vec!["infra"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_attach_streams_multipart_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/wiki/rest/api/content/42/child/attachment")
            .match_header("x-atlassian-token", "nocheck")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data".to_string()),
            )
            .with_status(200)
            .with_body(
                json!({
                    "results": [{
                        "id": "att900",
                        "type": "attachment",
                        "title": "notes.txt",
                        "extensions": {"mediaType": "text/plain", "fileSize": 11}
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello wiki\n").unwrap();

        let transport = test_transport(&server);
        let attachment = WikiApi::new(&transport)
            .attach("42", file.path())
            .await
            .unwrap();

        assert_eq!(attachment.id, "att900");
        assert_eq!(attachment.media_type.as_deref(), Some("text/plain"));
        mock.assert_async().await;
    }
}
