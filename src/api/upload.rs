//
//  atlas-cli
//  api/upload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Attachment Uploader
//!
//! Builds streamed multipart forms for attachment uploads. The local file is
//! validated (exists, is a regular file, is openable) before any request is
//! issued, so a bad path never reaches the network. Content is streamed from
//! disk rather than buffered whole in memory, with the content type guessed
//! from the file name.
//!
//! Both services accept the same form field name (`file`), so one builder
//! serves the tracker and the wiki alike.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio::fs::File;

use super::Fault;

/// Builds the multipart form for an attachment upload.
///
/// # Errors
///
/// [`Fault::InvalidArguments`] when the path does not exist, is not a
/// regular file, has no usable file name, or cannot be opened for reading.
///
/// # Notes
///
/// The returned form streams the file; it can be sent exactly once.
pub async fn attachment_form(path: &Path) -> Result<Form, Fault> {
    let part = file_part(path).await?;
    Ok(Form::new().part("file", part))
}

/// Builds a streamed multipart part for a local file.
///
/// The part carries the file's name, its length (so the services see a
/// sized upload), and a content type guessed from the extension, falling
/// back to `application/octet-stream`.
pub async fn file_part(path: &Path) -> Result<Part, Fault> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Fault::InvalidArguments(format!("cannot read '{}': {}", path.display(), e)))?;

    if !metadata.is_file() {
        return Err(Fault::InvalidArguments(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Fault::InvalidArguments(format!("'{}' has no usable file name", path.display()))
        })?;

    let file = File::open(path)
        .await
        .map_err(|e| Fault::InvalidArguments(format!("cannot open '{}': {}", path.display(), e)))?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::stream_with_length(Body::from(file), metadata.len())
        .file_name(filename)
        .mime_str(mime.essence_str())
        .map_err(|e| Fault::Unknown(format!("invalid attachment content type: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file_is_rejected_locally() {
        let result = attachment_form(Path::new("/definitely/not/here.png")).await;
        match result {
            Err(Fault::InvalidArguments(msg)) => assert!(msg.contains("not/here.png")),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = attachment_form(dir.path()).await;
        match result {
            Err(Fault::InvalidArguments(msg)) => assert!(msg.contains("not a regular file")),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_readable_file_builds_form() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "screenshot bytes").unwrap();

        let form = attachment_form(file.path()).await;
        assert!(form.is_ok());
    }
}
