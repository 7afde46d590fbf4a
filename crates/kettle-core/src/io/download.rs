//! Streaming HTTP downloads.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{KettleError, Result};

/// GET `url` and stream the body into `dest`, creating or truncating it.
///
/// Anything other than `200 OK` is an error and leaves no file behind.
/// Returns the number of bytes written.
pub async fn download_file(client: &Client, url: &str, dest: &Path) -> Result<u64> {
    tracing::debug!(%url, dest = %dest.display(), "downloading");

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await
        .map_err(|e| KettleError::network("download", e))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(KettleError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let mut file = File::create(dest)
        .await
        .map_err(|e| KettleError::fs("create", dest, e))?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                tokio::fs::remove_file(dest).await.ok();
                return Err(KettleError::network("download", e));
            }
        };
        file.write_all(&chunk)
            .await
            .map_err(|e| KettleError::fs("write", dest, e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| KettleError::fs("flush", dest, e))?;

    tracing::debug!(bytes = written, "download complete");
    Ok(written)
}
