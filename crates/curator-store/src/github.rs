//! The GitHub-backed content store: authenticated reads and writes go
//! through the Contents API (content + sha per document), anonymous reads
//! fall back to plain fetches of the same files from a raw/static host.

use curator_types::{Bucket, CollectionDocument, Revision};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::DocumentStore;
use crate::encoding;
use crate::error::StoreError;

const USER_AGENT: &str = concat!("curator/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Where the collection documents live and how to reach them.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API root, e.g. `https://api.github.com`.
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    /// Directory inside the repository holding the collection documents.
    pub data_dir: String,
    /// Anonymous fallback root serving the same documents — the raw branch
    /// URL or the published site.
    pub raw_base: String,
    /// Write credential. Absent means read-only: API reads are skipped and
    /// writes fail fast.
    pub token: Option<String>,
}

pub struct GithubContentStore {
    client: reqwest::Client,
    config: StoreConfig,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    content: PutContentsFile,
}

#[derive(Debug, Deserialize)]
struct PutContentsFile {
    sha: String,
}

impl GithubContentStore {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        // GitHub rejects agent-less requests outright.
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    fn contents_url(&self, bucket: Bucket) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}/{}",
            self.config.api_base,
            self.config.owner,
            self.config.repo,
            self.config.data_dir,
            bucket.filename()
        )
    }

    fn raw_url(&self, bucket: Bucket) -> String {
        // Cache-busted per call: the fallback hosts cache aggressively and a
        // moderation console must not show minutes-old data after a write.
        format!(
            "{}/{}/{}?t={}",
            self.config.raw_base,
            self.config.data_dir,
            bucket.filename(),
            chrono::Utc::now().timestamp_millis()
        )
    }

    fn auth_header(&self) -> Result<String, StoreError> {
        let token = self.config.token.as_deref().ok_or(StoreError::Unauthorized)?;
        Ok(format!("token {token}"))
    }

    /// Authenticated read of a document plus its current revision.
    async fn fetch_contents(
        &self,
        bucket: Bucket,
    ) -> Result<(CollectionDocument, Revision), StoreError> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .get(self.contents_url(bucket))
            .header("Authorization", auth)
            .header("Accept", ACCEPT)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, bucket.filename()));
        }
        let body: ContentsResponse = response.json().await?;
        let json = encoding::decode_document(&body.content)?;
        Ok((parse_document(&json)?, Revision(body.sha)))
    }

    /// Current revision of the target document. `None` when the document
    /// does not exist yet — the write then creates it.
    async fn fetch_revision(&self, bucket: Bucket) -> Result<Option<Revision>, StoreError> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .get(self.contents_url(bucket))
            .header("Authorization", auth)
            .header("Accept", ACCEPT)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status(status, bucket.filename()));
        }
        #[derive(Deserialize)]
        struct ShaOnly {
            sha: String,
        }
        let body: ShaOnly = response.json().await?;
        Ok(Some(Revision(body.sha)))
    }

    /// Anonymous fallback: plain JSON fetch, no credential, no revision.
    async fn fetch_raw(&self, bucket: Bucket) -> Result<CollectionDocument, StoreError> {
        let response = self.client.get(self.raw_url(bucket)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, bucket.filename()));
        }
        let text = response.text().await?;
        parse_document(&text)
    }
}

impl DocumentStore for GithubContentStore {
    fn can_write(&self) -> bool {
        self.config.token.is_some()
    }

    async fn read(&self, bucket: Bucket) -> (CollectionDocument, Option<Revision>) {
        if self.config.token.is_some() {
            match self.fetch_contents(bucket).await {
                Ok((document, revision)) => return (document, Some(revision)),
                Err(err) => {
                    warn!(bucket = %bucket, %err, "contents API read failed, trying raw fallback")
                }
            }
        }
        match self.fetch_raw(bucket).await {
            Ok(document) => (document, None),
            Err(err) => {
                warn!(bucket = %bucket, %err, "raw read failed, degrading to empty document");
                (CollectionDocument::empty(), None)
            }
        }
    }

    async fn write(
        &self,
        bucket: Bucket,
        document: &CollectionDocument,
    ) -> Result<Revision, StoreError> {
        if !self.can_write() {
            return Err(StoreError::Unauthorized);
        }
        // Fresh revision immediately before the PUT: the backend compares it
        // against the stored document and rejects the write if someone else
        // got there first.
        let revision = self.fetch_revision(bucket).await?;
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        let body = PutContentsRequest {
            message: format!("Admin: Update {}", bucket.filename()),
            content: encoding::encode_document(&json),
            sha: revision.as_ref().map(Revision::as_str),
        };
        let auth = self.auth_header()?;
        let response = self
            .client
            .put(self.contents_url(bucket))
            .header("Authorization", auth)
            .header("Accept", ACCEPT)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_status(status, bucket.filename()));
        }
        let put: PutContentsResponse = response.json().await?;
        debug!(bucket = %bucket, revision = %put.content.sha, "document written");
        Ok(Revision(put.content.sha))
    }
}

fn parse_document(json: &str) -> Result<CollectionDocument, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::InvalidDocument(e.to_string()))
}

fn map_status(status: StatusCode, path: &str) -> StoreError {
    match status.as_u16() {
        401 | 403 => StoreError::Unauthorized,
        404 => StoreError::NotFound(path.to_string()),
        // The contents API answers a sha mismatch with 409, and some
        // deployments surface it as 422.
        409 | 422 => StoreError::Conflict(path.to_string()),
        s => StoreError::Backend {
            path: path.to_string(),
            status: s,
        },
    }
}
