use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::{Client, NoProxy, Proxy, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FetchError;
use crate::progress::ProgressReporter;
use crate::target::{api_url, DownloadTarget};

/// Lazy sequence of received chunks; each chunk's length drives progress.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

/// Talks to the PaperMC API and streams artifacts to disk.
pub struct Downloader {
    /// API root, e.g. `https://api.papermc.io/v2/`.
    pub api_base: String,
    /// Connect and per-read timeout.
    pub timeout: Duration,
    /// Optional HTTP proxy URL.
    pub proxy: Option<String>,
    /// Draw the progress indicator while downloading.
    pub show_progress: bool,
}

#[derive(Deserialize)]
struct ProjectResponse {
    versions: Vec<String>,
}

#[derive(Deserialize)]
struct VersionResponse {
    builds: Vec<u32>,
}

/// What a finished download left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// Declared `Content-Length`, 0 when the server sent none.
    pub content_length: u64,
}

impl Downloader {
    /// Create a downloader with default settings.
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_owned(),
            timeout: Duration::from_secs(60),
            proxy: None,
            show_progress: true,
        }
    }

    /// Build an HTTP client, optionally with proxy support.
    fn build_client(&self) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(self.timeout)
            .read_timeout(self.timeout)
            .user_agent(concat!("paperfetch/", env!("CARGO_PKG_VERSION")));
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(Proxy::all(proxy_url)?.no_proxy(NoProxy::from_env()));
        }
        builder.build()
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        tracing::debug!(%url, "GET");
        let client = self
            .build_client()
            .map_err(|e| FetchError::transport(url, e))?;
        client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }

    /// List the versions of `project`, oldest first.
    pub async fn fetch_versions(&self, project: &str) -> Result<Vec<String>, FetchError> {
        let url = api_url(&self.api_base, &format!("projects/{project}"));
        let resp = self.get(&url).await?;
        check_status(&url, &resp)?;

        let project_info: ProjectResponse = read_json(&url, resp).await?;
        if project_info.versions.is_empty() {
            return Err(FetchError::parse(&url, "no versions listed"));
        }
        tracing::debug!(count = project_info.versions.len(), "versions listed");
        Ok(project_info.versions)
    }

    /// List the builds of `project` at `version`, oldest first.
    pub async fn fetch_builds(&self, project: &str, version: &str) -> Result<Vec<u32>, FetchError> {
        let url = api_url(&self.api_base, &format!("projects/{project}/versions/{version}"));
        let resp = self.get(&url).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::UnknownVersion {
                project: project.to_owned(),
                version: version.to_owned(),
            });
        }
        check_status(&url, &resp)?;

        let version_info: VersionResponse = read_json(&url, resp).await?;
        if version_info.builds.is_empty() {
            return Err(FetchError::parse(&url, format!("no builds listed for {version}")));
        }
        tracing::debug!(count = version_info.builds.len(), %version, "builds listed");
        Ok(version_info.builds)
    }

    /// Start the artifact download for `target`.
    ///
    /// Returns the declared content length (0 if unknown) and the chunk stream.
    pub async fn stream_download(
        &self,
        target: &DownloadTarget,
    ) -> Result<(u64, ChunkStream), FetchError> {
        let url = target.url.as_str();
        let resp = self.get(url).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::UnknownBuild {
                project: target.project.clone(),
                version: target.version.clone(),
                build: target.build.clone(),
            });
        }
        check_status(url, &resp)?;

        let total = resp.content_length().unwrap_or(0);
        let src = url.to_owned();
        let stream = resp
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| FetchError::transport(&src, e)));

        Ok((total, Box::pin(stream)))
    }

    /// Stream `target` into `dest/<file_name>`, overwriting any existing file.
    ///
    /// A failure part-way leaves the partial file on disk.
    pub async fn download(
        &self,
        target: &DownloadTarget,
        dest: &Path,
    ) -> Result<DownloadReport, FetchError> {
        let (total, mut stream) = self.stream_download(target).await?;

        let path = dest.join(&target.file_name);
        tracing::debug!(path = %path.display(), total, "writing artifact");
        let io_err = |source| FetchError::FileIo {
            path: path.clone(),
            source,
        };
        let mut file = File::create(&path).map_err(io_err)?;

        let progress = ProgressReporter::new(total, &target.file_name, self.show_progress);
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.inspect_err(|e| {
                tracing::warn!(error = %e, written = progress.position(), "download aborted");
            })?;
            file.write_all(&chunk).map_err(io_err)?;
            progress.advance(chunk.len() as u64);
        }
        progress.finish();

        Ok(DownloadReport {
            path: path.clone(),
            bytes_written: progress.position(),
            content_length: total,
        })
    }
}

async fn read_json<T: DeserializeOwned>(url: &str, resp: Response) -> Result<T, FetchError> {
    let body = resp.text().await.map_err(|e| FetchError::transport(url, e))?;
    serde_json::from_str(&body).map_err(|e| FetchError::parse(url, e.to_string()))
}

fn check_status(url: &str, resp: &Response) -> Result<(), FetchError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            url: url.to_owned(),
            status,
        })
    }
}
