use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use console::style;

use crate::downloader::{DownloadReport, Downloader};
use crate::error::FetchError;
use crate::prompt::Prompter;
use crate::target::DownloadTarget;

/// Public PaperMC API root.
pub const DEFAULT_API_BASE: &str = "https://api.papermc.io/v2/";

/// Project fetched when none is named.
pub const DEFAULT_PROJECT: &str = "paper";

// ──────────────────────────────────────────────────────────────────────────────
// Api
// ──────────────────────────────────────────────────────────────────────────────

/// Top-level entry-point with a chainable builder API.
///
/// # Example
/// ```rust,no_run
/// use paperfetch::{Api, Prompter};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let stdin = std::io::stdin();
///     let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
///     Api::new()
///         .set_output_dir("./server")
///         .project("paper")
///         .run(&mut prompter)
///         .await
///         .unwrap();
/// }
/// ```
pub struct Api {
    api_base: String,
    output_dir: PathBuf,
    timeout: Duration,
    proxy: Option<String>,
    show_progress: bool,
    assume_yes: bool,
}

impl Api {
    /// Create a new `Api` with sensible defaults.
    ///
    /// Proxy is read from `HTTP_PROXY` / `HTTPS_PROXY` environment variables.
    pub fn new() -> Self {
        let proxy = std::env::var("HTTP_PROXY")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| std::env::var("HTTPS_PROXY").ok().filter(|s| !s.is_empty()));

        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            output_dir: PathBuf::from("."),
            timeout: Duration::from_secs(60),
            proxy,
            show_progress: true,
            assume_yes: false,
        }
    }

    /// Point at another API root (builder).
    pub fn set_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_owned();
        self
    }

    /// Set the directory the jar is written to (builder).
    pub fn set_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the connect/read timeout in seconds (builder).
    pub fn set_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set an explicit HTTP/HTTPS proxy URL (builder).
    pub fn set_proxy(mut self, proxy: &str) -> Self {
        self.proxy = Some(proxy.to_owned());
        self
    }

    /// Disable progress output (builder).
    pub fn no_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Download without asking for confirmation (builder).
    pub fn assume_yes(mut self) -> Self {
        self.assume_yes = true;
        self
    }

    /// Select a PaperMC project and return a [`ProjectApi`].
    pub fn project(self, project: &str) -> ProjectApi {
        ProjectApi {
            api: self,
            project: project.to_owned(),
        }
    }

    fn downloader(&self) -> Downloader {
        Downloader {
            api_base: self.api_base.clone(),
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            show_progress: self.show_progress,
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// ProjectApi
// ──────────────────────────────────────────────────────────────────────────────

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Downloaded(DownloadReport),
    /// The user declined the download. Nothing was written.
    Cancelled,
}

/// Builder after a project has been chosen.
pub struct ProjectApi {
    api: Api,
    project: String,
}

impl ProjectApi {
    /// Walk the user through version and build selection, then download.
    ///
    /// The sequence is fixed: list versions, pick one, list its builds,
    /// pick one, confirm, stream the jar into the output directory.
    /// Any error aborts the run where it happens; a download that fails
    /// part-way leaves its partial file behind.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Outcome, FetchError> {
        let downloader = self.api.downloader();
        let project = self.project.as_str();

        let versions = downloader.fetch_versions(project).await?;
        let version = prompter.choose(
            "version",
            &format!("Choose a version of {project}"),
            &versions,
        )?;

        let builds: Vec<String> = downloader
            .fetch_builds(project, &version)
            .await?
            .iter()
            .map(u32::to_string)
            .collect();
        let build = prompter.choose(
            "build",
            &format!("Choose a build of {project} {version}"),
            &builds,
        )?;

        let target = DownloadTarget::new(&self.api.api_base, project, &version, &build);
        tracing::debug!(url = %target.url, "selected artifact");

        if !self.api.assume_yes
            && !prompter.confirm(&format!("Do you wish to download {}?", target.file_name), true)?
        {
            prompter.say(style("Download canceled!").red().to_string())?;
            tracing::info!(file = %target.file_name, "download declined");
            return Ok(Outcome::Cancelled);
        }

        let report = downloader.download(&target, &self.api.output_dir).await?;
        prompter.say(format!(
            "{} Saved to {}",
            style("Download complete!").green(),
            report.path.display()
        ))?;
        tracing::info!(path = %report.path.display(), bytes = report.bytes_written, "download complete");

        Ok(Outcome::Downloaded(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let api = Api::new();
        assert_eq!(api.api_base, DEFAULT_API_BASE);
        assert_eq!(api.output_dir, PathBuf::from("."));
        assert_eq!(api.timeout, Duration::from_secs(60));
        assert!(api.show_progress);
        assert!(!api.assume_yes);
    }

    #[test]
    fn test_builder_settings_reach_downloader() {
        let dl = Api::new()
            .set_api_base("http://localhost:8080/v2")
            .set_timeout_secs(5)
            .set_proxy("http://proxy:3128")
            .no_progress()
            .downloader();

        assert_eq!(dl.api_base, "http://localhost:8080/v2");
        assert_eq!(dl.timeout, Duration::from_secs(5));
        assert_eq!(dl.proxy.as_deref(), Some("http://proxy:3128"));
        assert!(!dl.show_progress);
    }
}
