use std::path::PathBuf;

use clap::Parser;

use crate::api::{Api, ProjectApi, DEFAULT_API_BASE, DEFAULT_PROJECT};

/// Pick a PaperMC version and build, then download its server jar
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// PaperMC API root
    #[arg(long, env = "PAPERFETCH_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Project to download (paper, folia, velocity, waterfall)
    #[arg(long, default_value = DEFAULT_PROJECT)]
    pub project: String,

    /// Directory the jar is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Download without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Connect and read timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// HTTP/HTTPS proxy URL (defaults to HTTP_PROXY / HTTPS_PROXY)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Hide the download progress indicator
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Build the configured flow.
    pub fn into_api(self) -> ProjectApi {
        let mut api = Api::new()
            .set_api_base(&self.api_base)
            .set_output_dir(self.output)
            .set_timeout_secs(self.timeout);
        if let Some(proxy) = &self.proxy {
            api = api.set_proxy(proxy);
        }
        if self.yes {
            api = api.assume_yes();
        }
        if self.no_progress {
            api = api.no_progress();
        }
        api.project(&self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["paperfetch"]).unwrap();
        assert_eq!(args.project, "paper");
        assert_eq!(args.output, PathBuf::from("."));
        assert_eq!(args.timeout, 60);
        assert!(!args.yes);
        assert!(!args.no_progress);
        assert!(args.proxy.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "paperfetch",
            "--api-base",
            "http://localhost:9000/v2",
            "--project",
            "velocity",
            "-o",
            "/srv/mc",
            "-y",
            "--timeout",
            "15",
            "--no-progress",
        ])
        .unwrap();

        assert_eq!(args.api_base, "http://localhost:9000/v2");
        assert_eq!(args.project, "velocity");
        assert_eq!(args.output, PathBuf::from("/srv/mc"));
        assert!(args.yes);
        assert_eq!(args.timeout, 15);
        assert!(args.no_progress);
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(Args::try_parse_from(["paperfetch", "--timeout", "soon"]).is_err());
    }
}
