//! # paperfetch
//!
//! Interactive downloader for PaperMC server jars. Lists the versions and
//! builds published on the PaperMC API, lets the user pick one and streams
//! the jar to disk with a progress indicator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paperfetch::{Api, Outcome, Prompter};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let stdin = std::io::stdin();
//!     let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
//!     match Api::new().project("paper").run(&mut prompter).await {
//!         Ok(Outcome::Downloaded(report)) => println!("{}", report.path.display()),
//!         Ok(Outcome::Cancelled) => {}
//!         Err(e) => eprintln!("error: {e}"),
//!     }
//! }
//! ```

pub mod api;
pub mod cli;
pub mod downloader;
pub mod error;
pub mod progress;
pub mod prompt;
pub mod target;

pub use api::{Api, Outcome, ProjectApi};
pub use downloader::{DownloadReport, Downloader};
pub use error::FetchError;
pub use progress::ProgressReporter;
pub use prompt::Prompter;
pub use target::DownloadTarget;
