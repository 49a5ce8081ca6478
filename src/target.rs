/// Join an API base and a path without doubling or dropping the slash.
pub(crate) fn api_url(api_base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// The artifact chosen by the user, derived from project, version and build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub project: String,
    pub version: String,
    pub build: String,
    /// Local filename, e.g. `paper-1.20.2-11.jar`.
    pub file_name: String,
    /// Full download URL on the API.
    pub url: String,
}

impl DownloadTarget {
    pub fn new(api_base: &str, project: &str, version: &str, build: &str) -> Self {
        let file_name = format!("{project}-{version}-{build}.jar");
        let url = api_url(
            api_base,
            &format!("projects/{project}/versions/{version}/builds/{build}/downloads/{file_name}"),
        );

        Self {
            project: project.to_owned(),
            version: version.to_owned(),
            build: build.to_owned(),
            file_name,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_paths() {
        let target = DownloadTarget::new("https://api.papermc.io/v2/", "paper", "1.20.2", "11");
        assert_eq!(target.file_name, "paper-1.20.2-11.jar");
        assert_eq!(
            target.url,
            "https://api.papermc.io/v2/projects/paper/versions/1.20.2/builds/11/downloads/paper-1.20.2-11.jar"
        );
    }

    #[test]
    fn test_api_url_slashes() {
        assert_eq!(api_url("http://h/v2", "projects/paper"), "http://h/v2/projects/paper");
        assert_eq!(api_url("http://h/v2/", "/projects/paper"), "http://h/v2/projects/paper");
    }

    #[test]
    fn test_other_project_names_the_jar_after_itself() {
        let target = DownloadTarget::new("http://h/v2", "velocity", "3.3.0-SNAPSHOT", "400");
        assert_eq!(target.file_name, "velocity-3.3.0-SNAPSHOT-400.jar");
        assert!(target.url.ends_with("/builds/400/downloads/velocity-3.3.0-SNAPSHOT-400.jar"));
    }
}
