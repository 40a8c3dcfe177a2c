/// Source configuration — which repository is listed and how paths are
/// trimmed.
///
/// Defaults point at the upstream autocomplete repository. Deployments can
/// override the repository coordinates and refresh interval through
/// `SPECVIEWER_*` environment variables; nothing else reads the
/// environment.
use crate::model::UNGROUPED_KEY;
use std::time::Duration;
use tracing::warn;

/// Default freshness window for a fetched snapshot.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_OWNER: &str = "SPECVIEWER_OWNER";
pub const ENV_REPO: &str = "SPECVIEWER_REPO";
pub const ENV_BRANCH: &str = "SPECVIEWER_BRANCH";
pub const ENV_API_BASE: &str = "SPECVIEWER_API_BASE";
pub const ENV_REFRESH_SECS: &str = "SPECVIEWER_REFRESH_SECS";

/// Where the listing comes from and how its paths are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// GitHub API root, without trailing slash.
    pub api_base: String,
    /// Web root used for outbound links.
    pub web_base: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Required leading path segment, including the trailing `/`.
    pub prefix: String,
    /// Extension stripped from file names, including the dot.
    pub suffix: String,
    /// How long a snapshot is served before a refresh may re-fetch.
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            web_base: "https://github.com".to_string(),
            owner: "withfig".to_string(),
            repo: "autocomplete".to_string(),
            branch: "master".to_string(),
            prefix: "src/".to_string(),
            suffix: ".ts".to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Defaults overlaid with any `SPECVIEWER_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup. Empty values are ignored; an
    /// unparsable refresh interval keeps the current one.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(owner) = get(ENV_OWNER) {
            self.owner = owner;
        }
        if let Some(repo) = get(ENV_REPO) {
            self.repo = repo;
        }
        if let Some(branch) = get(ENV_BRANCH) {
            self.branch = branch;
        }
        if let Some(api_base) = get(ENV_API_BASE) {
            self.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get(ENV_REFRESH_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.refresh_interval = Duration::from_secs(secs),
                Err(e) => warn!("Ignoring {ENV_REFRESH_SECS}={secs:?}: {e}"),
            }
        }
        self
    }

    /// `owner/repo`, as shown in the header.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Recursive tree listing endpoint for the configured branch.
    pub fn tree_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, self.owner, self.repo, self.branch
        )
    }

    /// Repository home page.
    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", self.web_base, self.owner, self.repo)
    }

    /// Browser link for a group folder. The ungrouped bucket links to the
    /// prefix root.
    pub fn group_url(&self, key: &str) -> String {
        let dir = if key == UNGROUPED_KEY { "" } else { key };
        format!("{}/tree/{}/{}{}", self.repo_url(), self.branch, self.prefix, dir)
    }

    /// Browser link for one spec file, given its display path.
    pub fn file_url(&self, path: &str) -> String {
        format!(
            "{}/tree/{}/{}{}{}",
            self.repo_url(),
            self.branch,
            self.prefix,
            path,
            self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_tree_url() {
        assert_eq!(
            SourceConfig::default().tree_url(),
            "https://api.github.com/repos/withfig/autocomplete/git/trees/master?recursive=1"
        );
    }

    #[test]
    fn test_overrides_apply() {
        let config = SourceConfig::default().with_overrides(lookup(&[
            (ENV_OWNER, "acme"),
            (ENV_REPO, "specs"),
            (ENV_BRANCH, "main"),
            (ENV_API_BASE, "http://localhost:8080/"),
            (ENV_REFRESH_SECS, "5"),
        ]));
        assert_eq!(config.slug(), "acme/specs");
        assert_eq!(
            config.tree_url(),
            "http://localhost:8080/repos/acme/specs/git/trees/main?recursive=1"
        );
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_and_invalid_overrides_are_ignored() {
        let config = SourceConfig::default()
            .with_overrides(lookup(&[(ENV_OWNER, "  "), (ENV_REFRESH_SECS, "soon")]));
        assert_eq!(config.owner, "withfig");
        assert_eq!(config.refresh_interval, DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn test_links() {
        let config = SourceConfig::default();
        assert_eq!(
            config.group_url("aws"),
            "https://github.com/withfig/autocomplete/tree/master/src/aws"
        );
        assert_eq!(
            config.group_url(UNGROUPED_KEY),
            "https://github.com/withfig/autocomplete/tree/master/src/"
        );
        assert_eq!(
            config.file_url("aws/amplify"),
            "https://github.com/withfig/autocomplete/tree/master/src/aws/amplify.ts"
        );
    }
}
