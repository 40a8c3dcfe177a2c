/// Source module — fetches the remote listing and groups it.
///
/// [`ListingSource`] is the seam between the network and everything else:
/// [`GitHubSource`] talks to the tree API, tests supply in-memory sources.
pub mod error;
pub mod listing;

pub use error::SourceError;
pub use listing::{ingest, parse_listing, ItemKind, TreeItem, TreeListing};

use crate::config::SourceConfig;
use crate::model::{group_files, GroupedFiles};
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{info, warn};

/// Anything that can produce a grouped listing.
pub trait ListingSource: Send + Sync {
    fn fetch_grouped(&self) -> Result<GroupedFiles, SourceError>;
}

/// Blocking client for the GitHub recursive tree endpoint.
pub struct GitHubSource {
    config: SourceConfig,
    client: reqwest::blocking::Client,
}

impl GitHubSource {
    pub fn new(config: SourceConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self::with_client(config, client)
    }

    /// Use a preconfigured client (proxy, TLS roots, timeouts).
    pub fn with_client(config: SourceConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    /// Issue the single GET and return the raw body.
    fn fetch_body(&self) -> Result<String, SourceError> {
        let url = self.config.tree_url();
        let fetch_err = |source| SourceError::Fetch {
            url: url.clone(),
            source,
        };

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, concat!("specviewer/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(fetch_err)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(fetch_err)
    }
}

impl ListingSource for GitHubSource {
    fn fetch_grouped(&self) -> Result<GroupedFiles, SourceError> {
        fetch_grouped_with(&self.config, || self.fetch_body())
    }
}

/// Fetch the listing for `config` and group it, blocking the caller.
///
/// For callers without a UI thread to keep responsive. The GUI goes
/// through [`crate::snapshot::start_fetch`] instead.
pub fn fetch_grouped(config: &SourceConfig) -> Result<GroupedFiles, SourceError> {
    GitHubSource::new(config.clone()).fetch_grouped()
}

/// Parse, ingest, and group a body produced by `fetch`.
pub fn fetch_grouped_with<F>(config: &SourceConfig, fetch: F) -> Result<GroupedFiles, SourceError>
where
    F: FnOnce() -> Result<String, SourceError>,
{
    info!("Fetching listing for {}", config.slug());
    let body = fetch()?;
    let listing = parse_listing(&body)?;
    if listing.truncated {
        warn!("Listing for {} was truncated by the server", config.slug());
    }

    let grouped = group_files(ingest(&listing, config));
    info!(
        "Listed {} files in {} groups",
        grouped.file_count(),
        grouped.group_count()
    );
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNGROUPED_KEY;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Answer one request on a local port with `response` and return the
    /// base URL plus a handle yielding the request head.
    fn serve_once(response: String) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            head
        });
        (base, handle)
    }

    fn local_source(api_base: String) -> GitHubSource {
        // Bypass any proxy from the environment; the server is on loopback.
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .no_proxy()
            .build()
            .unwrap();
        let config = SourceConfig {
            api_base,
            ..SourceConfig::default()
        };
        GitHubSource::with_client(config, client)
    }

    #[test]
    fn test_http_success_is_grouped() {
        let body = r#"{ "tree": [ { "path": "src/aws/s3.ts", "type": "blob", "size": 7 } ] }"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let (base, server) = serve_once(response);

        let grouped = local_source(base).fetch_grouped().unwrap();
        assert_eq!(grouped.get("aws").unwrap()[0].path(), "aws/s3");

        let head = server.join().unwrap().to_lowercase();
        assert!(head.starts_with("get /repos/withfig/autocomplete/git/trees/master?recursive=1 "));
        assert!(head.contains("user-agent: specviewer/"));
        assert!(head.contains("accept: application/vnd.github+json"));
    }

    #[test]
    fn test_http_error_status_is_status_error() {
        let (base, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        );

        let err = local_source(base).fetch_grouped().unwrap_err();
        assert!(err.is_fetch());
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
        assert!(err.to_string().ends_with("returned HTTP 503"));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_endpoint_is_fetch_error() {
        // Bind then release a port so nothing is listening on it.
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let err = local_source(format!("http://{addr}"))
            .fetch_grouped()
            .unwrap_err();
        assert!(err.is_fetch());
        assert!(matches!(err, SourceError::Fetch { .. }));
    }

    #[test]
    fn test_fetch_grouped_with_body() {
        let body = r#"{ "tree": [
            { "path": "src/aws/amplify.ts", "type": "blob", "size": 2048 },
            { "path": "src/git.ts", "type": "blob", "size": 512 }
        ] }"#;
        let grouped =
            fetch_grouped_with(&SourceConfig::default(), || Ok(body.to_string())).unwrap();
        assert_eq!(grouped.get("aws").unwrap()[0].path(), "aws/amplify");
        assert_eq!(grouped.get(UNGROUPED_KEY).unwrap()[0].path(), "git");
    }

    #[test]
    fn test_fetch_error_propagates() {
        let result = fetch_grouped_with(&SourceConfig::default(), || {
            Err(SourceError::Status {
                url: "u".into(),
                status: 503,
            })
        });
        assert!(result.unwrap_err().is_fetch());
    }

    #[test]
    fn test_bad_body_is_parse_error() {
        let result = fetch_grouped_with(&SourceConfig::default(), || Ok("[]".to_string()));
        assert!(result.unwrap_err().is_parse());
    }

    #[test]
    fn test_blocking_fetch_grouped_reports_fetch_class() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let config = SourceConfig {
            api_base: format!("http://{addr}"),
            request_timeout: Duration::from_secs(10),
            ..SourceConfig::default()
        };
        assert!(fetch_grouped(&config).unwrap_err().is_fetch());
    }
}
