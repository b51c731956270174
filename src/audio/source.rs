//! Fetching track sources into memory.
//!
//! Remote tracks (`http`/`https`) are downloaded in full; `file://` URIs and
//! plain paths are read from disk. The audio thread decodes from the
//! returned bytes, which also lets it rebuild sinks for seeking.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;
use url::Url;

use super::error::{EngineError, EngineResult};

/// Upper bound for a downloaded source.
const MAX_REMOTE_BYTES: u64 = 64 * 1024 * 1024;

/// Where a track's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

pub(crate) fn classify(uri: &str) -> EngineResult<SourceLocation> {
    let trimmed = uri.trim();
    let invalid = |reason: String| EngineError::InvalidUri {
        uri: uri.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("empty uri".to_string()));
    }

    match Url::parse(trimmed) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(SourceLocation::Remote(url)),
            "file" => url
                .to_file_path()
                .map(SourceLocation::Local)
                .map_err(|()| invalid("not a local file path".to_string())),
            // Windows drive letters parse as one-letter schemes.
            s if s.len() == 1 => Ok(SourceLocation::Local(PathBuf::from(trimmed))),
            s => Err(invalid(format!("unsupported scheme {s:?}"))),
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Ok(SourceLocation::Local(PathBuf::from(trimmed)))
        }
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// Read the whole source behind `uri`. Blocking; remote reads give up
/// after `timeout`.
pub(crate) fn fetch(uri: &str, timeout: Duration) -> EngineResult<Arc<[u8]>> {
    match classify(uri)? {
        SourceLocation::Remote(url) => fetch_remote(&remote_agent(timeout), &url),
        SourceLocation::Local(path) => {
            let data = fs::read(&path)?;
            debug!("Read {} bytes from {}", data.len(), path.display());
            Ok(data.into())
        }
    }
}

fn remote_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_connect(Some(timeout))
        .timeout_global(Some(timeout))
        .build()
        .into()
}

fn fetch_remote(agent: &Agent, url: &Url) -> EngineResult<Arc<[u8]>> {
    let fetch_error = |reason: String| EngineError::Fetch {
        uri: url.to_string(),
        reason,
    };

    let mut body = agent
        .get(url.as_str())
        .call()
        .map_err(|e| fetch_error(e.to_string()))?
        .into_body();

    let data = body
        .with_config()
        .limit(MAX_REMOTE_BYTES)
        .read_to_vec()
        .map_err(|e| fetch_error(e.to_string()))?;

    debug!("Fetched {} bytes from {url}", data.len());
    Ok(data.into())
}
