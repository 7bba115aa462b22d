//! Menu sources: where the forest comes from.
//!
//! A source delivers the whole menu once, fully materialized, before any
//! checkbox can be toggled.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::{is_url, Settings};
use crate::domain::{Forest, Node};
use crate::infrastructure::{InfraError, InfraResult};

/// Supplies a menu forest.
pub trait MenuSource {
    /// Human readable origin, used in messages.
    fn describe(&self) -> String;

    /// Retrieve and decode the menu.
    fn fetch(&self) -> InfraResult<Forest>;
}

/// Accepted top-level JSON shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    Forest(Vec<Node>),
    Single(Node),
}

/// Decode a JSON menu document: an array of roots, or a single root object.
pub fn decode_menu(text: &str, context: &str) -> InfraResult<Forest> {
    let doc: MenuDocument = serde_json::from_str(text).map_err(|e| InfraError::Decode {
        context: context.to_string(),
        source: e,
    })?;
    let forest = match doc {
        MenuDocument::Forest(roots) => Forest::new(roots),
        MenuDocument::Single(root) => Forest::new(vec![root]),
    };
    debug!("decoded {} menu entries from {}", forest.len(), context);
    Ok(forest)
}

/// Menu stored as a JSON file; the path `-` reads stdin.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

impl MenuSource for FileSource {
    fn describe(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    #[instrument(level = "debug", skip(self), fields(source = %self.describe()))]
    fn fetch(&self) -> InfraResult<Forest> {
        let text = if self.is_stdin() {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| InfraError::io("read menu from stdin", e))?;
            buf
        } else {
            std::fs::read_to_string(&self.path)
                .map_err(|e| InfraError::io(format!("read {}", self.path.display()), e))?
        };
        decode_menu(&text, &self.describe())
    }
}

/// Menu served as JSON by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl MenuSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> InfraResult<Forest> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| InfraError::network(e.to_string()))?;
        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| InfraError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfraError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let body = response
            .text()
            .map_err(|e| InfraError::network(e.to_string()))?;
        decode_menu(&body, &self.url)
    }
}

/// Pick the source implementation for a source spec.
pub fn source_for(spec: &str, settings: &Settings) -> Box<dyn MenuSource> {
    if is_url(spec) {
        Box::new(HttpSource::new(
            spec,
            Duration::from_secs(settings.timeout_secs),
        ))
    } else {
        Box::new(FileSource::new(spec))
    }
}
