use super::{BulkSink, BulkSummary};
use crate::record::UploadDocument;
use crate::{Error, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use tracing::{info, warn};

const CLOUD_ID_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Basic auth credentials for the cluster
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Where the cluster can be reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Elastic cloud deployment id, `<name>:<base64 encoded host$es_uuid$kibana_uuid>`
    CloudId(String),
    Url(String),
}

impl Endpoint {
    pub fn base_url(&self) -> Result<String> {
        match self {
            Endpoint::CloudId(cloud_id) => decode_cloud_id(cloud_id),
            Endpoint::Url(url) => Ok(url.trim_end_matches('/').to_string()),
        }
    }
}

/// Get the base url of the elasticsearch instance of a cloud deployment
pub fn decode_cloud_id(cloud_id: &str) -> Result<String> {
    let encoded = match cloud_id.rsplit_once(':') {
        Some((_name, encoded)) => encoded,
        None => cloud_id,
    };
    let decoded = CLOUD_ID_ENGINE
        .decode(encoded)
        .map_err(|e| Error::CloudId(e.to_string()))?;
    let decoded = String::from_utf8(decoded).map_err(|e| Error::CloudId(e.to_string()))?;

    let mut parts = decoded.split('$');
    let host = parts.next().unwrap_or_default();
    let es_uuid = parts.next().unwrap_or_default();
    let (host, host_port) = split_port(host);
    let (es_uuid, es_port) = split_port(es_uuid);
    if host.is_empty() || es_uuid.is_empty() {
        return Err(Error::CloudId(format!(
            "expected host and elasticsearch id, got {:?}",
            decoded
        )));
    }

    // the port on the elasticsearch id takes precedence over the one on the host
    Ok(match es_port.or(host_port) {
        Some(port) => format!("https://{}.{}:{}", es_uuid, host, port),
        None => format!("https://{}.{}", es_uuid, host),
    })
}

fn split_port(segment: &str) -> (&str, Option<&str>) {
    match segment.split_once(':') {
        Some((name, port)) if !port.is_empty() => (name, Some(port)),
        Some((name, _)) => (name, None),
        None => (segment, None),
    }
}

/// Render documents in the newline delimited format of the `_bulk` api
pub fn bulk_body(documents: &[UploadDocument]) -> Result<String> {
    let mut body = String::new();
    for document in documents {
        let action = json!({ "index": { "_index": document.index } });
        body.push_str(&serde_json::to_string(&action)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(document.source)?);
        body.push('\n');
    }
    Ok(body)
}

#[derive(Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<Value>,
}

impl BulkResponse {
    fn failed(&self) -> usize {
        if !self.errors {
            return 0;
        }
        self.items
            .iter()
            .filter_map(Value::as_object)
            .filter(|item| item.values().any(|result| result.get("error").is_some()))
            .count()
    }
}

pub struct ElasticsearchSink {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ElasticsearchSink {
    pub fn new(endpoint: &Endpoint, credentials: Credentials) -> Result<Self> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Self::with_client(client, endpoint, credentials)
    }

    pub fn with_client(
        client: Client,
        endpoint: &Endpoint,
        credentials: Credentials,
    ) -> Result<Self> {
        Ok(ElasticsearchSink {
            client,
            base_url: endpoint.base_url()?,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl BulkSink for ElasticsearchSink {
    fn bulk(&mut self, documents: &[UploadDocument]) -> Result<BulkSummary> {
        let body = bulk_body(documents)?;
        let response = self
            .client
            .post(format!("{}/_bulk", self.base_url))
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::BulkStatus { status, body });
        }

        let response: BulkResponse = response.json()?;
        let summary = BulkSummary {
            documents: documents.len(),
            failed: response.failed(),
        };
        if summary.failed > 0 {
            warn!(
                failed = summary.failed,
                documents = summary.documents,
                "elasticsearch rejected part of the bulk request"
            );
        } else {
            info!(documents = summary.documents, url = %self.base_url, "bulk request accepted");
        }
        Ok(summary)
    }
}
