//! GraphQL transport for the public character API.
//!
//! The schema is owned by the upstream service and treated as a fixed
//! external contract: one parameterized query taking `page` and `filter`,
//! returning page info plus a list of characters.

use crate::config::TuiConfig;
use crate::query::{CharacterGender, CharacterStatus, RequestDescriptor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CHARACTERS_QUERY: &str = "\
query Characters($page: Int, $filter: FilterCharacter) {
  characters(page: $page, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      image
      status
      species
      gender
      origin { name }
      location { name }
    }
  }
}";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedPlace {
    pub name: String,
}

/// Read-only character record as supplied by the API. Display only; the
/// `id` doubles as the render/selection key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub image: String,
    pub status: CharacterStatus,
    pub species: String,
    pub gender: CharacterGender,
    pub origin: Option<NamedPlace>,
    pub location: Option<NamedPlace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CharactersPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a RequestDescriptor,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<CharactersData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct CharactersData {
    characters: Option<CharactersPage>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.graphql_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Execute the characters query for one request descriptor.
    pub async fn characters(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<CharactersPage, ApiClientError> {
        let body = GraphQlRequest {
            query: CHARACTERS_QUERY,
            variables: descriptor,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let envelope = response.json::<GraphQlResponse>().await?;
        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(ApiClientError::Query(message));
            }
        }

        envelope
            .data
            .and_then(|data| data.characters)
            .ok_or_else(|| {
                ApiClientError::InvalidResponse("missing characters payload".to_string())
            })
    }
}
