use crate::PromptsProvider;
use async_trait::async_trait;
use promptpad_shared::Prompt;
use reqwest::{Client as ReqwestClient, Error as ReqwestError, Response, header};

#[derive(Clone, Debug)]
pub struct RemoteClient {
    client: ReqwestClient,
    base_url: String,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl RemoteClient {
    /// The service reports failures as plain-text bodies, so a non-success
    /// status is turned into that body verbatim.
    async fn handle_response_error(&self, response: Response) -> Result<Response, String> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            match response.text().await {
                Ok(body) if !body.is_empty() => Err(body),
                Ok(_) => Err(format!("Request failed with status {}", status)),
                Err(e) => Err(e.to_string()),
            }
        }
    }

    pub fn new(config: &ClientConfig) -> Result<Self, String> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&format!("Promptpad/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|e| e.to_string())?,
        );

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PromptsProvider for RemoteClient {
    async fn fetch_prompts(&self) -> Result<Vec<Prompt>, String> {
        let url = format!("{}/api/prompts", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e: ReqwestError| e.to_string())?;

        let response = self.handle_response_error(response).await?;

        let value: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        match serde_json::from_value::<Vec<Prompt>>(value.clone()) {
            Ok(prompts) => Ok(prompts),
            Err(e) => {
                eprintln!("Failed to deserialize response: {}", e);
                eprintln!("Raw response: {}", value);
                Err("Failed to deserialize response".into())
            }
        }
    }

    async fn replace_prompts(&self, prompts: &[Prompt]) -> Result<(), String> {
        let url = format!("{}/api/prompts", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&prompts)
            .send()
            .await
            .map_err(|e: ReqwestError| e.to_string())?;

        self.handle_response_error(response).await?;

        Ok(())
    }
}
