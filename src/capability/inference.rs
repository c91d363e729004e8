use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::capability::{
    CapabilityError, EntityRecognizer, EntitySpan, SentimentClassifier, SentimentPrediction,
    Summarizer,
};

/// Client for one model on a hosted-inference endpoint.
///
/// The endpoint decides the task from the model id, so a single request
/// shape (`POST {endpoint}/models/{model}`) serves summarization, sentiment
/// classification and NER. The registry builds one client per model.
pub struct InferenceClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
    model: String,
}

impl InferenceClient {
    pub fn new(
        endpoint: &str,
        token: Option<&str>,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let model = model.trim();
        if model.is_empty() {
            anyhow::bail!("Inference model id is empty");
        }

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .context("Failed to build inference HTTP client")?,
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            model: model.to_string(),
        })
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    async fn post<B, R>(&self, body: &B) -> std::result::Result<R, CapabilityError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let mut request = self.http.post(self.request_url()).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CapabilityError::Unavailable(format!("{}: {}", self.model, e)))?;

        let response = response.error_for_status().map_err(|e| {
            CapabilityError::Unavailable(format!("{} returned an error status: {}", self.model, e))
        })?;

        response
            .json()
            .await
            .map_err(|e| CapabilityError::MalformedOutput(format!("{}: {}", self.model, e)))
    }
}

#[async_trait]
impl Summarizer for InferenceClient {
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> std::result::Result<String, CapabilityError> {
        let body = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                min_length,
                max_length,
                do_sample: false,
            },
        };

        let payload: Vec<SummaryPayload> = self.post(&body).await?;

        payload
            .into_iter()
            .map(|p| p.summary_text.trim().to_string())
            .find(|s| !s.is_empty())
            .ok_or_else(|| {
                CapabilityError::MalformedOutput(format!(
                    "{} response did not contain summary text",
                    self.model
                ))
            })
    }
}

#[async_trait]
impl SentimentClassifier for InferenceClient {
    async fn classify(
        &self,
        text: &str,
    ) -> std::result::Result<SentimentPrediction, CapabilityError> {
        let body = PlainRequest { inputs: text };
        let payload: ClassificationPayload = self.post(&body).await?;

        // Classification endpoints return either a flat label list or one
        // list per input; take the top-ranked label either way.
        let top = match payload {
            ClassificationPayload::Flat(labels) => labels.into_iter().next(),
            ClassificationPayload::Nested(batches) => {
                batches.into_iter().next().and_then(|b| b.into_iter().next())
            }
        };

        top.map(|l| SentimentPrediction {
            label: l.label,
            score: l.score,
        })
        .ok_or_else(|| {
            CapabilityError::MalformedOutput(format!("{} returned no labels", self.model))
        })
    }
}

#[async_trait]
impl EntityRecognizer for InferenceClient {
    async fn recognize(&self, text: &str) -> std::result::Result<Vec<EntitySpan>, CapabilityError> {
        let body = PlainRequest { inputs: text };
        let payload: Vec<EntityPayload> = self.post(&body).await?;

        Ok(payload
            .into_iter()
            .filter_map(|e| {
                let tag = e.entity_group.or(e.entity)?;
                Some(EntitySpan { text: e.word, tag })
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct PlainRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationPayload {
    Nested(Vec<Vec<LabelPayload>>),
    Flat(Vec<LabelPayload>),
}

#[derive(Debug, Deserialize)]
struct EntityPayload {
    word: String,
    entity_group: Option<String>,
    entity: Option<String>,
}
