//! Client for the external prediction service (`POST /predict`).

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{ClassificationInput, Prediction};

const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Deserialize)]
pub struct RawPrediction {
    pub class_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

impl PredictionResponse {
    /// Top prediction as `(label, confidence)`. A response with no predictions
    /// yields `Unknown` at zero confidence.
    pub fn top(&self) -> (String, f64) {
        self.predictions
            .first()
            .map(|p| (p.class_name.clone(), p.confidence))
            .unwrap_or_else(|| (UNKNOWN_LABEL.to_string(), 0.0))
    }

    pub fn into_prediction(self, item: String) -> Prediction {
        let (label, confidence) = self.top();
        Prediction {
            item,
            label,
            confidence: confidence.clamp(0.0, 1.0),
            message: (!self.message.is_empty()).then_some(self.message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form_for(input: &ClassificationInput) -> Form {
        match input {
            ClassificationInput::Text(text) => Form::new().text("text", text.clone()),
            ClassificationInput::Image { file_name, bytes } => Form::new().part(
                "image",
                Part::bytes(bytes.clone()).file_name(file_name.clone()),
            ),
        }
    }

    pub async fn predict(&self, input: &ClassificationInput) -> Result<Prediction> {
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(Self::form_for(input))
            .send()
            .await
            .with_context(|| format!("prediction request to {} failed", self.endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read prediction response")?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|err| err.detail.or(err.error))
                .unwrap_or_else(|| "Classification failed".to_string());
            bail!("prediction service returned {status}: {detail}");
        }

        let parsed: PredictionResponse = serde_json::from_str(&body)
            .map_err(|err| anyhow!("malformed prediction response: {err}"))?;

        if let Some(seconds) = parsed.processing_time {
            info!("prediction service answered in {seconds:.2}s");
        }

        Ok(parsed.into_prediction(input.display_name().to_string()))
    }
}
