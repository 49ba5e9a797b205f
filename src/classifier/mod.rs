//! Classification backends and the intake flow that logs their results.

pub mod guidance;
mod intake;
mod mock;
mod remote;

pub use guidance::{guidance_for, Guidance};
pub use intake::{classify_and_record, to_new_classification, ClassificationOutcome};
pub use mock::MockClassifier;
pub use remote::{PredictionClient, PredictionResponse};

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::settings::PredictionSettings;

/// What the user submitted: a typed description or a photo.
#[derive(Debug, Clone)]
pub enum ClassificationInput {
    Text(String),
    Image { file_name: String, bytes: Vec<u8> },
}

impl ClassificationInput {
    /// Text as typed, or the image's file name.
    pub fn display_name(&self) -> &str {
        match self {
            ClassificationInput::Text(text) => text,
            ClassificationInput::Image { file_name, .. } => file_name,
        }
    }
}

/// Backend result. `confidence` is a probability in `0.0..=1.0`; the label is
/// whatever the backend produced and is not checked against known categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub item: String,
    pub label: String,
    pub confidence: f64,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ClassifierBackend {
    Remote(PredictionClient),
    Mock(MockClassifier),
}

impl ClassifierBackend {
    pub fn from_settings(settings: &PredictionSettings) -> Result<Self> {
        if settings.use_mock {
            return Ok(ClassifierBackend::Mock(MockClassifier::new()));
        }
        let client = PredictionClient::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.timeout_secs),
        )?;
        Ok(ClassifierBackend::Remote(client))
    }

    pub async fn classify(&self, input: &ClassificationInput) -> Result<Prediction> {
        match self {
            ClassifierBackend::Remote(client) => client.predict(input).await,
            ClassifierBackend::Mock(mock) => Ok(mock.classify(input)),
        }
    }
}
