use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::{
    models::{ClassificationRecord, NewClassification},
    storage::HistoryStore,
    utils::dates::{format_date, format_time},
};

use super::{guidance_for, ClassificationInput, ClassifierBackend, Guidance, Prediction};

const DEFAULT_LOCATION: &str = "Home";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationOutcome {
    pub prediction: Prediction,
    pub guidance: Guidance,
    pub record: ClassificationRecord,
}

/// Shapes a prediction into a history entry stamped with `now`.
pub fn to_new_classification(
    prediction: &Prediction,
    input: &ClassificationInput,
    now: NaiveDateTime,
) -> NewClassification {
    let image = match input {
        ClassificationInput::Image { file_name, .. } => Some(file_name.clone()),
        ClassificationInput::Text(_) => None,
    };

    NewClassification {
        item: prediction.item.clone(),
        waste_type: prediction.label.clone(),
        confidence: (prediction.confidence * 100.0).round(),
        date: format_date(now.date()),
        time: format_time(now.time()),
        image,
        description: Some(format!("{} waste item", prediction.label)),
        location: Some(DEFAULT_LOCATION.to_string()),
        disposal_method: Some(guidance_for(&prediction.label).disposal_method.to_string()),
    }
}

/// Classifies `input` and logs the result. Backend failures are returned
/// before anything is written.
pub async fn classify_and_record(
    store: &HistoryStore,
    backend: &ClassifierBackend,
    input: ClassificationInput,
) -> Result<ClassificationOutcome> {
    if input.display_name().trim().is_empty() {
        bail!("Please provide either an image or description");
    }

    let prediction = backend.classify(&input).await?;
    let entry = to_new_classification(&prediction, &input, Local::now().naive_local());
    let writer = store.clone();
    let record = tokio::task::spawn_blocking(move || writer.add(entry))
        .await
        .context("history write task failed")?;

    Ok(ClassificationOutcome {
        guidance: guidance_for(&prediction.label),
        prediction,
        record,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        analytics::test_support::noon, classifier::MockClassifier, storage::MemoryMedium,
    };

    #[test]
    fn shapes_record_fields() {
        let prediction = Prediction {
            item: "bottle.jpg".into(),
            label: "Plastic".into(),
            confidence: 0.914,
            message: None,
        };
        let input = ClassificationInput::Image {
            file_name: "bottle.jpg".into(),
            bytes: vec![1, 2, 3],
        };

        let entry = to_new_classification(&prediction, &input, noon(2026, 10, 19));
        assert_eq!(entry.confidence, 91.0);
        assert_eq!(entry.date, "10/19/2026");
        assert_eq!(entry.time, "12:00 PM");
        assert_eq!(entry.image.as_deref(), Some("bottle.jpg"));
        assert_eq!(entry.description.as_deref(), Some("Plastic waste item"));
        assert_eq!(entry.location.as_deref(), Some("Home"));
        assert_eq!(entry.disposal_method.as_deref(), Some("Plastic Recycling Bin"));
    }

    #[test]
    fn unknown_labels_are_kept() {
        let prediction = Prediction {
            item: "thing".into(),
            label: "Styrofoam".into(),
            confidence: 0.5,
            message: None,
        };
        let entry = to_new_classification(
            &prediction,
            &ClassificationInput::Text("thing".into()),
            noon(2026, 10, 19),
        );
        assert_eq!(entry.waste_type, "Styrofoam");
        assert_eq!(entry.disposal_method.as_deref(), Some("General Waste Bin"));
        assert!(entry.image.is_none());
    }

    #[tokio::test]
    async fn records_mock_classification() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::new()));
        let backend = ClassifierBackend::Mock(MockClassifier::new());

        let outcome = classify_and_record(
            &store,
            &backend,
            ClassificationInput::Text("banana peel".into()),
        )
        .await
        .unwrap();

        assert_eq!(outcome.record.waste_type, "Organic");
        assert_eq!(outcome.guidance.disposal_method, "Compost Bin");
        assert!((92.0..=99.0).contains(&outcome.record.confidence));
        assert_eq!(store.get_all(), vec![outcome.record]);
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let store = HistoryStore::new(Arc::new(MemoryMedium::new()));
        let backend = ClassifierBackend::Mock(MockClassifier::new());

        let result =
            classify_and_record(&store, &backend, ClassificationInput::Text("   ".into())).await;
        assert!(result.is_err());
        assert!(store.get_all().is_empty());
    }
}
