//! Keyword classifier used when the prediction service is not running.

use rand::Rng;

use super::{ClassificationInput, Prediction};

struct Rule {
    label: &'static str,
    keywords: &'static [&'static str],
    /// Inclusive confidence band in percent
    confidence: (u32, u32),
    fallback_item: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        label: "Plastic",
        keywords: &["plastic", "bottle", "bag", "container"],
        confidence: (90, 99),
        fallback_item: "Plastic Item",
    },
    Rule {
        label: "Organic",
        keywords: &["organic", "food", "banana", "apple", "peel", "core", "vegetable"],
        confidence: (92, 99),
        fallback_item: "Organic Waste",
    },
    Rule {
        label: "E-Waste",
        keywords: &[
            "electronic", "phone", "computer", "battery", "laptop", "tablet", "charger",
        ],
        confidence: (92, 99),
        fallback_item: "Electronic Device",
    },
    Rule {
        label: "Paper",
        keywords: &["paper", "cardboard", "newspaper", "magazine", "box"],
        confidence: (85, 94),
        fallback_item: "Paper Product",
    },
];

const GENERAL: Rule = Rule {
    label: "General",
    keywords: &[],
    confidence: (70, 84),
    fallback_item: "General Waste Item",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MockClassifier;

impl MockClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, input: &ClassificationInput) -> Prediction {
        self.classify_with(input, &mut rand::thread_rng())
    }

    pub fn classify_with<R: Rng>(
        &self,
        input: &ClassificationInput,
        rng: &mut R,
    ) -> Prediction {
        let haystack = input.display_name().to_lowercase();
        let rule = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| haystack.contains(keyword)))
            .unwrap_or(&GENERAL);

        let (low, high) = rule.confidence;
        let percent = rng.gen_range(low..=high);

        let item = match input {
            ClassificationInput::Text(text) => text.clone(),
            ClassificationInput::Image { .. } => rule.fallback_item.to_string(),
        };

        Prediction {
            item,
            label: rule.label.to_string(),
            confidence: f64::from(percent) / 100.0,
            message: Some("Classified by keyword rules".to_string()),
        }
    }
}
