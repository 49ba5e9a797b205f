//! Disposal guidance shown next to a classification result.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub suggestion: &'static str,
    pub recycling_tip: &'static str,
    pub environmental_impact: &'static str,
    pub disposal_method: &'static str,
}

const FALLBACK: Guidance = Guidance {
    suggestion: "Dispose according to local waste management guidelines.",
    recycling_tip: "Recycling helps conserve resources and reduce environmental impact.",
    environmental_impact:
        "Proper waste management helps protect our environment and natural resources.",
    disposal_method: "General Waste Bin",
};

/// Guidance for a category label, ignoring case. Unknown labels get the
/// generic fallback.
pub fn guidance_for(label: &str) -> Guidance {
    match label.trim().to_lowercase().as_str() {
        "plastic" => Guidance {
            suggestion: "Clean the item and place in plastic recycling bin. Remove caps and labels if possible.",
            recycling_tip: "Plastic bottles can be recycled into new bottles, clothing, or carpeting.",
            environmental_impact: "Recycling this plastic saves energy and reduces landfill waste and ocean pollution.",
            disposal_method: "Plastic Recycling Bin",
        },
        "organic" => Guidance {
            suggestion: "Compost this item or dispose in organic waste bin. Great for home composting!",
            recycling_tip: "Organic waste creates nutrient-rich compost for gardens and plants.",
            environmental_impact: "Composting reduces methane emissions from landfills and creates valuable soil nutrients.",
            disposal_method: "Compost Bin",
        },
        "paper" => Guidance {
            suggestion: "Remove any plastic tape or staples, then place in paper recycling bin.",
            recycling_tip: "Recycled paper can become new paper products, reducing tree harvesting.",
            environmental_impact: "Paper recycling saves trees, water, and reduces greenhouse gas emissions.",
            disposal_method: "Paper Recycling Bin",
        },
        "metal" => Guidance {
            suggestion: "Clean and place in metal recycling bin. Aluminum and steel are highly recyclable.",
            recycling_tip: "Recycled metal saves energy and reduces mining impact significantly.",
            environmental_impact: "Metal recycling saves energy and reduces mining impact on natural habitats.",
            disposal_method: "Metal Recycling Bin",
        },
        "glass" => Guidance {
            suggestion: "Clean and place in glass recycling bin. Different colors may need separate bins.",
            recycling_tip: "Glass can be recycled infinitely without losing quality.",
            environmental_impact: "Glass recycling saves energy and reduces raw material extraction.",
            disposal_method: "Glass Recycling Bin",
        },
        "general" => Guidance {
            suggestion: "Dispose in general waste bin. Check if any parts can be separated for recycling.",
            recycling_tip: "Consider if this item can be repaired, donated, or repurposed before disposal.",
            environmental_impact: "Reducing general waste helps minimize landfill burden and environmental impact.",
            disposal_method: "General Waste Bin",
        },
        "e-waste" => Guidance {
            suggestion: "Take to certified e-waste recycling center. Many retailers offer take-back programs.",
            recycling_tip: "E-waste contains valuable metals that can be recovered and reused.",
            environmental_impact: "Proper e-waste recycling prevents toxic materials from entering landfills.",
            disposal_method: "General Waste Bin",
        },
        _ => FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(guidance_for("Plastic").disposal_method, "Plastic Recycling Bin");
        assert_eq!(guidance_for("ORGANIC").disposal_method, "Compost Bin");
    }

    #[test]
    fn unknown_labels_fall_back() {
        let guidance = guidance_for("Unknown");
        assert_eq!(guidance, FALLBACK);
        assert_eq!(guidance.disposal_method, "General Waste Bin");
    }

    #[test]
    fn e_waste_has_its_own_advice_but_the_general_bin() {
        let guidance = guidance_for("E-Waste");
        assert_ne!(guidance, FALLBACK);
        assert!(guidance.suggestion.contains("e-waste"));
        assert_eq!(guidance.disposal_method, "General Waste Bin");
    }
}
