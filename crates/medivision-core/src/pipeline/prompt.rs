//! Prompt assembly and the fixed prompt catalogs.

use serde::Serialize;

/// Mime type every uploaded image is tagged with.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// One atomic unit submitted to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Image { mime_type: String, bytes: Vec<u8> },
    Text(String),
}

impl PromptPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image { .. } => None,
        }
    }
}

/// Everything needed to build the prompt for one request.
///
/// Callers must supply at least one of `user_text` / `image_bytes`.
#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub user_text: Option<String>,
    pub image_bytes: Option<Vec<u8>>,
    pub style_directive: Option<String>,
    pub regenerate_directive: Option<String>,
}

impl PromptRequest {
    /// Build the ordered part list: image, user text, one directive, system instruction.
    ///
    /// A regeneration directive takes precedence over the style directive.
    pub fn assemble(self) -> Vec<PromptPart> {
        let mut parts = Vec::with_capacity(4);

        if let Some(bytes) = self.image_bytes.filter(|b| !b.is_empty()) {
            parts.push(PromptPart::Image { mime_type: IMAGE_MIME_TYPE.to_string(), bytes });
        }

        if let Some(text) = self.user_text.filter(|t| !t.trim().is_empty()) {
            parts.push(PromptPart::Text(text));
        }

        let regenerate = self.regenerate_directive.filter(|d| !d.is_empty());
        let style = self.style_directive.filter(|d| !d.is_empty());
        if let Some(instruction) = regenerate {
            parts.push(PromptPart::Text(format!("\n\n{}", instruction)));
        } else if let Some(style) = style {
            parts.push(PromptPart::Text(style));
        }

        parts.push(PromptPart::Text(self.system_instruction));
        parts
    }
}

/// Flatten parts into the string the input-token estimate is taken over.
///
/// Images contribute a short placeholder rather than their bytes.
pub fn serialize_parts(parts: &[PromptPart]) -> String {
    parts
        .iter()
        .map(|part| match part {
            PromptPart::Text(text) => text.clone(),
            PromptPart::Image { mime_type, bytes } => {
                format!("<{}: {} bytes>", mime_type, bytes.len())
            },
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// System instruction asking for the answer in `language`.
pub fn system_prompt(language: &str) -> String {
    format!(
        "You are an AI assistant providing educational insights into medical imaging and health symptoms.
Your responses should focus on general observations, avoid making definitive diagnoses,
and always advise consulting a medical professional.

Your key responsibilities:
1. Observational Analysis: Describe general patterns and visible abnormalities in the image.
2. General Insights: Offer possible medical explanations while avoiding absolute conclusions.
3. Consider Additional Information: Use the provided text (symptoms, history) to enhance analysis.
4. Recommendations: Suggest next steps such as further tests or consulting a specialist.
5. Cautionary Notes: Highlight when additional medical evaluation is necessary.

Provide the response in {language}.

Make sure every point is covered and keep everything clear and detailed. Don't show or say you are an AI bot; respond like a professional doctor.
Disclaimer: This is an AI-generated analysis for informational purposes only. Always consult a licensed medical professional."
    )
}

/// Output style appended to the user's query.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PromptStyle {
    pub name: &'static str,
    pub suffix: &'static str,
    pub description: &'static str,
}

pub const PROMPT_STYLES: &[PromptStyle] = &[
    PromptStyle {
        name: "Professional & Detailed",
        suffix: "\n\nProvide a comprehensive, professional medical analysis with detailed explanations.",
        description: "In-depth analysis with medical terminology",
    },
    PromptStyle {
        name: "Simple & Clear",
        suffix: "\n\nProvide a simple, easy-to-understand explanation suitable for patients without medical background.",
        description: "Patient-friendly language",
    },
    PromptStyle {
        name: "Step-by-Step",
        suffix: "\n\nBreak down the analysis into clear, numbered steps with actionable recommendations.",
        description: "Structured step-by-step format",
    },
    PromptStyle {
        name: "Comparative Analysis",
        suffix: "\n\nCompare the findings with normal/healthy conditions and highlight the differences.",
        description: "Comparison with normal cases",
    },
    PromptStyle {
        name: "Educational Focus",
        suffix: "\n\nProvide educational insights about the condition, including possible causes, risk factors, and prevention.",
        description: "Focus on learning and prevention",
    },
];

/// Tweak applied when re-running the previous request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RegenerationOption {
    pub name: &'static str,
    pub instruction: &'static str,
    pub emoji: &'static str,
}

pub const REGENERATION_OPTIONS: &[RegenerationOption] = &[
    RegenerationOption {
        name: "More Detailed",
        instruction: "Provide more comprehensive details and elaborate on each point.",
        emoji: "📝",
    },
    RegenerationOption {
        name: "Simpler Language",
        instruction: "Use simpler, non-technical language that's easier to understand.",
        emoji: "💡",
    },
    RegenerationOption {
        name: "Focus on Recommendations",
        instruction: "Emphasize actionable recommendations and next steps.",
        emoji: "🎯",
    },
    RegenerationOption {
        name: "Add Risk Factors",
        instruction: "Include detailed information about risk factors and prevention strategies.",
        emoji: "⚠️",
    },
    RegenerationOption {
        name: "Compare with Normal",
        instruction: "Compare the findings with normal/healthy conditions more explicitly.",
        emoji: "🔄",
    },
];

/// Ready-made example query.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ExampleTemplate {
    pub name: &'static str,
    pub text: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
}

pub const EXAMPLE_TEMPLATES: &[ExampleTemplate] = &[
    ExampleTemplate {
        name: "Chest X-Ray Analysis",
        text: "Patient presenting with persistent cough for 3 weeks, mild fever, and shortness of breath. No known allergies. Non-smoker.",
        category: "Respiratory",
        icon: "🫁",
    },
    ExampleTemplate {
        name: "Skin Condition",
        text: "Red, itchy rash on forearm for 5 days. No recent travel or new medications. Worsens at night.",
        category: "Dermatology",
        icon: "🔬",
    },
    ExampleTemplate {
        name: "Joint Pain Assessment",
        text: "Swelling and pain in right knee for 2 weeks. Difficulty walking. History of sports injury 5 years ago.",
        category: "Orthopedics",
        icon: "🦴",
    },
    ExampleTemplate {
        name: "Neurological Symptoms",
        text: "Intermittent headaches for 1 month, accompanied by dizziness. No vision problems. Family history of migraines.",
        category: "Neurology",
        icon: "🧠",
    },
    ExampleTemplate {
        name: "Abdominal Discomfort",
        text: "Upper abdominal pain after meals for 2 weeks. Occasional nausea. No vomiting or fever.",
        category: "Gastroenterology",
        icon: "🏥",
    },
];

// Lookups are case-insensitive so the CLI can take lower-case names.

pub fn find_style(name: &str) -> Option<&'static PromptStyle> {
    PROMPT_STYLES.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}

pub fn find_regeneration(name: &str) -> Option<&'static RegenerationOption> {
    REGENERATION_OPTIONS.iter().find(|o| o.name.eq_ignore_ascii_case(name.trim()))
}

pub fn find_template(name: &str) -> Option<&'static ExampleTemplate> {
    EXAMPLE_TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PromptRequest {
        PromptRequest { system_instruction: "SYS".to_string(), ..Default::default() }
    }

    #[test]
    fn test_full_ordering() {
        let parts = PromptRequest {
            user_text: Some("cough".to_string()),
            image_bytes: Some(vec![0xFF, 0xD8, 0xFF]),
            style_directive: Some("STYLE".to_string()),
            ..request()
        }
        .assemble();

        assert_eq!(parts.len(), 4);
        assert_eq!(
            parts[0],
            PromptPart::Image { mime_type: "image/jpeg".to_string(), bytes: vec![0xFF, 0xD8, 0xFF] }
        );
        assert_eq!(parts[1].as_text(), Some("cough"));
        assert_eq!(parts[2].as_text(), Some("STYLE"));
        assert_eq!(parts[3].as_text(), Some("SYS"));
    }

    #[test]
    fn test_regenerate_wins_over_style() {
        let parts = PromptRequest {
            user_text: Some("cough".to_string()),
            style_directive: Some("STYLE".to_string()),
            regenerate_directive: Some("MORE".to_string()),
            ..request()
        }
        .assemble();

        let texts: Vec<_> = parts.iter().filter_map(PromptPart::as_text).collect();
        assert_eq!(texts, vec!["cough", "\n\nMORE", "SYS"]);
        assert!(!texts.contains(&"STYLE"));
    }

    #[test]
    fn test_system_instruction_always_last() {
        let cases = [
            request(),
            PromptRequest { image_bytes: Some(vec![1]), ..request() },
            PromptRequest { user_text: Some("x".to_string()), ..request() },
            PromptRequest { style_directive: Some("S".to_string()), ..request() },
            PromptRequest { regenerate_directive: Some("R".to_string()), ..request() },
        ];

        for case in cases {
            let parts = case.assemble();
            assert_eq!(parts.last().and_then(PromptPart::as_text), Some("SYS"));
        }
    }

    #[test]
    fn test_blank_inputs_are_skipped() {
        let parts = PromptRequest {
            user_text: Some("   ".to_string()),
            image_bytes: Some(Vec::new()),
            style_directive: Some(String::new()),
            regenerate_directive: Some(String::new()),
            ..request()
        }
        .assemble();

        assert_eq!(parts, vec![PromptPart::Text("SYS".to_string())]);
    }

    #[test]
    fn test_serialize_parts_hides_image_bytes() {
        let parts = vec![
            PromptPart::Image { mime_type: IMAGE_MIME_TYPE.to_string(), bytes: vec![0; 2048] },
            PromptPart::Text("hello".to_string()),
        ];
        assert_eq!(serialize_parts(&parts), "<image/jpeg: 2048 bytes>\nhello");
    }

    #[test]
    fn test_system_prompt_names_language() {
        assert!(system_prompt("Hindi").contains("Provide the response in Hindi."));
    }

    #[test]
    fn test_catalog_lookups() {
        assert!(find_style("simple & clear").is_some());
        assert_eq!(find_regeneration("More Detailed").map(|o| o.emoji), Some("📝"));
        assert_eq!(find_template("skin condition").map(|t| t.category), Some("Dermatology"));
        assert!(find_style("Poetic").is_none());
    }
}
