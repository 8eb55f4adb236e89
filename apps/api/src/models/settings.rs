use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiTone {
    #[default]
    Formal,
    Casual,
    Witty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseVerbosity {
    Concise,
    #[default]
    Balanced,
    Detailed,
}

/// User preferences that shape assistant replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ai_tone: AiTone,
    pub response_verbosity: ResponseVerbosity,
}

impl Settings {
    /// System-prompt fragment describing how replies should sound.
    pub fn style_instruction(&self) -> String {
        let tone = match self.ai_tone {
            AiTone::Formal => "Use a formal, professional tone.",
            AiTone::Casual => "Use a relaxed, conversational tone.",
            AiTone::Witty => "Use a light, witty tone without sacrificing accuracy.",
        };
        let length = match self.response_verbosity {
            ResponseVerbosity::Concise => "Keep answers short: a few sentences at most.",
            ResponseVerbosity::Balanced => "Give complete answers without padding.",
            ResponseVerbosity::Detailed => {
                "Give thorough answers with explanations and worked examples."
            }
        };
        format!("{tone} {length}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_formal_balanced() {
        let s = Settings::default();
        assert_eq!(s.ai_tone, AiTone::Formal);
        assert_eq!(s.response_verbosity, ResponseVerbosity::Balanced);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"ai_tone": "witty"}"#).unwrap();
        assert_eq!(s.ai_tone, AiTone::Witty);
        assert_eq!(s.response_verbosity, ResponseVerbosity::Balanced);
    }

    #[test]
    fn test_style_instruction_reflects_both_fields() {
        let s = Settings {
            ai_tone: AiTone::Casual,
            response_verbosity: ResponseVerbosity::Concise,
        };
        let text = s.style_instruction();
        assert!(text.contains("conversational"));
        assert!(text.contains("short"));
    }
}
