use serde::Serialize;

/// Speech synthesis backends a profile can carry voices for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisBackend {
    ElevenLabs,
    Polly,
}

impl std::fmt::Display for SynthesisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisBackend::ElevenLabs => write!(f, "elevenlabs"),
            SynthesisBackend::Polly => write!(f, "polly"),
        }
    }
}

/// How a call in this language gets its voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum VoiceProvider {
    /// Spoken by the telephony provider's built-in voice
    Native { voice: &'static str },
    /// Pre-synthesized by the speech backend, with a built-in voice to fall
    /// back on when synthesis or publishing fails
    Synthesized {
        elevenlabs_voice: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        polly_voice: Option<&'static str>,
        fallback_voice: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub name: &'static str,
    #[serde(flatten)]
    pub provider: VoiceProvider,
}

impl LanguageProfile {
    pub fn is_synthesized(&self) -> bool {
        matches!(self.provider, VoiceProvider::Synthesized { .. })
    }

    /// Built-in telephony voice used when the call is rendered as spoken text
    pub fn native_voice(&self) -> &'static str {
        match self.provider {
            VoiceProvider::Native { voice } => voice,
            VoiceProvider::Synthesized { fallback_voice, .. } => fallback_voice,
        }
    }

    /// Voice to synthesize with on `backend`. `None` for native profiles and
    /// for backends that have no voice in this language.
    pub fn synthesis_voice(&self, backend: SynthesisBackend) -> Option<&'static str> {
        match (self.provider.clone(), backend) {
            (VoiceProvider::Synthesized { elevenlabs_voice, .. }, SynthesisBackend::ElevenLabs) => {
                Some(elevenlabs_voice)
            }
            (VoiceProvider::Synthesized { polly_voice, .. }, SynthesisBackend::Polly) => polly_voice,
            (VoiceProvider::Native { .. }, _) => None,
        }
    }

    /// English targets never need a translation pass
    pub fn is_english(&self) -> bool {
        self.code
            .split('-')
            .next()
            .map(|lang| lang.eq_ignore_ascii_case("en"))
            .unwrap_or(false)
    }
}

static CATALOG: [LanguageProfile; 8] = [
    LanguageProfile {
        code: "en-IN",
        name: "English (India)",
        provider: VoiceProvider::Native { voice: "alice" },
    },
    LanguageProfile {
        code: "en-US",
        name: "English (US)",
        provider: VoiceProvider::Native { voice: "alice" },
    },
    LanguageProfile {
        code: "hi-IN",
        name: "Hindi",
        provider: VoiceProvider::Synthesized {
            elevenlabs_voice: "MF4J4IDTRo0AxOO4dpFR",
            polly_voice: Some("Kajal"),
            fallback_voice: "Polly.Aditi",
        },
    },
    LanguageProfile {
        code: "ta-IN",
        name: "Tamil",
        provider: VoiceProvider::Synthesized {
            elevenlabs_voice: "gCr8TeSJgJaeaIoV4RWH",
            polly_voice: None,
            fallback_voice: "Google.ta-IN-Standard-A",
        },
    },
    LanguageProfile {
        code: "te-IN",
        name: "Telugu",
        provider: VoiceProvider::Synthesized {
            elevenlabs_voice: "XopCoWNooN3d7LfWZyX5",
            polly_voice: None,
            fallback_voice: "Google.te-IN-Standard-A",
        },
    },
    LanguageProfile {
        code: "mr-IN",
        name: "Marathi",
        provider: VoiceProvider::Synthesized {
            elevenlabs_voice: "1qEiC6qsybMkmnNdVMbK",
            polly_voice: None,
            fallback_voice: "Google.mr-IN-Standard-A",
        },
    },
    LanguageProfile {
        code: "es-ES",
        name: "Spanish",
        provider: VoiceProvider::Native {
            voice: "Polly.Lucia",
        },
    },
    LanguageProfile {
        code: "fr-FR",
        name: "French",
        provider: VoiceProvider::Native { voice: "Polly.Lea" },
    },
];

pub fn catalog() -> &'static [LanguageProfile] {
    &CATALOG
}

pub fn default_language() -> &'static LanguageProfile {
    &CATALOG[0]
}

pub fn find_language(code: &str) -> Option<&'static LanguageProfile> {
    CATALOG
        .iter()
        .find(|profile| profile.code.eq_ignore_ascii_case(code.trim()))
}
