//! Optional read-aloud of each word as it is shown.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub enabled: bool,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub lang: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            lang: "en-US".to_string(),
        }
    }
}

impl SpeechSettings {
    pub fn clamp(mut self) -> Self {
        self.rate = clamp_or(self.rate, 0.1, 10.0, 0.9);
        self.pitch = clamp_or(self.pitch, 0.0, 2.0, 1.0);
        self.volume = clamp_or(self.volume, 0.0, 1.0, 1.0);
        if self.lang.trim().is_empty() {
            self.lang = "en-US".to_string();
        }
        self
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    Unsupported,
    Backend(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Unsupported => write!(f, "speech synthesis is not available"),
            SpeechError::Backend(reason) => write!(f, "speech backend failed: {reason}"),
        }
    }
}

impl std::error::Error for SpeechError {}

/// A text-to-speech backend. `speak` cancels whatever is still being spoken.
pub trait Speech: Send {
    fn is_supported(&self) -> bool;

    fn speak(&mut self, text: &str, settings: &SpeechSettings) -> Result<(), SpeechError>;

    fn cancel(&mut self);
}

/// No backend at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl Speech for SilentSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn speak(&mut self, _text: &str, _settings: &SpeechSettings) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn cancel(&mut self) {}
}

/// Writes utterances to the log and keeps a transcript. Used by the headless binary.
#[derive(Debug, Clone, Default)]
pub struct LogSpeech {
    transcript: Vec<String>,
    cancels: usize,
}

impl LogSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl Speech for LogSpeech {
    fn is_supported(&self) -> bool {
        true
    }

    fn speak(&mut self, text: &str, settings: &SpeechSettings) -> Result<(), SpeechError> {
        self.cancel();
        log::info!(
            "say {text:?} (lang={} rate={} pitch={} volume={})",
            settings.lang,
            settings.rate,
            settings.pitch,
            settings.volume
        );
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_read_aloud_voice() {
        let s = SpeechSettings::default();
        assert!(s.enabled);
        assert_eq!(s.rate, 0.9);
        assert_eq!(s.pitch, 1.0);
        assert_eq!(s.volume, 1.0);
        assert_eq!(s.lang, "en-US");
    }

    #[test]
    fn clamp_repairs_out_of_range_values() {
        let s = SpeechSettings {
            enabled: false,
            rate: f32::NAN,
            pitch: 5.0,
            volume: -1.0,
            lang: "  ".to_string(),
        }
        .clamp();
        assert_eq!(s.rate, 0.9);
        assert_eq!(s.pitch, 2.0);
        assert_eq!(s.volume, 0.0);
        assert_eq!(s.lang, "en-US");
        assert!(!s.enabled);
    }

    #[test]
    fn log_speech_cancels_before_each_utterance() {
        let mut speech = LogSpeech::new();
        let settings = SpeechSettings::default();
        speech.speak("cat", &settings).expect("speak");
        speech.speak("dog", &settings).expect("speak");
        assert_eq!(speech.transcript(), ["cat", "dog"]);
        assert_eq!(speech.cancels(), 2);
    }

    #[test]
    fn silent_speech_reports_unsupported() {
        let mut speech = SilentSpeech;
        assert!(!speech.is_supported());
        assert_eq!(
            speech.speak("cat", &SpeechSettings::default()),
            Err(SpeechError::Unsupported)
        );
    }
}
