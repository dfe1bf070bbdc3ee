use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Audio containers accepted for upload, keyed by MIME type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AudioFormat {
    #[serde(rename = "audio/webm")]
    Webm,
    #[serde(rename = "audio/wav")]
    Wav,
    #[serde(rename = "audio/mp3")]
    Mp3,
    #[serde(rename = "audio/mpeg")]
    Mpeg,
    #[serde(rename = "audio/ogg")]
    Ogg,
    #[serde(rename = "audio/flac")]
    Flac,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Webm,
        AudioFormat::Wav,
        AudioFormat::Mp3,
        AudioFormat::Mpeg,
        AudioFormat::Ogg,
        AudioFormat::Flac,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Webm => "audio/webm",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mp3",
            AudioFormat::Mpeg => "audio/mpeg",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Flac => "audio/flac",
        }
    }

    /// File extension used when the clip is re-uploaded to the transcription service.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Webm => "webm",
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 | AudioFormat::Mpeg => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
        }
    }

    /// Match a `Content-Type` value, ignoring parameters such as `;codecs=opus`.
    pub fn from_mime(content_type: &str) -> Result<Self, ModelError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        AudioFormat::ALL
            .into_iter()
            .find(|f| f.mime_type() == essence)
            .ok_or_else(|| ModelError::UnsupportedAudioFormat(content_type.to_string()))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Speech-to-text models the caller may select.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TranscriptionModel {
    #[default]
    #[serde(rename = "whisper-large-v3")]
    WhisperLargeV3,
    #[serde(rename = "whisper-large-v3-turbo")]
    WhisperLargeV3Turbo,
    #[serde(rename = "distil-whisper-large-v3-en")]
    DistilWhisperLargeV3En,
}

impl TranscriptionModel {
    pub const ALL: [TranscriptionModel; 3] = [
        TranscriptionModel::WhisperLargeV3,
        TranscriptionModel::WhisperLargeV3Turbo,
        TranscriptionModel::DistilWhisperLargeV3En,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionModel::WhisperLargeV3 => "whisper-large-v3",
            TranscriptionModel::WhisperLargeV3Turbo => "whisper-large-v3-turbo",
            TranscriptionModel::DistilWhisperLargeV3En => "distil-whisper-large-v3-en",
        }
    }
}

impl FromStr for TranscriptionModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TranscriptionModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ModelError::UnknownModel(s.to_string()))
    }
}

impl fmt::Display for TranscriptionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transcript text plus whatever metadata the service returned alongside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transcription {
    pub text: String,
    /// Full service response (segments, language, duration, ...).
    pub metadata: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_mime_accepts_all_supported_types() {
        for format in AudioFormat::ALL {
            assert_eq!(AudioFormat::from_mime(format.mime_type()).unwrap(), format);
        }
    }

    #[test]
    fn from_mime_ignores_parameters_and_case() {
        assert_eq!(
            AudioFormat::from_mime("audio/webm;codecs=opus").unwrap(),
            AudioFormat::Webm
        );
        assert_eq!(
            AudioFormat::from_mime("Audio/WAV").unwrap(),
            AudioFormat::Wav
        );
    }

    #[test]
    fn from_mime_rejects_other_types() {
        for mime in ["video/mp4", "audio/aac", "text/plain", "application/octet-stream", ""] {
            assert!(
                matches!(AudioFormat::from_mime(mime), Err(ModelError::UnsupportedAudioFormat(_))),
                "{mime} should be rejected"
            );
        }
    }

    #[test]
    fn mpeg_and_mp3_share_an_extension() {
        assert_eq!(AudioFormat::Mpeg.extension(), "mp3");
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Webm.extension(), "webm");
    }

    #[test]
    fn model_names_roundtrip_through_from_str() {
        for model in TranscriptionModel::ALL {
            assert_eq!(model.as_str().parse::<TranscriptionModel>().unwrap(), model);
        }
        assert_eq!(TranscriptionModel::default().as_str(), "whisper-large-v3");
        assert!("gpt-4o".parse::<TranscriptionModel>().is_err());
    }

    #[test]
    fn model_serde_matches_as_str() {
        let json = serde_json::to_string(&TranscriptionModel::WhisperLargeV3Turbo).unwrap();
        assert_eq!(json, "\"whisper-large-v3-turbo\"");
    }
}
