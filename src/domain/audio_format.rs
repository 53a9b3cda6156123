use super::ObjectKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    M4a,
    Mp4,
    Ogg,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        Self::Mp3,
        Self::Wav,
        Self::Flac,
        Self::M4a,
        Self::Mp4,
        Self::Ogg,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => ".mp3",
            Self::Wav => ".wav",
            Self::Flac => ".flac",
            Self::M4a => ".m4a",
            Self::Mp4 => ".mp4",
            Self::Ogg => ".ogg",
        }
    }

    /// Matches on the key suffix, ignoring case.
    pub fn from_key(key: &ObjectKey) -> Option<Self> {
        let lowered = key.as_str().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| lowered.ends_with(format.extension()))
    }
}

/// An object is eligible for transcription iff its key carries a known audio extension.
pub fn is_eligible_audio(key: &ObjectKey) -> bool {
    AudioFormat::from_key(key).is_some()
}
