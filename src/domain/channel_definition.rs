use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Clinician,
    Patient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelDefinition {
    pub channel_id: u8,
    pub participant_role: ParticipantRole,
}

impl ChannelDefinition {
    /// Two-channel consultation recording: clinician on 0, patient on 1.
    pub fn consultation() -> Vec<ChannelDefinition> {
        vec![
            ChannelDefinition {
                channel_id: 0,
                participant_role: ParticipantRole::Clinician,
            },
            ChannelDefinition {
                channel_id: 1,
                participant_role: ParticipantRole::Patient,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScribeSettings {
    pub show_speaker_labels: bool,
    pub channel_identification: bool,
}

impl Default for ScribeSettings {
    fn default() -> Self {
        Self {
            show_speaker_labels: false,
            channel_identification: true,
        }
    }
}
