use std::fmt;

use super::ObjectKey;

/// Token that identifies a patient row; uploads are filed under a folder named after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatientIdentifier(String);

impl PatientIdentifier {
    pub fn from_key(key: &ObjectKey) -> Option<Self> {
        let segment = key.first_segment();
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
