use std::fmt;

/// Key of an object inside a storage bucket, in decoded form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Decodes a key as it appears in storage notifications, where spaces arrive
    /// as `+` and reserved characters as `%XX` escapes.
    pub fn from_event_encoded(raw: &str) -> Self {
        let spaced = raw.replace('+', " ");
        match urlencoding::decode(&spaced) {
            Ok(decoded) => Self(decoded.into_owned()),
            Err(_) => Self(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last `/`, or an empty string for root-level keys.
    pub fn parent_prefix(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// The segment before the first `/`, or the whole key when it has none.
    pub fn first_segment(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
