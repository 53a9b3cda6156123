use super::ObjectKey;

const NAME_SEPARATOR: char = '-';

/// Name and output prefix of a scribe job, derived only from the object key so
/// that redelivered uploads map onto the same job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobIdentity {
    pub job_name: String,
    pub output_prefix: String,
}

impl JobIdentity {
    pub fn derive(key: &ObjectKey) -> Self {
        let output_prefix = key.parent_prefix().to_string();
        let job_name = output_prefix.trim_matches(NAME_SEPARATOR).to_string();
        Self {
            job_name,
            output_prefix,
        }
    }

    /// Root-level objects have no prefix to name a job after.
    pub fn is_nameable(&self) -> bool {
        !self.job_name.is_empty()
    }
}
