use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Project reference: a numeric id (`"123"`) or a namespaced path (`"group/project"`).
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct ProjectId {
    value: CompactString,
}

/// Project-scoped merge request number, as shown in the GitLab UI (`!42`).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct MergeRequestIid {
    value: u32,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct PipelineId {
    value: u32,
}

impl ProjectId {
    pub fn new(id: impl Into<CompactString>) -> Self { Self { value: id.into() } }

    pub fn as_str(&self) -> &str { &self.value }

    pub fn is_empty(&self) -> bool { self.value.trim().is_empty() }

    /// Path segment form; `group/project` becomes `group%2Fproject`.
    pub fn encoded(&self) -> CompactString {
        urlencoding::encode(&self.value).to_compact_string()
    }
}

impl MergeRequestIid {
    pub fn new(iid: u32) -> Self { Self { value: iid } }

    pub fn value(&self) -> u32 { self.value }
}

impl PipelineId {
    pub fn new(id: u32) -> Self { Self { value: id } }
}

impl From<u32> for ProjectId {
    fn from(id: u32) -> Self { Self::new(id.to_compact_string()) }
}

impl From<&str> for ProjectId {
    fn from(path: &str) -> Self { Self::new(path) }
}

impl From<String> for ProjectId {
    fn from(path: String) -> Self { Self::new(path) }
}

impl From<u32> for MergeRequestIid {
    fn from(iid: u32) -> Self { Self::new(iid) }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> Result<ProjectId, D::Error>
        where D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Numeric(u64),
            Path(CompactString),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Numeric(id) => ProjectId::new(id.to_compact_string()),
            Raw::Path(path) => ProjectId::new(path),
        })
    }
}

impl<'de> Deserialize<'de> for MergeRequestIid {
    fn deserialize<D>(deserializer: D) -> Result<MergeRequestIid, D::Error>
        where D: Deserializer<'de>,
    {
        let iid = u32::deserialize(deserializer)?;
        Ok(MergeRequestIid::new(iid))
    }
}

impl<'de> Deserialize<'de> for PipelineId {
    fn deserialize<D>(deserializer: D) -> Result<PipelineId, D::Error>
        where D: Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Ok(PipelineId::new(id))
    }
}

impl Serialize for ProjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.parse::<u64>() {
            Ok(id) if id.to_compact_string() == self.value => serializer.serialize_u64(id),
            _ => serializer.serialize_str(&self.value),
        }
    }
}

impl Serialize for MergeRequestIid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value)
    }
}

impl Serialize for PipelineId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::fmt::Display for MergeRequestIid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::fmt::Display for PipelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_path_is_encoded() {
        let id = ProjectId::from("group/sub group/project");
        assert_eq!(id.encoded(), "group%2Fsub%20group%2Fproject");
        assert_eq!(id.to_string(), "group/sub group/project");
    }

    #[test]
    fn test_numeric_project_id() {
        let id = ProjectId::from(123u32);
        assert_eq!(id.encoded(), "123");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!(123));
    }

    #[test]
    fn test_zero_padded_project_id_stays_a_string() {
        let id = ProjectId::from("007");
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value, serde_json::json!("007"));

        let back: ProjectId = serde_json::from_value(value).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_project_id_deserializes_number_or_path() {
        let numeric: ProjectId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric, ProjectId::from(42u32));

        let path: ProjectId = serde_json::from_str("\"group/project\"").unwrap();
        assert_eq!(path.as_str(), "group/project");
    }
}
