use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{ExampleData, WithId};

/// Type tag stored with every location unless the admin chose another one.
pub const DEFAULT_KIND: &str = "location";

fn default_kind() -> String {
    DEFAULT_KIND.to_owned()
}

/// A navigable room or point on campus, e.g. a classroom or the auditorium.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub label: String,
    pub subtitle: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

impl Location {
    pub fn new<L: Into<String>, S: Into<String>>(label: L, subtitle: Option<S>) -> Self {
        Self {
            label: label.into(),
            subtitle: subtitle.map(Into::into),
            kind: default_kind(),
        }
    }

    pub fn subtitle_or_empty(&self) -> &str {
        self.subtitle.as_deref().unwrap_or("")
    }
}

impl HasId for Location {
    type IdType = String;
}

impl ExampleData for WithId<Location> {
    fn example_data() -> Self {
        WithId::new(
            Id::new("A-101".to_owned()),
            Location::new("A-101", Some("Block A • Floor 1 • Classroom")),
        )
    }
}

/// Partial update of a location. Absent fields are left untouched.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationUpdate {
    pub label: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl LocationUpdate {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.subtitle.is_none() && self.kind.is_none()
    }

    pub fn apply(self, location: &mut Location) {
        if let Some(label) = self.label {
            location.label = label;
        }
        if let Some(subtitle) = self.subtitle {
            location.subtitle = Some(subtitle);
        }
        if let Some(kind) = self.kind {
            location.kind = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_type_defaults_to_location() {
        let location: Location =
            serde_json::from_str(r#"{"label": "C-305"}"#).unwrap();
        assert_eq!(location.kind, DEFAULT_KIND);
        assert_eq!(location.subtitle_or_empty(), "");
    }

    #[test]
    fn update_only_touches_present_fields() {
        let mut location = Location::new("A-101", Some("Block A"));
        let update = LocationUpdate {
            subtitle: Some("Block A • Floor 1".to_owned()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        update.apply(&mut location);
        assert_eq!(location.label, "A-101");
        assert_eq!(location.subtitle.as_deref(), Some("Block A • Floor 1"));
        assert!(LocationUpdate::default().is_empty());
    }
}
