use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    id::{HasId, Id},
    text::non_blank,
};

use crate::{location::Location, ExampleData, WithId};

pub const ROLE_HOD: &str = "HOD";
pub const ROLE_CC: &str = "CC";

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Faculty {
    pub name: String,
    pub department: Option<String>,
    pub school: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "courses_taken", default)]
    pub courses: Vec<String>,
    pub cabin_number: Option<String>,
    pub phone_number: Option<String>,
    pub availability: bool,
    pub location_id: Option<Id<Location>>,
}

impl Faculty {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }

    pub fn is_hod(&self) -> bool {
        self.has_role(ROLE_HOD)
    }

    /// Second line shown below the name in selection lists,
    /// e.g. `Computer Science • Professor`.
    pub fn summary(&self) -> String {
        [self.department.as_deref(), self.designation.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

impl HasId for Faculty {
    type IdType = i32;
}

impl ExampleData for WithId<Faculty> {
    fn example_data() -> Self {
        WithId::new(
            Id::new(1),
            Faculty {
                name: "Prof. John Doe".to_owned(),
                department: Some("Computer Science".to_owned()),
                school: Some("SOCSE".to_owned()),
                designation: Some("Professor".to_owned()),
                role: Some(ROLE_HOD.to_owned()),
                courses: vec!["Data Structures".to_owned(), "Algorithms".to_owned()],
                cabin_number: Some("C-305".to_owned()),
                phone_number: Some("+91-90000-00000".to_owned()),
                availability: true,
                location_id: Some(Id::new("C-305".to_owned())),
            },
        )
    }
}

fn available_by_default() -> bool {
    true
}

/// Body of `POST /faculty`. The id is assigned by the store.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewFaculty {
    pub name: String,
    pub department: Option<String>,
    pub school: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "courses_taken", default)]
    pub courses: Vec<String>,
    pub cabin_number: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default = "available_by_default")]
    pub availability: bool,
    pub location_id: Option<Id<Location>>,
}

impl From<NewFaculty> for Faculty {
    fn from(value: NewFaculty) -> Self {
        Self {
            name: value.name,
            department: value.department,
            school: value.school,
            designation: value.designation,
            role: value.role,
            courses: value.courses,
            cabin_number: value.cabin_number,
            phone_number: value.phone_number,
            availability: value.availability,
            location_id: value.location_id,
        }
    }
}

/// Body of `PUT /faculty/{id}`. Absent fields are left untouched, an empty
/// string clears the field.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FacultyProfileUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub school: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "courses_taken")]
    pub courses: Option<Vec<String>>,
    pub cabin_number: Option<String>,
    pub phone_number: Option<String>,
    pub location_id: Option<Id<Location>>,
}

fn cleared(value: String) -> Option<String> {
    non_blank(&value).map(str::to_owned)
}

impl FacultyProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// The location the member is moved to. `None` when the update keeps or
    /// clears the location.
    pub fn assigned_location(&self) -> Option<&Id<Location>> {
        self.location_id
            .as_ref()
            .filter(|id| non_blank(id.raw_ref::<str>()).is_some())
    }

    pub fn apply(self, faculty: &mut Faculty) {
        if let Some(name) = self.name {
            faculty.name = name;
        }
        if let Some(department) = self.department {
            faculty.department = cleared(department);
        }
        if let Some(school) = self.school {
            faculty.school = cleared(school);
        }
        if let Some(designation) = self.designation {
            faculty.designation = cleared(designation);
        }
        if let Some(role) = self.role {
            faculty.role = cleared(role);
        }
        if let Some(courses) = self.courses {
            faculty.courses = courses;
        }
        if let Some(cabin_number) = self.cabin_number {
            faculty.cabin_number = cleared(cabin_number);
        }
        if let Some(phone_number) = self.phone_number {
            faculty.phone_number = cleared(phone_number);
        }
        if let Some(location_id) = self.location_id {
            faculty.location_id = cleared(location_id.into_raw()).map(Id::new);
        }
    }
}

/// Body of `PUT /faculty/{id}/availability`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AvailabilityUpdate {
    pub availability: bool,
}
