use model::{
    faculty::{Faculty, FacultyProfileUpdate, NewFaculty},
    location::Location,
    WithId,
};
use utility::{
    id::Id,
    text::{join_list, non_blank, non_blank_owned, split_list},
};

use super::{Confirm, EditState, Panel};
use crate::{api::DirectoryApi, directory::DirectoryCache, FormError};

const DELETE_QUESTION: &str = "Are you sure you want to delete this faculty member?";

/// Admin form for one faculty member. Availability is only sent when the
/// member is created; afterwards it belongs to the member's own dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FacultyForm {
    pub name: String,
    pub department: String,
    pub school: String,
    pub designation: String,
    pub role: String,
    pub courses: String,
    pub cabin_number: String,
    pub phone_number: String,
    pub availability: bool,
    pub location_id: String,
}

impl Default for FacultyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            department: String::new(),
            school: String::new(),
            designation: String::new(),
            role: String::new(),
            courses: String::new(),
            cabin_number: String::new(),
            phone_number: String::new(),
            availability: true,
            location_id: String::new(),
        }
    }
}

impl From<&WithId<Faculty>> for FacultyForm {
    fn from(faculty: &WithId<Faculty>) -> Self {
        let faculty = &faculty.content;
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: faculty.name.clone(),
            department: text(&faculty.department),
            school: text(&faculty.school),
            designation: text(&faculty.designation),
            role: text(&faculty.role),
            courses: join_list(&faculty.courses),
            cabin_number: text(&faculty.cabin_number),
            phone_number: text(&faculty.phone_number),
            availability: faculty.availability,
            location_id: faculty
                .location_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl FacultyForm {
    /// Checks the required fields and that the chosen location is one the
    /// panel knows about.
    pub fn to_new(&self, locations: &DirectoryCache<Location>) -> Result<NewFaculty, FormError> {
        let (Some(name), Some(department)) = (non_blank(&self.name), non_blank(&self.department))
        else {
            return Err(FormError::MissingFields("Name and Department are required."));
        };
        let location_id = match non_blank(&self.location_id) {
            Some(id) => {
                let id = Id::<Location>::new(id.to_owned());
                if !locations.contains(&id) {
                    return Err(FormError::UnknownLocation(id.into_raw()));
                }
                Some(id)
            }
            None => None,
        };
        Ok(NewFaculty {
            name: name.to_owned(),
            department: Some(department.to_owned()),
            school: non_blank_owned(&self.school),
            designation: non_blank_owned(&self.designation),
            role: non_blank_owned(&self.role),
            courses: split_list(&self.courses),
            cabin_number: non_blank_owned(&self.cabin_number),
            phone_number: non_blank_owned(&self.phone_number),
            availability: self.availability,
            location_id,
        })
    }

    /// Like [`FacultyForm::to_new`], but blanked optional fields are sent as
    /// empty strings so that the server clears them. A blank location
    /// unassigns the member.
    pub fn to_update(
        &self,
        locations: &DirectoryCache<Location>,
    ) -> Result<FacultyProfileUpdate, FormError> {
        let faculty = self.to_new(locations)?;
        let text = |value: &str| Some(value.trim().to_owned());
        Ok(FacultyProfileUpdate {
            name: Some(faculty.name),
            department: faculty.department,
            school: text(&self.school),
            designation: text(&self.designation),
            role: text(&self.role),
            courses: Some(faculty.courses),
            cabin_number: text(&self.cabin_number),
            phone_number: text(&self.phone_number),
            location_id: Some(faculty.location_id.unwrap_or_default()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FacultyPanel {
    panel: Panel<Faculty>,
    locations: DirectoryCache<Location>,
    form: FacultyForm,
}

impl FacultyPanel {
    /// Loads the faculty list and the locations offered in the form.
    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        futures::join!(
            self.panel.load(api.faculty_list(), "Failed to load faculty"),
            self.locations.load(api.locations(), "Failed to load locations"),
        );
    }

    pub fn panel(&self) -> &Panel<Faculty> {
        &self.panel
    }

    pub fn faculty(&self) -> &[WithId<Faculty>] {
        self.panel.records().entries()
    }

    pub fn locations(&self) -> &[WithId<Location>] {
        self.locations.entries()
    }

    pub fn form(&mut self) -> &mut FacultyForm {
        &mut self.form
    }

    pub fn start_add(&mut self) {
        self.panel.start_add();
        self.form = FacultyForm::default();
    }

    pub fn start_edit(&mut self, id: &Id<Faculty>) {
        if let Some(faculty) = self.panel.start_edit(id) {
            self.form = FacultyForm::from(faculty);
        }
    }

    pub fn cancel(&mut self) {
        self.panel.cancel();
        self.form = FacultyForm::default();
    }

    pub async fn save<A: DirectoryApi + ?Sized>(&mut self, api: &A) -> Result<(), FormError> {
        let result = match self.panel.edit_state().clone() {
            EditState::Idle => return Ok(()),
            EditState::Adding => {
                let faculty = self.form.to_new(&self.locations)?;
                api.create_faculty(&faculty).await
            }
            EditState::Editing(id) => {
                let update = self.form.to_update(&self.locations)?;
                api.update_faculty(&id, &update).await
            }
        };
        if self.panel.saved(result, "Failed to save faculty member") {
            self.form = FacultyForm::default();
        }
        Ok(())
    }

    pub async fn delete<A, C>(&mut self, api: &A, id: &Id<Faculty>, confirm: &C) -> bool
    where
        A: DirectoryApi + ?Sized,
        C: Confirm + ?Sized,
    {
        self.panel
            .delete(
                id,
                confirm,
                DELETE_QUESTION,
                || api.delete_faculty(id),
                "Failed to delete faculty member",
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::fake::FakeApi;

    async fn loaded(api: &FakeApi) -> FacultyPanel {
        let mut panel = FacultyPanel::default();
        panel.load(api).await;
        panel
    }

    #[tokio::test]
    async fn unknown_location_is_caught_before_sending() {
        let api = FakeApi::seeded();
        let mut panel = loaded(&api).await;
        panel.start_add();
        let form = panel.form();
        form.name = "Dr. Meera Rao".to_owned();
        form.department = "Design".to_owned();
        form.location_id = "Z-999".to_owned();

        assert_eq!(
            panel.save(&api).await,
            Err(FormError::UnknownLocation("Z-999".to_owned()))
        );
        assert_eq!(api.requests(), 2);
    }

    #[tokio::test]
    async fn created_member_is_listed() {
        let api = FakeApi::seeded();
        let mut panel = loaded(&api).await;
        panel.start_add();
        let form = panel.form();
        form.name = "Dr. Meera Rao".to_owned();
        form.department = "Design".to_owned();
        form.school = "SOD".to_owned();
        form.courses = "Typography, Colour Theory".to_owned();
        form.location_id = "B-204".to_owned();
        form.availability = false;

        panel.save(&api).await.unwrap();
        assert_eq!(panel.faculty().len(), 2);
        let rao = panel
            .faculty()
            .iter()
            .find(|f| f.content.name == "Dr. Meera Rao")
            .unwrap();
        assert_eq!(rao.content.courses, vec!["Typography", "Colour Theory"]);
        assert_eq!(rao.content.location_id, Some(Id::new("B-204".to_owned())));
        assert!(!rao.content.availability);
    }

    #[tokio::test]
    async fn edit_prefills_and_updates() {
        let api = FakeApi::seeded();
        let mut panel = loaded(&api).await;
        let id = Id::new(1);
        panel.start_edit(&id);
        assert_eq!(panel.form().location_id, "C-305");
        assert_eq!(panel.form().role, "HOD");
        panel.form().phone_number = "+91-92222-22222".to_owned();

        panel.save(&api).await.unwrap();
        let doe = panel.panel().records().get(&id).unwrap();
        assert_eq!(doe.content.phone_number.as_deref(), Some("+91-92222-22222"));
        assert_eq!(panel.panel().edit_state(), &EditState::Idle);
    }

    #[tokio::test]
    async fn declined_delete_keeps_member() {
        let api = FakeApi::seeded();
        let mut panel = loaded(&api).await;
        let id = Id::new(1);
        let question = std::cell::RefCell::new(String::new());
        let decline = |asked: &str| {
            *question.borrow_mut() = asked.to_owned();
            false
        };

        assert!(!panel.delete(&api, &id, &decline).await);
        assert_eq!(question.into_inner(), DELETE_QUESTION);
        assert_eq!(panel.faculty().len(), 1);

        assert!(panel.delete(&api, &id, &|_: &str| true).await);
        assert!(panel.faculty().is_empty());
    }

    #[tokio::test]
    async fn cleared_location_allows_deleting_it() {
        let api = FakeApi::seeded();
        let mut panel = loaded(&api).await;
        let id = Id::new(1);
        panel.start_edit(&id);
        panel.form().location_id = String::new();
        panel.form().phone_number = String::new();

        panel.save(&api).await.unwrap();
        let doe = panel.panel().records().get(&id).unwrap();
        assert_eq!(doe.content.location_id, None);
        assert_eq!(doe.content.phone_number, None);
        assert!(api.delete_location(&Id::new("C-305".to_owned())).await.is_ok());
    }
}
