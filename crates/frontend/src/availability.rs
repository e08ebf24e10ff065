//! Faculty self-service: the logged in faculty member sees their own record,
//! flips their availability and edits their profile.

use model::{
    faculty::{Faculty, FacultyProfileUpdate},
    WithId,
};
use utility::{
    id::Id,
    text::{join_list, non_blank, split_list},
};

use crate::{
    api::{ApiResult, DirectoryApi},
    optimistic::Optimistic,
    FormError,
};

/// Editable text of the profile form. Courses are typed as one comma
/// separated line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub department: String,
    pub designation: String,
    pub role: String,
    pub cabin_number: String,
    pub phone_number: String,
    pub courses: String,
}

impl From<&Faculty> for ProfileForm {
    fn from(faculty: &Faculty) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: faculty.name.clone(),
            department: text(&faculty.department),
            designation: text(&faculty.designation),
            role: text(&faculty.role),
            cabin_number: text(&faculty.cabin_number),
            phone_number: text(&faculty.phone_number),
            courses: join_list(&faculty.courses),
        }
    }
}

impl ProfileForm {
    /// Blanked optional fields are sent as empty strings so that the server
    /// clears them.
    pub fn to_update(&self) -> Result<FacultyProfileUpdate, FormError> {
        let (Some(name), Some(department)) = (non_blank(&self.name), non_blank(&self.department))
        else {
            return Err(FormError::MissingFields("Name and Department are required."));
        };
        Ok(FacultyProfileUpdate {
            name: Some(name.to_owned()),
            department: Some(department.to_owned()),
            designation: Some(self.designation.trim().to_owned()),
            role: Some(self.role.trim().to_owned()),
            cabin_number: Some(self.cabin_number.trim().to_owned()),
            phone_number: Some(self.phone_number.trim().to_owned()),
            courses: Some(split_list(&self.courses)),
            ..Default::default()
        })
    }
}

pub struct FacultyDashboard {
    faculty_id: Id<Faculty>,
    record: Option<Optimistic<WithId<Faculty>>>,
    busy: bool,
    banner: Option<String>,
    editing: Option<ProfileForm>,
}

impl FacultyDashboard {
    pub fn new(faculty_id: Id<Faculty>) -> Self {
        Self {
            faculty_id,
            record: None,
            busy: false,
            banner: None,
            editing: None,
        }
    }

    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        match api.faculty(&self.faculty_id).await {
            Ok(faculty) => {
                self.record = Some(Optimistic::new(faculty));
                self.banner = None;
            }
            Err(why) => self.banner = Some(why.message_or("Failed to load your profile")),
        }
    }

    pub fn faculty_id(&self) -> &Id<Faculty> {
        &self.faculty_id
    }

    pub fn faculty(&self) -> Option<&WithId<Faculty>> {
        self.record.as_ref().map(Optimistic::get)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Flips availability locally and returns the value to send. Returns
    /// `None` while a previous toggle is still in flight or nothing is loaded.
    pub fn begin_toggle(&mut self) -> Option<bool> {
        if self.busy {
            return None;
        }
        let record = self.record.as_mut()?;
        record.apply(|faculty| faculty.content.availability = !faculty.content.availability);
        self.busy = true;
        self.banner = None;
        Some(record.get().content.availability)
    }

    /// Takes the server's answer to a toggle. On failure the record shows
    /// what it showed before the toggle.
    pub fn settle_toggle(&mut self, result: ApiResult<WithId<Faculty>>) {
        self.busy = false;
        let Some(record) = self.record.as_mut() else {
            return;
        };
        match result {
            Ok(faculty) => record.commit(faculty),
            Err(why) => {
                log::warn!("Availability update failed: {}", why);
                record.rollback();
                self.banner = Some(why.message_or("Failed to update availability"));
            }
        }
    }

    /// Returns `false` if the toggle was ignored.
    pub async fn toggle_availability<A: DirectoryApi + ?Sized>(&mut self, api: &A) -> bool {
        let Some(availability) = self.begin_toggle() else {
            return false;
        };
        let result = api.set_availability(&self.faculty_id, availability).await;
        self.settle_toggle(result);
        true
    }

    pub fn start_edit(&mut self) {
        self.editing = self.faculty().map(|faculty| ProfileForm::from(&faculty.content));
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn form(&mut self) -> Option<&mut ProfileForm> {
        self.editing.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Saves the open form. A failed request keeps the form open.
    pub async fn save_profile<A: DirectoryApi + ?Sized>(&mut self, api: &A) -> Result<(), FormError> {
        let Some(form) = self.editing.as_ref() else {
            return Ok(());
        };
        let update = form.to_update()?;
        match api.update_faculty(&self.faculty_id, &update).await {
            Ok(faculty) => {
                log::info!("Updated profile of {}", faculty.content.name);
                self.record = Some(Optimistic::new(faculty));
                self.editing = None;
                self.banner = None;
            }
            Err(why) => self.banner = Some(why.message_or("Failed to update profile")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    use super::*;
    use crate::api::fake::FakeApi;

    async fn dashboard(api: &FakeApi) -> FacultyDashboard {
        let mut dashboard = FacultyDashboard::new(Id::new(1));
        dashboard.load(api).await;
        dashboard
    }

    fn available(dashboard: &FacultyDashboard) -> bool {
        dashboard.faculty().unwrap().content.availability
    }

    #[tokio::test]
    async fn toggling_twice_restores_original() {
        let api = FakeApi::seeded();
        let mut dashboard = dashboard(&api).await;
        assert!(available(&dashboard));

        assert!(dashboard.toggle_availability(&api).await);
        assert!(!available(&dashboard));
        assert!(dashboard.toggle_availability(&api).await);
        assert!(available(&dashboard));
        assert!(api.faculty(&Id::new(1)).await.unwrap().content.availability);
    }

    #[tokio::test]
    async fn failed_toggle_reverts_and_shows_detail() {
        let api = FakeApi::seeded();
        let mut dashboard = dashboard(&api).await;

        api.fail_next_with(StatusCode::NOT_FOUND, "Faculty not found");
        dashboard.toggle_availability(&api).await;
        assert!(available(&dashboard));
        assert_eq!(dashboard.banner(), Some("Faculty not found"));
        assert!(!dashboard.is_busy());
    }

    #[tokio::test]
    async fn toggle_while_busy_is_ignored() {
        let api = FakeApi::seeded();
        let mut dashboard = dashboard(&api).await;

        assert_eq!(dashboard.begin_toggle(), Some(false));
        assert!(!available(&dashboard));
        assert_eq!(dashboard.begin_toggle(), None);
        assert!(!dashboard.toggle_availability(&api).await);
        assert_eq!(api.requests(), 1);

        let result = api.set_availability(&Id::new(1), false).await;
        dashboard.settle_toggle(result);
        assert!(!available(&dashboard));
        assert!(!dashboard.is_busy());
    }

    #[tokio::test]
    async fn profile_requires_name_and_department() {
        let api = FakeApi::seeded();
        let mut dashboard = dashboard(&api).await;
        dashboard.start_edit();
        dashboard.form().unwrap().department = "  ".to_owned();

        assert_eq!(
            dashboard.save_profile(&api).await,
            Err(FormError::MissingFields("Name and Department are required."))
        );
        assert!(dashboard.is_editing());
        assert_eq!(api.requests(), 1);
    }

    #[tokio::test]
    async fn saved_profile_replaces_record() {
        let api = FakeApi::seeded();
        let mut dashboard = dashboard(&api).await;
        dashboard.start_edit();
        let form = dashboard.form().unwrap();
        assert_eq!(form.courses, "Data Structures, Algorithms");
        form.courses = "Compilers, , Operating Systems ".to_owned();
        form.cabin_number = " C-306 ".to_owned();

        dashboard.save_profile(&api).await.unwrap();
        assert!(!dashboard.is_editing());
        let faculty = &dashboard.faculty().unwrap().content;
        assert_eq!(faculty.courses, vec!["Compilers", "Operating Systems"]);
        assert_eq!(faculty.cabin_number.as_deref(), Some("C-306"));
        assert_eq!(faculty.name, "Prof. John Doe");
    }

    #[tokio::test]
    async fn blanked_fields_are_cleared() {
        let api = FakeApi::seeded();
        let mut dashboard = dashboard(&api).await;
        dashboard.start_edit();
        let form = dashboard.form().unwrap();
        form.phone_number = " ".to_owned();
        form.designation = String::new();

        dashboard.save_profile(&api).await.unwrap();
        assert!(!dashboard.is_editing());
        let faculty = api.faculty(&Id::new(1)).await.unwrap().content;
        assert_eq!(faculty.phone_number, None);
        assert_eq!(faculty.designation, None);
        assert_eq!(dashboard.faculty().unwrap().content, faculty);
    }
}
