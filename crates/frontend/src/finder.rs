//! The faculty finder: search by name, browse by school, role and
//! designation, see which HODs are in, and hand a member's cabin over to the
//! route finder.

use std::iter;

use model::{
    faculty::{Faculty, ROLE_HOD},
    location::Location,
    WithId,
};
use utility::id::Id;

use crate::{
    api::DirectoryApi,
    directory::DirectoryCache,
    search::{SearchableSelect, SelectOption},
};

/// Filter choices. The entry with an empty id means "all".
pub fn school_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("", "All Schools", ""),
        SelectOption::new("SOCSE", "SOCSE", "School of Computer Science and Engineering"),
        SelectOption::new("SOM", "SOM", "School of Management"),
        SelectOption::new("SOD", "SOD", "School of Design"),
        SelectOption::new("SOE", "SOE", "School of Engineering"),
        SelectOption::new("SOIST", "SOIST", "School of Information Science and Technology"),
    ]
}

pub fn role_options() -> Vec<SelectOption> {
    iter::once(SelectOption::new("", "All Roles", ""))
        .chain(
            ["CC", "HOD", "Academic Coordinator", "Reviewer", "NA"]
                .into_iter()
                .map(|role| SelectOption::new(role, role, "")),
        )
        .collect()
}

pub fn designation_options() -> Vec<SelectOption> {
    iter::once(SelectOption::new("", "All Designations", ""))
        .chain(
            ["Professor", "Assistant Professor", "Trainer", "Lecturer"]
                .into_iter()
                .map(|designation| SelectOption::new(designation, designation, "")),
        )
        .collect()
}

/// `None` means the filter was never touched, `Some("")` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacultyFilters {
    pub school: Option<String>,
    pub role: Option<String>,
    pub designation: Option<String>,
}

impl FacultyFilters {
    /// The filtered list is only shown once a filter was touched.
    pub fn is_active(&self) -> bool {
        self.school.is_some() || self.role.is_some() || self.designation.is_some()
    }

    pub fn matches(&self, faculty: &Faculty) -> bool {
        fn field_matches(filter: &Option<String>, value: &Option<String>) -> bool {
            match filter.as_deref() {
                None | Some("") => true,
                Some(wanted) => value.as_deref() == Some(wanted),
            }
        }
        field_matches(&self.school, &faculty.school)
            && field_matches(&self.role, &faculty.role)
            && field_matches(&self.designation, &faculty.designation)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FacultyFinder {
    directory: DirectoryCache<Faculty>,
    search: SearchableSelect,
    filters: FacultyFilters,
    hods_expanded: bool,
}

impl FacultyFinder {
    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        if self
            .directory
            .load(api.faculty_list(), "Failed to load faculty")
            .await
        {
            self.search = SearchableSelect::from_records(self.directory.entries());
        }
    }

    pub fn directory(&self) -> &DirectoryCache<Faculty> {
        &self.directory
    }

    pub fn search(&mut self) -> &mut SearchableSelect {
        &mut self.search
    }

    pub fn filters(&self) -> &FacultyFilters {
        &self.filters
    }

    /// Picking someone by name resets every filter.
    pub fn select_faculty<S: Into<String>>(&mut self, id: S) {
        self.search.select(id);
        self.filters = FacultyFilters::default();
    }

    /// Changing a filter drops the member picked by name.
    pub fn set_school<S: Into<String>>(&mut self, school: S) {
        self.filters.school = Some(school.into());
        self.search.set_selected(None);
    }

    pub fn set_role<S: Into<String>>(&mut self, role: S) {
        self.filters.role = Some(role.into());
        self.search.set_selected(None);
    }

    pub fn set_designation<S: Into<String>>(&mut self, designation: S) {
        self.filters.designation = Some(designation.into());
        self.search.set_selected(None);
    }

    pub fn selected(&self) -> Option<&WithId<Faculty>> {
        let id = Id::<Faculty>::parse(self.search.selected_id()?)?;
        self.directory.get(&id)
    }

    /// Members matching the filters, or nothing while no filter is set.
    pub fn filtered(&self) -> Vec<&WithId<Faculty>> {
        if !self.filters.is_active() {
            return Vec::new();
        }
        self.directory
            .entries()
            .iter()
            .filter(|faculty| self.filters.matches(&faculty.content))
            .collect()
    }

    pub fn toggle_hods(&mut self) {
        self.hods_expanded = !self.hods_expanded;
    }

    pub fn hods_expanded(&self) -> bool {
        self.hods_expanded
    }

    /// Every HOD with their availability. Empty reads as "No HODs found.".
    pub fn hods(&self) -> Vec<&WithId<Faculty>> {
        self.directory
            .entries()
            .iter()
            .filter(|faculty| faculty.content.has_role(ROLE_HOD))
            .collect()
    }

    /// Cabin of `faculty`, to be used as the route destination.
    pub fn route_target(faculty: &WithId<Faculty>) -> Option<Id<Location>> {
        faculty.content.location_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;
    use pretty_assertions::assert_eq;

    use super::*;

    fn member(id: i32, name: &str, school: &str, role: &str, designation: &str) -> WithId<Faculty> {
        WithId::new(
            Id::new(id),
            Faculty {
                name: name.to_owned(),
                school: Some(school.to_owned()),
                role: Some(role.to_owned()),
                designation: Some(designation.to_owned()),
                availability: id % 2 == 0,
                ..WithId::<Faculty>::example_data().content
            },
        )
    }

    fn finder() -> FacultyFinder {
        let faculty = vec![
            member(1, "Prof. John Doe", "SOCSE", "HOD", "Professor"),
            member(2, "Dr. Meera Rao", "SOD", "HOD", "Assistant Professor"),
            member(3, "Anil Kumar", "SOCSE", "CC", "Lecturer"),
            member(4, "Sara Thomas", "SOM", "NA", "Trainer"),
        ];
        FacultyFinder {
            search: SearchableSelect::from_records(&faculty),
            directory: DirectoryCache::new(faculty),
            ..Default::default()
        }
    }

    fn names(list: Vec<&WithId<Faculty>>) -> Vec<&str> {
        list.into_iter().map(|f| f.content.name.as_str()).collect()
    }

    #[test]
    fn nothing_listed_until_a_filter_is_touched() {
        let mut finder = finder();
        assert!(finder.filtered().is_empty());

        finder.set_school("");
        assert_eq!(finder.filtered().len(), 4);

        finder.set_school("SOCSE");
        assert_eq!(names(finder.filtered()), vec!["Prof. John Doe", "Anil Kumar"]);

        finder.set_role("CC");
        assert_eq!(names(finder.filtered()), vec!["Anil Kumar"]);

        finder.set_designation("Professor");
        assert!(finder.filtered().is_empty());
    }

    #[test]
    fn name_search_and_filters_exclude_each_other() {
        let mut finder = finder();
        finder.set_role("HOD");
        finder.select_faculty("2");
        assert_eq!(finder.filters(), &FacultyFilters::default());
        assert_eq!(finder.selected().map(|f| f.content.name.as_str()), Some("Dr. Meera Rao"));

        finder.set_designation("Trainer");
        assert_eq!(finder.selected(), None);
        assert_eq!(names(finder.filtered()), vec!["Sara Thomas"]);
    }

    #[test]
    fn hods_are_listed_with_availability() {
        let mut finder = finder();
        assert!(!finder.hods_expanded());
        finder.toggle_hods();
        assert!(finder.hods_expanded());

        let hods = finder.hods();
        assert_eq!(names(hods.clone()), vec!["Prof. John Doe", "Dr. Meera Rao"]);
        assert_eq!(
            hods.iter().map(|f| f.content.availability).collect::<Vec<_>>(),
            vec![false, true]
        );
    }

    #[test]
    fn routes_to_the_members_cabin() {
        let finder = finder();
        let doe = finder.directory().get(&Id::new(1)).unwrap();
        assert_eq!(
            FacultyFinder::route_target(doe),
            Some(Id::new("C-305".to_owned()))
        );
    }

    #[tokio::test]
    async fn loads_options_from_the_backend() {
        let api = crate::api::fake::FakeApi::seeded();
        let mut finder = FacultyFinder::default();
        finder.load(&api).await;
        finder.search().set_query("doe");
        assert_eq!(finder.search().filtered().len(), 1);
        assert_eq!(school_options().len(), 6);
        assert_eq!(role_options()[0].label, "All Roles");
        assert_eq!(designation_options().len(), 5);
    }
}
