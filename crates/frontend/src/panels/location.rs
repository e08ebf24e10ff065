use model::{
    location::{Location, LocationUpdate},
    WithId,
};
use utility::{
    id::Id,
    text::{non_blank, non_blank_owned},
};

use super::{Confirm, EditState, Panel};
use crate::{api::DirectoryApi, FormError};

const REQUIRED: &str = "Please fill in all required fields";
const DELETE_QUESTION: &str = "Are you sure you want to delete this location?";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationForm {
    /// Left empty, the id becomes the trimmed label.
    pub id: String,
    pub label: String,
    pub subtitle: String,
}

impl From<&WithId<Location>> for LocationForm {
    fn from(location: &WithId<Location>) -> Self {
        Self {
            id: location.id.to_string(),
            label: location.content.label.clone(),
            subtitle: location.content.subtitle_or_empty().to_owned(),
        }
    }
}

impl LocationForm {
    fn required(&self) -> Result<(&str, &str), FormError> {
        match (non_blank(&self.label), non_blank(&self.subtitle)) {
            (Some(label), Some(subtitle)) => Ok((label, subtitle)),
            _ => Err(FormError::MissingFields(REQUIRED)),
        }
    }

    pub fn to_location(&self) -> Result<WithId<Location>, FormError> {
        let (label, subtitle) = self.required()?;
        let id = non_blank_owned(&self.id).unwrap_or_else(|| label.to_owned());
        Ok(WithId::new(Id::new(id), Location::new(label, Some(subtitle))))
    }

    pub fn to_update(&self) -> Result<LocationUpdate, FormError> {
        let (label, subtitle) = self.required()?;
        Ok(LocationUpdate {
            label: Some(label.to_owned()),
            subtitle: Some(subtitle.to_owned()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationPanel {
    panel: Panel<Location>,
    form: LocationForm,
}

impl LocationPanel {
    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        self.panel
            .load(api.locations(), "Failed to load locations")
            .await;
    }

    pub fn panel(&self) -> &Panel<Location> {
        &self.panel
    }

    pub fn locations(&self) -> &[WithId<Location>] {
        self.panel.records().entries()
    }

    pub fn form(&mut self) -> &mut LocationForm {
        &mut self.form
    }

    pub fn start_add(&mut self) {
        self.panel.start_add();
        self.form = LocationForm::default();
    }

    pub fn start_edit(&mut self, id: &Id<Location>) {
        if let Some(location) = self.panel.start_edit(id) {
            self.form = LocationForm::from(location);
        }
    }

    pub fn cancel(&mut self) {
        self.panel.cancel();
        self.form = LocationForm::default();
    }

    pub async fn save<A: DirectoryApi + ?Sized>(&mut self, api: &A) -> Result<(), FormError> {
        let result = match self.panel.edit_state().clone() {
            EditState::Idle => return Ok(()),
            EditState::Adding => {
                let location = self.form.to_location()?;
                api.create_location(&location).await
            }
            EditState::Editing(id) => {
                let update = self.form.to_update()?;
                api.update_location(&id, &update).await
            }
        };
        if self.panel.saved(result, "Failed to save location") {
            self.form = LocationForm::default();
        }
        Ok(())
    }

    pub async fn delete<A, C>(&mut self, api: &A, id: &Id<Location>, confirm: &C) -> bool
    where
        A: DirectoryApi + ?Sized,
        C: Confirm + ?Sized,
    {
        self.panel
            .delete(
                id,
                confirm,
                DELETE_QUESTION,
                || api.delete_location(id),
                "Failed to delete location",
            )
            .await
    }
}
