use model::{flash_news::FlashNews, WithId};
use utility::{id::Id, text::non_blank};

use super::{Confirm, Panel};
use crate::{api::DirectoryApi, FormError};

const DELETE_QUESTION: &str = "Are you sure you want to delete this news item?";

/// News items are only added or removed, never edited.
#[derive(Debug, Clone, Default)]
pub struct FlashNewsPanel {
    panel: Panel<FlashNews>,
    pub message: String,
}

impl FlashNewsPanel {
    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        self.panel
            .load(api.flash_news(), "Failed to load flash news")
            .await;
    }

    pub fn panel(&self) -> &Panel<FlashNews> {
        &self.panel
    }

    /// Newest first.
    pub fn news(&self) -> &[WithId<FlashNews>] {
        self.panel.records().entries()
    }

    pub async fn add<A: DirectoryApi + ?Sized>(&mut self, api: &A) -> Result<(), FormError> {
        let message = non_blank(&self.message)
            .ok_or(FormError::MissingFields("Please enter a news message."))?
            .to_owned();
        self.panel.start_add();
        let result = api.create_flash_news(&message).await;
        if self.panel.saved(result, "Failed to add news") {
            self.panel
                .records_mut()
                .sort_by(|a, b| b.id.cmp(&a.id));
            self.message.clear();
        }
        Ok(())
    }

    pub async fn delete<A, C>(&mut self, api: &A, id: &Id<FlashNews>, confirm: &C) -> bool
    where
        A: DirectoryApi + ?Sized,
        C: Confirm + ?Sized,
    {
        self.panel
            .delete(
                id,
                confirm,
                DELETE_QUESTION,
                || api.delete_flash_news(id),
                "Failed to delete news item",
            )
            .await
    }
}
