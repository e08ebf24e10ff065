//! Admin panels. Each panel lists one kind of record and has a single form
//! that is either closed, adding a new record or editing exactly one.
//! Saves are pessimistic: the list only changes once the backend agreed.

use std::{fmt::Debug, future::Future};

use model::{DeleteResponse, WithId};
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::{HasId, Id};

use crate::{api::ApiResult, directory::DirectoryCache};

pub mod analytics;
pub mod faculty;
pub mod flash_news;
pub mod location;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState<I> {
    #[default]
    Idle,
    Adding,
    Editing(I),
}

/// Asks the admin before anything is deleted.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// List and edit state shared by all panels.
#[derive(Debug, Clone)]
pub struct Panel<T>
where
    T: HasId,
    T::IdType: Serialize + Debug + Clone + PartialEq + JsonSchema,
{
    records: DirectoryCache<T>,
    edit: EditState<Id<T>>,
    banner: Option<String>,
}

impl<T> Default for Panel<T>
where
    T: HasId,
    T::IdType: Serialize + Debug + Clone + PartialEq + JsonSchema,
{
    fn default() -> Self {
        Self {
            records: DirectoryCache::default(),
            edit: EditState::Idle,
            banner: None,
        }
    }
}

impl<T> Panel<T>
where
    T: HasId,
    T::IdType: Serialize + Debug + Clone + PartialEq + JsonSchema,
{
    pub fn records(&self) -> &DirectoryCache<T> {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut DirectoryCache<T> {
        &mut self.records
    }

    pub fn edit_state(&self) -> &EditState<Id<T>> {
        &self.edit
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub(crate) async fn load<F>(&mut self, fetch: F, fallback: &str)
    where
        F: Future<Output = ApiResult<Vec<WithId<T>>>>,
    {
        self.records.load(fetch, fallback).await;
        self.banner = self.records.error().map(str::to_owned);
    }

    pub(crate) fn start_add(&mut self) {
        self.edit = EditState::Adding;
        self.banner = None;
    }

    /// Opens the form for `id`. Returns the record to fill the form with.
    pub(crate) fn start_edit(&mut self, id: &Id<T>) -> Option<&WithId<T>> {
        let record = self.records.get(id)?;
        self.edit = EditState::Editing(id.clone());
        self.banner = None;
        Some(record)
    }

    pub(crate) fn cancel(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Takes the answer to a save. Failures keep the form open for retry.
    pub(crate) fn saved(&mut self, result: ApiResult<WithId<T>>, fallback: &str) -> bool {
        match result {
            Ok(record) => {
                log::info!("Saved {:?}", record.id);
                self.records.upsert(record);
                self.edit = EditState::Idle;
                self.banner = None;
                true
            }
            Err(why) => {
                log::warn!("{}: {}", fallback, why);
                self.banner = Some(why.message_or(fallback));
                false
            }
        }
    }

    /// Deletes after the admin confirmed `question`. Nothing is requested
    /// when they decline.
    pub(crate) async fn delete<C, R, F>(
        &mut self,
        id: &Id<T>,
        confirm: &C,
        question: &str,
        request: R,
        fallback: &str,
    ) -> bool
    where
        C: Confirm + ?Sized,
        R: FnOnce() -> F,
        F: Future<Output = ApiResult<DeleteResponse>>,
    {
        if !confirm.confirm(question) {
            return false;
        }
        match request().await {
            Ok(response) => {
                log::info!("Deleted {:?}: {}", id, response.message);
                self.records.remove(id);
                if self.edit == EditState::Editing(id.clone()) {
                    self.edit = EditState::Idle;
                }
                self.banner = None;
                true
            }
            Err(why) => {
                log::warn!("{}: {}", fallback, why);
                self.banner = Some(why.message_or(fallback));
                false
            }
        }
    }
}
