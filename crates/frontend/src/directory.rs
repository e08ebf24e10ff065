use std::{cmp::Ordering, fmt::Debug, future::Future};

use model::WithId;
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::{HasId, Id};

use crate::api::ApiResult;

/// A view's own copy of one backend list. Every view fetches when it is
/// shown; nothing is shared or invalidated across views.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryCache<T>
where
    T: HasId,
    T::IdType: Serialize + Debug + Clone + PartialEq + JsonSchema,
{
    entries: Vec<WithId<T>>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for DirectoryCache<T>
where
    T: HasId,
    T::IdType: Serialize + Debug + Clone + PartialEq + JsonSchema,
{
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> DirectoryCache<T>
where
    T: HasId,
    T::IdType: Serialize + Debug + Clone + PartialEq + JsonSchema,
{
    pub fn new(entries: Vec<WithId<T>>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Marks the list as being fetched. The entries shown so far stay until
    /// [`DirectoryCache::finish_load`] is called.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Takes the result of a fetch. On failure the previous entries stay and
    /// `fallback` (or the server message) is kept as the error.
    pub fn finish_load(&mut self, result: ApiResult<Vec<WithId<T>>>, fallback: &str) -> bool {
        self.loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
                true
            }
            Err(why) => {
                log::warn!("{}: {}", fallback, why);
                self.error = Some(why.message_or(fallback));
                false
            }
        }
    }

    /// Replaces the entries with the result of `fetch`.
    pub async fn load<F>(&mut self, fetch: F, fallback: &str) -> bool
    where
        F: Future<Output = ApiResult<Vec<WithId<T>>>>,
    {
        self.begin_load();
        let result = fetch.await;
        self.finish_load(result, fallback)
    }

    pub fn entries(&self) -> &[WithId<T>] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &Id<T>) -> Option<&WithId<T>> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn contains(&self, id: &Id<T>) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the entry with the same id, or appends it.
    pub fn upsert(&mut self, entry: WithId<T>) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&WithId<T>, &WithId<T>) -> Ordering,
    {
        self.entries.sort_by(compare);
    }

    /// Removes the entry with `id`, leaving every other entry in place.
    pub fn remove(&mut self, id: &Id<T>) -> Option<WithId<T>> {
        let index = self.entries.iter().position(|entry| &entry.id == id)?;
        Some(self.entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use model::{location::Location, ExampleData};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::{fake::FakeApi, DirectoryApi};

    #[tokio::test]
    async fn load_keeps_entries_on_failure() {
        let api = FakeApi::seeded();
        let mut cache = DirectoryCache::<Location>::default();
        assert!(cache.load(api.locations(), "Failed to load locations").await);
        assert_eq!(cache.entries().len(), 6);
        assert!(!cache.is_loading());

        api.fail_next(crate::api::ApiError::Other("offline".to_owned()));
        assert!(!cache.load(api.locations(), "Failed to load locations").await);
        assert_eq!(cache.entries().len(), 6);
        assert_eq!(cache.error(), Some("Failed to load locations"));
    }

    #[tokio::test]
    async fn loading_lasts_until_the_result_arrives() {
        let api = FakeApi::seeded();
        let mut cache = DirectoryCache::new(vec![WithId::<Location>::example_data()]);
        cache.begin_load();
        assert!(cache.is_loading());
        assert_eq!(cache.entries().len(), 1);

        let result = api.locations().await;
        assert!(cache.finish_load(result, "Failed to load locations"));
        assert!(!cache.is_loading());
        assert_eq!(cache.entries().len(), 6);
    }

    #[test]
    fn remove_only_touches_matching_entry() {
        let a101 = WithId::<Location>::example_data();
        let b204 = WithId::new(Id::new("B-204".to_owned()), Location::new("B-204", Some("Lab")));
        let mut cache = DirectoryCache::new(vec![a101.clone(), b204.clone()]);

        assert_eq!(cache.remove(&Id::new("Z-9".to_owned())), None);
        assert_eq!(cache.remove(&a101.id), Some(a101));
        assert_eq!(cache.entries(), &[b204.clone()]);

        let renamed = b204.map(|_| Location::new("B-204", Some("Chemistry Lab")));
        cache.upsert(renamed.clone());
        assert_eq!(cache.entries(), &[renamed]);
    }
}
