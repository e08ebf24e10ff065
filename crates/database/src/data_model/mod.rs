use std::fmt::Debug;

use model::WithId;
use schemars::JsonSchema;
use serde::Serialize;
use utility::id::{HasId, Id};

pub mod account;
pub mod faculty;
pub mod flash_news;
pub mod location;

/// A table row that maps onto exactly one model record.
pub trait DatabaseRow {
    type Model: Serialize + HasId;

    fn get_id(&self) -> Id<Self::Model>;
    fn to_model(self) -> Self::Model;
    fn from_model(model: WithId<Self::Model>) -> Self
    where
        <Self::Model as HasId>::IdType: Debug + Clone + Serialize + PartialEq + JsonSchema;
}

pub fn with_ids<R: DatabaseRow>(rows: Vec<R>) -> Vec<WithId<R::Model>>
where
    <R::Model as HasId>::IdType: Debug + Clone + Serialize + PartialEq + JsonSchema,
{
    rows.into_iter().map(|row| with_id(row)).collect::<Vec<_>>()
}

pub fn with_id<R: DatabaseRow>(row: R) -> WithId<R::Model>
where
    <R::Model as HasId>::IdType: Debug + Clone + Serialize + PartialEq + JsonSchema,
{
    WithId::new(row.get_id(), row.to_model())
}

#[cfg(test)]
mod tests {
    use model::{faculty::Faculty, flash_news::FlashNews, location::Location, ExampleData};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data_model::{faculty::FacultyRow, flash_news::FlashNewsRow, location::LocationRow};

    fn stored<R: DatabaseRow>(model: WithId<R::Model>) -> WithId<R::Model>
    where
        <R::Model as HasId>::IdType: Debug + Clone + Serialize + PartialEq + JsonSchema,
    {
        with_id(R::from_model(model))
    }

    #[test]
    fn rows_keep_every_field() {
        let faculty = WithId::<Faculty>::example_data();
        assert_eq!(stored::<FacultyRow>(faculty.clone()), faculty);

        let location = WithId::<Location>::example_data();
        assert_eq!(stored::<LocationRow>(location.clone()), location);

        let news = WithId::<FlashNews>::example_data();
        assert_eq!(stored::<FlashNewsRow>(news.clone()), news);
    }
}
