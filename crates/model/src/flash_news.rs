use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{ExampleData, WithId};

/// An announcement shown in the news ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlashNews {
    pub message: String,
}

impl HasId for FlashNews {
    type IdType = i32;
}

impl ExampleData for WithId<FlashNews> {
    fn example_data() -> Self {
        WithId::new(
            Id::new(1),
            FlashNews {
                message: "Smart India Hackathon - Internal Round -> Main Auditorium"
                    .to_owned(),
            },
        )
    }
}
