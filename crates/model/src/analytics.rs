use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    faculty::{Faculty, ROLE_CC, ROLE_HOD},
    ExampleData,
};

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsData {
    pub total_faculty: i64,
    pub total_locations: i64,
    pub available_faculty: i64,
    pub unavailable_faculty: i64,
    pub available_hods: i64,
    pub available_ccs: i64,
}

impl AnalyticsData {
    pub fn tally<'a, I>(faculty: I, total_locations: i64) -> Self
    where
        I: IntoIterator<Item = &'a Faculty>,
    {
        let mut data = Self {
            total_locations,
            ..Default::default()
        };
        for member in faculty {
            data.total_faculty += 1;
            if !member.availability {
                continue;
            }
            data.available_faculty += 1;
            if member.has_role(ROLE_HOD) {
                data.available_hods += 1;
            }
            if member.has_role(ROLE_CC) {
                data.available_ccs += 1;
            }
        }
        data.unavailable_faculty = data.total_faculty - data.available_faculty;
        data
    }
}

impl ExampleData for AnalyticsData {
    fn example_data() -> Self {
        Self {
            total_faculty: 42,
            total_locations: 120,
            available_faculty: 30,
            unavailable_faculty: 12,
            available_hods: 4,
            available_ccs: 9,
        }
    }
}
