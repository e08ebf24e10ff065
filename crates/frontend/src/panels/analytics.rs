use model::analytics::AnalyticsData;

use crate::api::DirectoryApi;

/// Counts shown at the top of the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    data: Option<AnalyticsData>,
    error: Option<String>,
}

impl AnalyticsSummary {
    pub async fn load<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        match api.analytics().await {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(why) => {
                log::warn!("Failed to load analytics: {}", why);
                self.error = Some(why.message_or("Failed to load analytics"));
            }
        }
    }

    pub fn data(&self) -> Option<&AnalyticsData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Share of faculty currently available, in whole percent.
    pub fn availability_percent(&self) -> Option<i64> {
        let data = self.data.as_ref()?;
        if data.total_faculty == 0 {
            return None;
        }
        Some(data.available_faculty * 100 / data.total_faculty)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::{fake::FakeApi, ApiError};

    #[tokio::test]
    async fn shows_counts_of_the_directory() {
        let api = FakeApi::seeded();
        let mut summary = AnalyticsSummary::default();
        summary.load(&api).await;

        let data = summary.data().unwrap();
        assert_eq!(data.total_locations, 6);
        assert_eq!(data.available_hods, 1);
        assert_eq!(summary.availability_percent(), Some(100));

        api.fail_next(ApiError::Other("offline".to_owned()));
        summary.load(&api).await;
        assert_eq!(summary.error(), Some("Failed to load analytics"));
        assert!(summary.data().is_some());
    }
}
