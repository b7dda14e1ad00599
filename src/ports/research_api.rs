//! ResearchApi port - chart vision analysis.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::foundation::Credential;
use crate::domain::research::{ChartImage, VisionReport};

/// Port for the research upload endpoint.
#[async_trait]
pub trait ResearchApi: Send + Sync {
    async fn analyze_chart(
        &self,
        credential: Option<&Credential>,
        image: &ChartImage,
    ) -> Result<VisionReport, ApiError>;
}
