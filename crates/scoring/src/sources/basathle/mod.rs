mod client;
mod extractor;
mod registry;

pub use client::BaseAthleClient;
pub use extractor::extract_rows;
pub use registry::{CompetitionConfig, CompetitionId, CompetitionRegistry};

use crate::parser::RawRow;
use crate::{Result, traits::ResultsSource};
use tracing::info;

/// Results source backed by the bases.athle.fr listing of a registered
/// competition. Fetches the configured number of pages in order and turns
/// each into raw rows.
pub struct BaseAthleSource {
    client: BaseAthleClient,
    config: CompetitionConfig,
}

impl BaseAthleSource {
    pub fn new(config: CompetitionConfig) -> Self {
        Self {
            client: BaseAthleClient::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl ResultsSource for BaseAthleSource {
    async fn fetch_pages(&self) -> Result<Vec<Vec<RawRow>>> {
        let mut pages = Vec::with_capacity(self.config.page_count as usize);

        for page in 0..self.config.page_count {
            info!("Fetching results page {}/{}", page + 1, self.config.page_count);
            let html = self
                .client
                .fetch_results_page(&self.config.results_url, page)
                .await?;
            let rows = extract_rows(&html, self.config.skip_for_page(page))?;
            info!("Extracted {} rows from page {}", rows.len(), page + 1);
            pages.push(rows);
        }

        Ok(pages)
    }

    fn name(&self) -> &'static str {
        "bases.athle.fr"
    }
}
