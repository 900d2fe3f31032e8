use crate::error::Result;

/// Fetches one results page of a bases.athle.fr listing per call. The site
/// paginates through the `frmposition` query parameter; the caller supplies
/// the page index, never infers it.
pub struct BaseAthleClient {
    client: reqwest::Client,
}

impl BaseAthleClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
                .build()
                .expect("reqwest client with static configuration"),
        }
    }

    pub async fn fetch_results_page(&self, results_url: &str, page: u32) -> Result<String> {
        let url = format!("{}&frmposition={}", results_url, page);

        let response = self.client.get(&url).send().await?;
        let html = response.error_for_status()?.text().await?;

        Ok(html)
    }
}

impl Default for BaseAthleClient {
    fn default() -> Self {
        Self::new()
    }
}
