use crate::Result;
use crate::parser::RawRow;

/// Seam between the pure pipeline and whatever supplies the raw results.
/// Page order matters: it defines section membership in the parser.
#[async_trait::async_trait]
pub trait ResultsSource: Send + Sync {
    async fn fetch_pages(&self) -> Result<Vec<Vec<RawRow>>>;

    fn name(&self) -> &'static str;
}
