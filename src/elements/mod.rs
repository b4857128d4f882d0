mod error;
pub(crate) mod lookup;
mod source;

pub use error::ElementsError;
pub use lookup::{find_elements, ElementsPair};
pub use source::ElementsSource;

/// Fetches the feed once and extracts the entry for `name`.
pub async fn fetch_elements(
    source: &ElementsSource,
    name: &str,
) -> Result<ElementsPair, ElementsError> {
    let feed = source.fetch().await?;
    let pair = find_elements(&feed, name)?;
    log::info!("Found elements for {} in {}", pair.name, source);
    Ok(pair)
}
