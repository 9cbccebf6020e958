use url::Url;

/// Marketplace search endpoint that every affiliate link points at.
pub const MARKETPLACE_SEARCH_URL: &str = "https://www.amazon.com/s";

/// Builds marketplace search links, tagged with the partner tag when one is configured.
#[derive(Debug, Clone)]
pub struct AffiliateLinker {
    base: Url,
    tag: Option<String>,
}

impl AffiliateLinker {
    pub fn new(tag: Option<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(MARKETPLACE_SEARCH_URL)?,
            tag: tag.filter(|t| !t.trim().is_empty()),
        })
    }

    /// `https://www.amazon.com/s?k=<query>[&tag=<tag>]`. An absent tag adds no parameter.
    pub fn link(&self, query: &str) -> String {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("k", query);
            if let Some(tag) = &self.tag {
                pairs.append_pair("tag", tag);
            }
        }
        url.into()
    }
}
