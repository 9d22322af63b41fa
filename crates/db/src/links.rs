use dlm_core::types::DbId;

/// Builds the public download link of a download from the site base URL.
#[derive(Debug, Clone)]
pub struct DownloadLinks {
    site_url: String,
}

impl DownloadLinks {
    pub fn new(site_url: impl Into<String>) -> Self {
        let site_url = site_url.into().trim_end_matches('/').to_string();
        Self { site_url }
    }

    /// `{site_url}/download/{id}/`
    pub fn link_for(&self, id: DbId) -> String {
        format!("{}/download/{id}/", self.site_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_uses_site_url_and_id() {
        let links = DownloadLinks::new("https://example.com");
        assert_eq!(links.link_for(12), "https://example.com/download/12/");
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let links = DownloadLinks::new("https://example.com/");
        assert_eq!(links.link_for(3), "https://example.com/download/3/");
    }
}
