//! Upstream URL construction for catalog pages.

use url::Url;

/// Builds upstream URLs below `{origin}/cars/`.
///
/// Path parameters are pushed as single, percent-encoded segments, so `/`
/// and `?` in a slug stay inside it. `.` and `..` are dropped by the URL
/// path builder; callers must reject them first.
#[derive(Debug, Clone)]
pub struct CatalogUrls {
    origin: Url,
}

impl CatalogUrls {
    pub fn parse(origin: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            origin: Url::parse(origin)?,
        })
    }

    /// `/cars/`
    pub fn index(&self) -> String {
        self.build(&["cars", ""])
    }

    /// `/cars/{brand}/`
    pub fn brand(&self, brand: &str) -> String {
        self.build(&["cars", brand, ""])
    }

    /// `/cars/{brand}/{model}`
    pub fn model(&self, brand: &str, model: &str) -> String {
        self.build(&["cars", brand, model])
    }

    /// `/cars/{brand}/{model}/{generation}`
    pub fn generation(&self, brand: &str, model: &str, generation: &str) -> String {
        self.build(&["cars", brand, model, generation])
    }

    fn build(&self, segments: &[&str]) -> String {
        let mut url = self.origin.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url.into()
    }
}
