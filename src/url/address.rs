use crate::{UrlError, UrlResult};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// An absolute HTTP(S) page address
///
/// Two addresses are equal iff their serialized forms are equal. The only
/// adjustment made at construction is dropping the fragment, since a
/// fragment never names a different page. Everything else (trailing
/// slashes, query order, host case beyond what `url` already folds) is
/// left exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Url);

impl Address {
    /// Parses and validates an address string
    ///
    /// # Returns
    ///
    /// * `Ok(Address)` - Well-formed absolute HTTP(S) address
    /// * `Err(UrlError)` - The string is not a URL, has another scheme, or has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use focused_crawler::url::Address;
    ///
    /// let address = Address::parse("https://example.com/page#top").unwrap();
    /// assert_eq!(address.as_str(), "https://example.com/page");
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let url = Url::parse(input.trim())
            .map_err(|e| UrlError::Parse(format!("'{}': {}", input, e)))?;
        Self::from_url(url)
    }

    /// Wraps an already-parsed URL, applying the same validation as [`Address::parse`]
    pub fn from_url(mut url: Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost);
        }

        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Resolves a reference found on this page against it
    ///
    /// Returns None when the reference cannot be resolved or resolves to a
    /// non-HTTP(S) address.
    pub fn join(&self, reference: &str) -> Option<Address> {
        let resolved = self.0.join(reference).ok()?;
        Self::from_url(resolved).ok()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Address {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Address> for Url {
    fn from(address: Address) -> Self {
        address.0
    }
}
