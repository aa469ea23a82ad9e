//! Blocking HTTP access to the release server using the curl crate (libcurl).

use std::time::Duration;

use super::{Existence, FetchError, ReleaseIndex, ReleaseUrls};
use crate::platform::Platform;
use crate::version::Version;

/// Transport knobs. `None` keeps libcurl's own default.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// [`ReleaseIndex`] backed by real HTTP requests. One curl easy handle per
/// request; requests run in the calling thread.
#[derive(Debug, Clone)]
pub struct HttpReleaseIndex {
    urls: ReleaseUrls,
    options: HttpOptions,
}

impl HttpReleaseIndex {
    pub fn new(urls: ReleaseUrls, options: HttpOptions) -> Self {
        Self { urls, options }
    }

    fn easy(&self, url: &str) -> Result<curl::easy::Easy, FetchError> {
        let curl_err = |source| FetchError::Curl {
            url: url.to_string(),
            source,
        };
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        if let Some(t) = self.options.connect_timeout {
            easy.connect_timeout(t).map_err(curl_err)?;
        }
        if let Some(t) = self.options.timeout {
            easy.timeout(t).map_err(curl_err)?;
        }
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua).map_err(curl_err)?;
        }
        Ok(easy)
    }

    /// HEAD request; returns the response code.
    fn head(&self, url: &str) -> Result<u32, FetchError> {
        let curl_err = |source| FetchError::Curl {
            url: url.to_string(),
            source,
        };
        let mut easy = self.easy(url)?;
        easy.nobody(true).map_err(curl_err)?;
        easy.perform().map_err(curl_err)?;
        easy.response_code().map_err(curl_err)
    }

    /// GET request; returns the response code and body.
    fn get(&self, url: &str) -> Result<(u32, Vec<u8>), FetchError> {
        let curl_err = |source| FetchError::Curl {
            url: url.to_string(),
            source,
        };
        let mut body = Vec::new();
        let mut easy = self.easy(url)?;
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }
        let code = easy.response_code().map_err(curl_err)?;
        Ok((code, body))
    }
}

fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

/// Maps a probe response code onto [`Existence`]. `None` means the code is
/// not acceptable for a probe.
fn existence_from_status(code: u32) -> Option<Existence> {
    match code {
        404 => Some(Existence::Absent),
        c if is_success(c) => Some(Existence::Present),
        _ => None,
    }
}

impl ReleaseIndex for HttpReleaseIndex {
    fn probe(&self, version: Version) -> Result<Existence, FetchError> {
        let url = self.urls.index(version)?;
        let mut method = "HEAD";
        let mut code = self.head(&url)?;
        if code == 405 {
            tracing::debug!("HEAD {} not allowed, retrying with GET", url);
            method = "GET";
            code = self.get(&url)?.0;
        }
        tracing::debug!("{} {} -> {}", method, url, code);
        existence_from_status(code).ok_or(FetchError::Http { method, url, code })
    }

    fn checksum_file(&self, version: Version, platform: &Platform) -> Result<String, FetchError> {
        let url = self.urls.checksum(version, platform)?;
        let (code, body) = self.get(&url)?;
        tracing::debug!("GET {} -> {} ({} bytes)", url, code, body.len());
        if !is_success(code) {
            return Err(FetchError::Http {
                method: "GET",
                url,
                code,
            });
        }
        String::from_utf8(body).map_err(|source| FetchError::Utf8 { url, source })
    }
}
