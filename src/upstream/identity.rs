//! Browser identity for outbound requests.
//!
//! The upstream site is fetched the way a browser would, with a user agent
//! that changes from one request to the next.

use rand::seq::SliceRandom;
use rand::Rng;

/// Produces the `User-Agent` header value for one outbound request.
pub trait UserAgentProvider: Send + Sync {
    fn user_agent(&self) -> String;
}

const PLATFORMS: [&str; 6] = [
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
    "Windows NT 11.0; Win64; x64",
    "Macintosh; Intel Mac OS X 14_4_1",
];

#[derive(Debug, Clone, Copy)]
enum Browser {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

const BROWSERS: [Browser; 4] = [Browser::Chrome, Browser::Edge, Browser::Firefox, Browser::Safari];

/// Builds a plausible desktop browser user agent from random parts.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUserAgent;

impl RandomUserAgent {
    pub fn new() -> Self {
        Self
    }

    fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
        let browser = BROWSERS.choose(rng).copied().unwrap_or(Browser::Chrome);
        let platform = match browser {
            // Safari only ships on macOS.
            Browser::Safari => "Macintosh; Intel Mac OS X 10_15_7",
            _ => PLATFORMS.choose(rng).copied().unwrap_or(PLATFORMS[0]),
        };

        match browser {
            Browser::Chrome => {
                let major = rng.gen_range(118..=131);
                format!(
                    "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36"
                )
            }
            Browser::Edge => {
                let major = rng.gen_range(118..=131);
                format!(
                    "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36 Edg/{major}.0.0.0"
                )
            }
            Browser::Firefox => {
                let major = rng.gen_range(115..=133);
                let platform = platform.replace('_', ".");
                format!("Mozilla/5.0 ({platform}; rv:{major}.0) Gecko/20100101 Firefox/{major}.0")
            }
            Browser::Safari => {
                let major = rng.gen_range(16..=17);
                let minor = rng.gen_range(0..=6);
                format!(
                    "Mozilla/5.0 ({platform}) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{major}.{minor} Safari/605.1.15"
                )
            }
        }
    }
}

impl UserAgentProvider for RandomUserAgent {
    fn user_agent(&self) -> String {
        Self::generate(&mut rand::thread_rng())
    }
}

/// Always returns the same user agent.
#[derive(Debug, Clone)]
pub struct FixedUserAgent(pub String);

impl FixedUserAgent {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self(user_agent.into())
    }
}

impl UserAgentProvider for FixedUserAgent {
    fn user_agent(&self) -> String {
        self.0.clone()
    }
}
