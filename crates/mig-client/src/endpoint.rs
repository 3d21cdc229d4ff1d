use reqwest::Url;

pub(crate) const DEFAULT_SECURE_PORT: u16 = 443;
pub(crate) const DEFAULT_PLAIN_PORT: u16 = 80;
const FALLBACK_HOST: &str = "localhost";

/// A resolved target endpoint: where write calls go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub secure: bool,
}

impl Endpoint {
    /// Base URL for requests against this endpoint.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

/// Resolve a free-form configured endpoint string into a usable endpoint.
///
/// The raw value may be a bare host, `host:port`, or a full URL, possibly
/// wrapped in stray quotes or brackets. `secure_default` supplies the
/// scheme when the string itself names none. Never fails: unparseable
/// input degrades to a best-effort split plus the scheme's conventional
/// port, and an empty host becomes `localhost`.
pub fn resolve_endpoint(raw: &str, secure_default: bool) -> Endpoint {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\'') && !c.is_whitespace())
        .collect();

    if cleaned.contains("://") {
        match Url::parse(&cleaned) {
            Ok(url) => {
                let secure = url.scheme() == "https";
                let host = match url.host_str() {
                    Some(host) if !host.is_empty() => host.to_string(),
                    _ => String::from(FALLBACK_HOST),
                };
                let port = url
                    .port()
                    .filter(|p| *p >= 1)
                    .unwrap_or(default_port(secure));

                return Endpoint { host, port, secure };
            }
            Err(_) => {
                let rest = cleaned
                    .split_once("://")
                    .map(|(_, rest)| rest)
                    .unwrap_or(&cleaned);

                return split_host_port(rest, secure_default);
            }
        }
    }

    split_host_port(&cleaned, secure_default)
}

fn default_port(secure: bool) -> u16 {
    if secure {
        DEFAULT_SECURE_PORT
    } else {
        DEFAULT_PLAIN_PORT
    }
}

/// Best-effort `host[:port]` split for values that are not URLs.
fn split_host_port(cleaned: &str, secure: bool) -> Endpoint {
    let (host_part, port_part) = match cleaned.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (cleaned, None),
    };

    let port = port_part
        .and_then(|p| p.parse::<u16>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(default_port(secure));

    let host = if host_part.is_empty() {
        String::from(FALLBACK_HOST)
    } else {
        host_part.to_string()
    };

    Endpoint { host, port, secure }
}
