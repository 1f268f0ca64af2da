use crate::domain::model::SkipReason;
use url::{Host, Url};

pub const ONION_SUFFIX: &str = ".onion";
pub const IDN_PREFIX: &str = "xn-";
pub const DEFAULT_MIN_LABEL_LENGTH: usize = 6;

/// Reduces a raw domain to its registrable label, or says why it should
/// not be scored.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    min_label_length: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LABEL_LENGTH)
    }
}

impl Normalizer {
    pub fn new(min_label_length: usize) -> Self {
        Self { min_label_length }
    }

    pub fn normalize(&self, raw: &str) -> Result<String, SkipReason> {
        let host = match parse_host(raw) {
            ParsedHost::Empty => return Err(SkipReason::Empty),
            ParsedHost::Ip => return Err(SkipReason::IpAddress),
            ParsedHost::Name(host) => host,
        };

        if host.ends_with(ONION_SUFFIX) {
            return Err(SkipReason::AnonymityNetwork);
        }

        let label = registrable_label(&host);

        // Hosts that failed IDNA mapping keep their raw text, so a
        // non-ASCII label can still get here.
        if label.starts_with(IDN_PREFIX) || !label.is_ascii() {
            return Err(SkipReason::Internationalized);
        }

        if label.chars().count() < self.min_label_length {
            return Err(SkipReason::TooShort);
        }

        Ok(label.to_string())
    }
}

enum ParsedHost {
    Empty,
    Ip,
    Name(String),
}

fn parse_host(raw: &str) -> ParsedHost {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedHost::Empty;
    }

    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
            .ok()
            .and_then(|url| url.host().map(|host| host.to_owned()))
    } else {
        Host::parse(trimmed.trim_end_matches('.')).ok()
    };

    let name = match parsed {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => return ParsedHost::Ip,
        Some(Host::Domain(name)) => name,
        // Not a WHATWG-valid host (bad punycode, stray characters); keep the
        // text and let the suffix rules decide.
        None => trimmed.to_lowercase(),
    };

    let name = name.trim_end_matches('.').to_string();
    if name.is_empty() {
        ParsedHost::Empty
    } else {
        ParsedHost::Name(name)
    }
}

/// The registrable domain minus its public suffix: "example" for
/// "www.example.co.uk".
///
/// Only ICANN suffixes count. Private entries such as "blogspot.com" or
/// "github.io" are treated as ordinary registrable domains, so
/// "myblog12.blogspot.com" yields "blogspot".
pub fn registrable_label(host: &str) -> &str {
    let Some(suffix) = psl::suffix(host.as_bytes()) else {
        return if host.contains('.') { "" } else { host };
    };

    let mut suffix_len = suffix.as_bytes().len();
    if suffix.typ() == Some(psl::Type::Private) {
        suffix_len = icann_suffix_len(&host[host.len() - suffix_len..]);
    }

    if suffix_len >= host.len() {
        // The host is itself a public suffix.
        return if suffix.is_known() || host.contains('.') { "" } else { host };
    }

    let rest = host[..host.len() - suffix_len].trim_end_matches('.');
    rest.rsplit('.').next().unwrap_or(rest)
}

/// Length of the ICANN suffix that a private suffix sits under.
fn icann_suffix_len(private: &str) -> usize {
    let mut rest = private;
    while let Some((_, tail)) = rest.split_once('.') {
        rest = tail;
        if let Some(suffix) = psl::suffix(rest.as_bytes()) {
            if suffix.typ() == Some(psl::Type::Icann) && suffix.as_bytes().len() == rest.len() {
                return rest.len();
            }
        }
    }
    rest.len()
}
