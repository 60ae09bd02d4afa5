//! Handshake origin allow-list.
//!
//! Entries take three forms:
//!
//! | Entry                    | Matches                                   |
//! |--------------------------|-------------------------------------------|
//! | `http://localhost:5173`  | that exact origin                         |
//! | `https://*.example.app`  | any subdomain of `example.app` over https |
//! | `*`                      | every origin                              |
//!
//! A request without an `Origin` header (curl, native clients) is always
//! allowed. An empty policy allows everything.

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    Any,
    Exact(String),
    Subdomain { scheme: String, suffix: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    patterns: Vec<OriginPattern>,
}

fn normalize(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}

impl OriginPattern {
    pub fn parse(entry: &str) -> Result<Self, ValidationError> {
        let entry = normalize(entry);
        if entry == "*" {
            return Ok(OriginPattern::Any);
        }

        let (scheme, rest) = entry
            .split_once("://")
            .ok_or_else(|| ValidationError::invalid_format("origin", format!("missing scheme in '{entry}'")))?;
        if scheme.is_empty() || rest.is_empty() || rest.contains('/') {
            return Err(ValidationError::invalid_format(
                "origin",
                format!("'{entry}' is not a bare origin"),
            ));
        }

        match rest.strip_prefix("*.") {
            Some(suffix) if !suffix.is_empty() && !suffix.contains('*') => Ok(OriginPattern::Subdomain {
                scheme: scheme.to_string(),
                suffix: suffix.to_string(),
            }),
            Some(_) => Err(ValidationError::invalid_format(
                "origin",
                format!("'{entry}' has an invalid wildcard"),
            )),
            None if rest.contains('*') => Err(ValidationError::invalid_format(
                "origin",
                format!("'{entry}' has an invalid wildcard"),
            )),
            None => Ok(OriginPattern::Exact(entry)),
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        let origin = normalize(origin);
        match self {
            OriginPattern::Any => true,
            OriginPattern::Exact(exact) => *exact == origin,
            OriginPattern::Subdomain { scheme, suffix } => {
                let Some((origin_scheme, host)) = origin.split_once("://") else {
                    return false;
                };
                let Some(label) = host.strip_suffix(suffix.as_str()) else {
                    return false;
                };
                origin_scheme == scheme
                    && label.len() > 1
                    && label.ends_with('.')
                    && !label.contains('/')
            }
        }
    }
}

impl OriginPolicy {
    /// Builds a policy from allow-list entries, skipping blank ones.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = entries
            .into_iter()
            .filter(|e| !e.as_ref().trim().is_empty())
            .map(|e| OriginPattern::parse(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// A policy that accepts every origin.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.patterns.is_empty() || self.patterns.contains(&OriginPattern::Any)
    }

    pub fn patterns(&self) -> &[OriginPattern] {
        &self.patterns
    }

    /// Whether a handshake carrying `origin` may proceed.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(_) if self.is_open() => true,
            Some(origin) => self.patterns.iter().any(|p| p.matches(origin)),
        }
    }
}
