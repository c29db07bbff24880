use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
    ZeroOrMore,
    OneOrMore,
}

/// Path matcher in the `/dashboard/:path*` style.
///
/// `:name` matches one segment, `:name*` any number of trailing segments and
/// `:name+` at least one. Trailing and repeated slashes are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutePatternError {
    #[error("route pattern '{pattern}' must start with '/'")]
    MissingLeadingSlash { pattern: String },
    #[error("route pattern '{pattern}' has a parameter without a name")]
    EmptyParameter { pattern: String },
    #[error("route pattern '{pattern}' repeats a parameter before the final segment")]
    RepeatNotLast { pattern: String },
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self, RoutePatternError> {
        let source = raw.trim();
        let rest = source
            .strip_prefix('/')
            .ok_or_else(|| RoutePatternError::MissingLeadingSlash {
                pattern: source.to_string(),
            })?;

        let parts: Vec<&str> = rest.split('/').filter(|part| !part.is_empty()).collect();
        let last = parts.len().saturating_sub(1);
        let mut segments = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            let Some(name) = part.strip_prefix(':') else {
                segments.push(Segment::Literal((*part).to_string()));
                continue;
            };

            let (name, segment) = if let Some(name) = name.strip_suffix('*') {
                (name, Segment::ZeroOrMore)
            } else if let Some(name) = name.strip_suffix('+') {
                (name, Segment::OneOrMore)
            } else {
                (name, Segment::Param)
            };

            if name.is_empty() {
                return Err(RoutePatternError::EmptyParameter {
                    pattern: source.to_string(),
                });
            }
            if segment != Segment::Param && index != last {
                return Err(RoutePatternError::RepeatNotLast {
                    pattern: source.to_string(),
                });
            }
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    if parts.get(index) != Some(&literal.as_str()) {
                        return false;
                    }
                }
                Segment::Param => {
                    if index >= parts.len() {
                        return false;
                    }
                }
                Segment::ZeroOrMore => return true,
                Segment::OneOrMore => return parts.len() > index,
            }
        }

        parts.len() == self.segments.len()
    }
}

impl FromStr for RoutePattern {
    type Err = RoutePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
