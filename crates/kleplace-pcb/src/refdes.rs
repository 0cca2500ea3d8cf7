use regex::Regex;

use crate::{ComponentRef, PcbError, PlacementConfig};

/// `^<prefix>(\d+)$` over reference designators.
#[derive(Debug, Clone)]
pub struct RefPattern {
    prefix: String,
    re: Regex,
}

impl RefPattern {
    pub fn new(prefix: &str) -> Result<Self, PcbError> {
        let re = Regex::new(&format!(r"^{}(\d+)$", regex::escape(prefix))).map_err(|source| {
            PcbError::Pattern {
                prefix: prefix.to_string(),
                source,
            }
        })?;
        Ok(Self {
            prefix: prefix.to_string(),
            re,
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn matches(&self, reference: &str) -> bool {
        self.re.is_match(reference)
    }

    /// The digits after the prefix, verbatim. `SW01` yields `"01"`.
    #[must_use]
    pub fn suffix<'a>(&self, reference: &'a str) -> Option<&'a str> {
        self.re
            .captures(reference)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

/// Pairs keys with switches and switches with diodes.
#[derive(Debug, Clone)]
pub struct RefMatcher {
    pub primary: RefPattern,
    pub secondary: RefPattern,
}

impl RefMatcher {
    pub fn new(primary_prefix: &str, secondary_prefix: &str) -> Result<Self, PcbError> {
        Ok(Self {
            primary: RefPattern::new(primary_prefix)?,
            secondary: RefPattern::new(secondary_prefix)?,
        })
    }

    pub fn from_config(config: &PlacementConfig) -> Result<Self, PcbError> {
        Self::new(&config.primary_prefix, &config.secondary_prefix)
    }

    /// First primary component whose value equals `label`, ignoring case and
    /// surrounding whitespace. Later matches are ignored.
    #[must_use]
    pub fn match_primary<'a>(
        &self,
        label: &str,
        candidates: &'a [ComponentRef],
    ) -> Option<&'a ComponentRef> {
        let wanted = label.trim().to_lowercase();
        candidates
            .iter()
            .filter(|c| self.primary.matches(&c.reference))
            .find(|c| c.value.trim().to_lowercase() == wanted)
    }

    /// First secondary component whose number equals the primary's number.
    ///
    /// Numbers are compared as text, so `SW01` does not pair with `D1`.
    #[must_use]
    pub fn match_secondary<'a>(
        &self,
        primary: &ComponentRef,
        candidates: &'a [ComponentRef],
    ) -> Option<&'a ComponentRef> {
        let number = self.primary.suffix(&primary.reference)?;
        candidates
            .iter()
            .find(|c| self.secondary.suffix(&c.reference) == Some(number))
    }
}
