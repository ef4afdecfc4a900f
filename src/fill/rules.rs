//! Declarative auto-fill rules keyed by field identifier

use regex_lite::{Regex, RegexBuilder};
use thiserror::Error;

use super::api::{FillProvider, FillSuggestion};
use crate::core::config::AutoFillConfig;
use crate::core::field::FormField;

/// Produces a placeholder value for a matched field
pub type Generator = Box<dyn Fn(&FormField) -> String + Send + Sync>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },
}

/// One identifier pattern and its generator
pub struct FillRule {
    pattern: Regex,
    generator: Generator,
}

impl FillRule {
    /// Compile a case-insensitive rule
    pub fn new(pattern: &str, generator: Generator) -> Result<Self, RuleError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: regex,
            generator,
        })
    }

    /// Rule that always yields the same value
    pub fn fixed(pattern: &str, value: impl Into<String>) -> Result<Self, RuleError> {
        let value = value.into();
        Self::new(pattern, Box::new(move |_| value.clone()))
    }

    fn matches(&self, field_id: &str) -> bool {
        self.pattern.is_match(field_id)
    }
}

const BUILTIN_RULES: &[(&str, &str)] = &[
    ("email", "jane.smith@example.com"),
    ("phone|mobile", "+1 555-987-6543"),
    ("passport", "P4829301"),
    ("tax_id", "TX-4821-9930"),
    ("id_number|^id$", "ID-7731-2208"),
    ("nationality", "United States"),
    ("address", "221B Baker Street, London, UK"),
    ("dob|birth", "1990-01-01"),
    ("date", "2025-07-01"),
    ("duration|days|stay", "14"),
    ("purpose", "Tourism"),
    ("income|salary", "75000"),
    ("deduction", "15000"),
    ("year", "2024-2025"),
    ("destination|country", "India"),
    ("name", "Jane Smith"),
];

/// Ordered rule table; the first matching rule wins
pub struct RuleTable {
    rules: Vec<FillRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleTable {
    /// Table with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in placeholder rules
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .filter_map(|(pattern, value)| match FillRule::fixed(pattern, *value) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::error!("Skipping built-in rule: {}", e);
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Built-in rules preceded by the configured extra rules.
    ///
    /// Rules with an invalid pattern are logged and skipped.
    pub fn from_config(config: &AutoFillConfig) -> Self {
        let mut table = Self::empty();

        for extra in &config.extra_rules {
            match FillRule::fixed(&extra.pattern, extra.value.clone()) {
                Ok(rule) => table.push(rule),
                Err(e) => tracing::warn!("Ignoring auto-fill rule: {}", e),
            }
        }

        table.rules.extend(Self::builtin().rules);
        table
    }

    /// Append a rule after the existing ones
    pub fn push(&mut self, rule: FillRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Value from the first rule matching the field id, if it is non-empty
    pub fn value_for(&self, field: &FormField) -> Option<String> {
        let rule = self.rules.iter().find(|r| r.matches(&field.id))?;
        let value = (rule.generator)(field);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

impl FillProvider for RuleTable {
    fn name(&self) -> &str {
        "placeholder rules"
    }

    fn suggest(&self, fields: &[FormField]) -> Vec<FillSuggestion> {
        fields
            .iter()
            .filter(|f| f.is_empty())
            .filter_map(|f| self.value_for(f).map(|v| FillSuggestion::new(&f.id, v)))
            .collect()
    }
}
