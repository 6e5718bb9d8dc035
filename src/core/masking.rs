//! Sensitive-data masking for formatted log output
//!
//! An ordered rule list is applied over the whole text, each rule's output
//! feeding the next. Built-in rules run before user-registered ones, and
//! specific patterns run before generic ones (credit cards before SSNs) so a
//! later rule never re-exposes what an earlier one redacted. Masking is pure
//! and never fails: non-matching text passes through untouched.

use super::error::{LoggerError, Result};
use regex::{Captures, Regex, RegexBuilder};
use std::fmt;

/// Replacement text that `***MASKED***` values carry in the output
pub const MASKED: &str = "***MASKED***";

/// How a matched secret is rewritten
pub enum Replacement {
    /// Literal template, with `$n`/`${n}` capture expansion
    Literal(String),
    /// Arbitrary function of the match
    Transform(Box<dyn Fn(&Captures) -> String + Send + Sync>),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(template) => f.debug_tuple("Literal").field(template).finish(),
            Replacement::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// A single masking rule: pattern plus replacement
#[derive(Debug)]
pub struct MaskingRule {
    pattern: Regex,
    replacement: Replacement,
}

impl MaskingRule {
    /// Build a rule with a literal replacement template
    pub fn literal(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| LoggerError::mask_pattern(pattern, e))?;
        Ok(Self {
            pattern: regex,
            replacement: Replacement::Literal(replacement.into()),
        })
    }

    /// Build a rule whose replacement is a function of the match
    pub fn transform<F>(pattern: &str, transform: F) -> Result<Self>
    where
        F: Fn(&Captures) -> String + Send + Sync + 'static,
    {
        let regex =
            Regex::new(pattern).map_err(|e| LoggerError::mask_pattern(pattern, e))?;
        Ok(Self {
            pattern: regex,
            replacement: Replacement::Transform(Box::new(transform)),
        })
    }

    fn apply(&self, text: &str) -> String {
        match &self.replacement {
            Replacement::Literal(template) => {
                self.pattern.replace_all(text, template.as_str()).into_owned()
            }
            Replacement::Transform(transform) => self
                .pattern
                .replace_all(text, |caps: &Captures| transform(caps))
                .into_owned(),
        }
    }
}

/// Masks secrets in arbitrary text before it leaves the process
pub struct SensitiveDataMasker {
    builtin: Vec<MaskingRule>,
    custom: Vec<MaskingRule>,
}

impl fmt::Debug for SensitiveDataMasker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensitiveDataMasker")
            .field("builtin", &self.builtin.len())
            .field("custom", &self.custom.len())
            .finish()
    }
}

impl SensitiveDataMasker {
    pub fn new() -> Self {
        Self {
            builtin: Self::builtin_rules(),
            custom: Vec::new(),
        }
    }

    fn builtin_rules() -> Vec<MaskingRule> {
        let key_value = |key: &str| -> MaskingRule {
            MaskingRule::literal(
                &format!(r#"(?i)({}["']?\s*[:=]\s*["']?)([^"'\s]+)"#, key),
                format!("${{1}}{}", MASKED),
            )
            .expect("built-in masking pattern is valid")
        };

        vec![
            // Passwords
            key_value("password"),
            // API keys
            key_value("api[_-]?key"),
            // Tokens
            key_value("token"),
            // Credit card numbers
            MaskingRule::literal(
                r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
                "****-****-****-****",
            )
            .expect("built-in masking pattern is valid"),
            // Social Security Numbers
            MaskingRule::literal(r"\b\d{3}[-\s]?\d{2}[-\s]?\d{4}\b", "***-**-****")
                .expect("built-in masking pattern is valid"),
            // Email addresses, partial: keep the first two chars of the local part
            MaskingRule::transform(
                r"\b([A-Za-z0-9._%+-]+)@([A-Za-z0-9.-]+\.[A-Za-z]{2,})\b",
                |caps: &Captures| {
                    let local = &caps[1];
                    let kept: String = local.chars().take(2).collect();
                    format!("{}***@{}", kept, &caps[2])
                },
            )
            .expect("built-in masking pattern is valid"),
        ]
    }

    /// Register a custom rule, applied after all built-ins
    ///
    /// The pattern is compiled case-insensitively; a malformed pattern is
    /// rejected here rather than silently skipped at format time.
    pub fn add_pattern(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| LoggerError::mask_pattern(pattern, e))?;
        self.custom.push(MaskingRule {
            pattern: regex,
            replacement: Replacement::Literal(replacement.to_string()),
        });
        Ok(())
    }

    /// Register a pre-built rule, applied after all built-ins
    pub fn add_rule(&mut self, rule: MaskingRule) {
        self.custom.push(rule);
    }

    /// Mask sensitive data in text
    pub fn mask_data(&self, text: &str) -> String {
        let mut masked = text.to_string();
        for rule in self.builtin.iter().chain(self.custom.iter()) {
            masked = rule.apply(&masked);
        }
        masked
    }
}

impl Default for SensitiveDataMasker {
    fn default() -> Self {
        Self::new()
    }
}
