//! Sweep rule model and submission validation.

use crate::error::{Result, SweepError};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How often a sweep is meant to run. Stored with the rule, never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Frequency {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(SweepError::validation(
                "frequency",
                format!("{:?} is not one of daily, weekly, monthly", other),
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

/// The threshold/frequency pair governing sweep eligibility.
///
/// # Invariants
///
/// - `threshold >= 0`
/// - `frequency` is `None` only for [`SweepRule::default`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRule {
    /// Accounts must hold strictly more than this to be swept.
    pub threshold: Money,

    pub frequency: Option<Frequency>,
}

impl SweepRule {
    /// Threshold used until a session submits its own rule.
    pub const DEFAULT_THRESHOLD: Money = Money::from_unsigned_cents(2000);

    /// Creates a rule, rejecting a negative threshold.
    pub fn new(threshold: Money, frequency: Frequency) -> Result<Self> {
        if threshold.is_negative() {
            return Err(SweepError::validation(
                "threshold",
                format!("{} must not be negative", threshold),
            ));
        }
        Ok(SweepRule {
            threshold,
            frequency: Some(frequency),
        })
    }
}

impl Default for SweepRule {
    fn default() -> Self {
        SweepRule {
            threshold: Self::DEFAULT_THRESHOLD,
            frequency: None,
        }
    }
}

/// Raw rule input as received from a form or API body.
///
/// `threshold` may arrive as a JSON string or number; both are kept as text
/// until [`RuleSubmission::validate`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSubmission {
    #[serde(deserialize_with = "text_or_number")]
    pub threshold: String,
    pub frequency: String,
}

impl RuleSubmission {
    pub fn new(threshold: impl Into<String>, frequency: impl Into<String>) -> Self {
        RuleSubmission {
            threshold: threshold.into(),
            frequency: frequency.into(),
        }
    }

    /// Converts the submission into a rule, or reports which field is invalid.
    pub fn validate(&self) -> Result<SweepRule> {
        let raw = self.threshold.trim();
        if raw.is_empty() {
            return Err(SweepError::validation("threshold", "value is required"));
        }
        let decimal = Decimal::from_str(raw).map_err(|e| {
            SweepError::validation("threshold", format!("{:?} is not a number: {}", raw, e))
        })?;
        // Checked before rounding so "-0.001" is refused rather than rounded to zero.
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(SweepError::validation(
                "threshold",
                format!("{} must not be negative", raw),
            ));
        }
        let threshold = Money::try_from(decimal).map_err(|e| {
            SweepError::validation("threshold", format!("{} is out of range: {}", raw, e))
        })?;
        let frequency = Frequency::from_str(&self.frequency)?;
        SweepRule::new(threshold, frequency)
    }
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule() {
        let rule = SweepRule::default();
        assert_eq!(rule.threshold.to_string(), "20.00");
        assert_eq!(rule.frequency, None);
    }

    #[test]
    fn test_frequency_parse_is_lenient_on_case_and_space() {
        assert_eq!(Frequency::from_str("daily").unwrap(), Frequency::Daily);
        assert_eq!(Frequency::from_str("  Weekly ").unwrap(), Frequency::Weekly);
        assert_eq!(Frequency::from_str("MONTHLY").unwrap(), Frequency::Monthly);
    }

    #[test]
    fn test_frequency_rejects_unknown() {
        let err = Frequency::from_str("hourly").unwrap_err();
        assert!(matches!(err, SweepError::Validation { field: "frequency", .. }));
        assert!(Frequency::from_str("").is_err());
    }

    #[test]
    fn test_validate_accepts_valid_submission() {
        let rule = RuleSubmission::new("35.5", "weekly").validate().unwrap();
        assert_eq!(rule.threshold.to_string(), "35.50");
        assert_eq!(rule.frequency, Some(Frequency::Weekly));
    }

    #[test]
    fn test_validate_accepts_zero_threshold() {
        let rule = RuleSubmission::new("0", "daily").validate().unwrap();
        assert_eq!(rule.threshold, Money::ZERO);
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        for raw in ["-5", "-0.01", "-0.001"] {
            let err = RuleSubmission::new(raw, "daily").validate().unwrap_err();
            assert!(
                matches!(err, SweepError::Validation { field: "threshold", .. }),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_validate_rejects_non_numeric_threshold() {
        for raw in ["", "   ", "abc", "12,50", "NaN", "inf", "1.2.3"] {
            let err = RuleSubmission::new(raw, "daily").validate().unwrap_err();
            assert!(
                matches!(err, SweepError::Validation { field: "threshold", .. }),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_validate_accepts_separators_and_exponents() {
        for raw in ["1000", "1_000", "1e3", "1000.00"] {
            let rule = RuleSubmission::new(raw, "daily").validate().unwrap();
            assert_eq!(rule.threshold, Money::from_cents(100_000), "{:?}", raw);
        }
    }

    #[test]
    fn test_validate_rejects_threshold_without_room_for_cents() {
        let err = RuleSubmission::new("79228162514264337593543950335", "daily")
            .validate()
            .unwrap_err();
        assert!(matches!(err, SweepError::Validation { field: "threshold", .. }));
    }

    #[test]
    fn test_validate_rejects_unknown_frequency() {
        let err = RuleSubmission::new("10", "yearly").validate().unwrap_err();
        assert!(matches!(err, SweepError::Validation { field: "frequency", .. }));
    }

    #[test]
    fn test_new_rejects_negative_money() {
        assert!(SweepRule::new(Money::from_cents(-1), Frequency::Daily).is_err());
    }

    #[test]
    fn test_submission_from_json_number_or_string() {
        let a: RuleSubmission =
            serde_json::from_str(r#"{"threshold": 42.5, "frequency": "daily"}"#).unwrap();
        let b: RuleSubmission =
            serde_json::from_str(r#"{"threshold": "42.5", "frequency": "daily"}"#).unwrap();
        assert_eq!(a.validate().unwrap(), b.validate().unwrap());
    }
}
