//! Command-line configuration for the `banksweep` binary.

use crate::error::{Result, SweepError};
use crate::money::Money;
use crate::rule::RuleSubmission;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Format of the balance input file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// `.csv` files are read as CSV; everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub input: PathBuf,
    pub format: InputFormat,

    /// Rule to submit before simulating. `None` keeps the default rule.
    pub rule: Option<RuleSubmission>,

    pub sweep_amount: Option<Money>,
}

impl CliConfig {
    /// Parses arguments, excluding the program name.
    ///
    /// Rule values are kept as raw text so they go through rule validation
    /// rather than being rejected here.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut input = None;
        let mut threshold = None;
        let mut frequency = None;
        let mut sweep_amount = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--threshold" => threshold = Some(value_for(&arg, args.next())?),
                "--frequency" => frequency = Some(value_for(&arg, args.next())?),
                "--sweep-amount" => {
                    let raw = value_for(&arg, args.next())?;
                    let amount = Money::from_str(&raw).map_err(|e| {
                        SweepError::InvalidArgument(format!("--sweep-amount {:?}: {}", raw, e))
                    })?;
                    if amount.is_negative() {
                        return Err(SweepError::InvalidArgument(format!(
                            "--sweep-amount {} must not be negative",
                            raw
                        )));
                    }
                    sweep_amount = Some(amount);
                }
                flag if flag.starts_with("--") => {
                    return Err(SweepError::InvalidArgument(format!("unknown option {}", flag)));
                }
                _ if input.is_none() => input = Some(PathBuf::from(&arg)),
                _ => {
                    return Err(SweepError::InvalidArgument(format!(
                        "unexpected argument {}",
                        arg
                    )));
                }
            }
        }

        let input = input.ok_or(SweepError::MissingArgument)?;
        let rule = match (threshold, frequency) {
            (Some(t), Some(f)) => Some(RuleSubmission::new(t, f)),
            (None, None) => None,
            _ => {
                return Err(SweepError::InvalidArgument(
                    "--threshold and --frequency must be given together".to_string(),
                ));
            }
        };

        Ok(CliConfig {
            format: InputFormat::from_path(&input),
            input,
            rule,
            sweep_amount,
        })
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| SweepError::InvalidArgument(format!("{} requires a value", flag)))
}
