//! Console rendering of trials.

use std::fmt;

use crate::runner::{Trial, TrialOutcome};

/// Significant digits used for results and elapsed seconds.
pub const PRECISION: usize = 10;

/// Formats `value` like C's `%.{digits}g`: fixed or scientific notation,
/// whichever the exponent calls for, without trailing zeros.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Two-line summary of a trial: the result, then the cumulative elapsed time.
pub struct Report<'a>(pub &'a Trial);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trial = self.0;
        match trial.outcome {
            TrialOutcome::Value(v) => writeln!(
                f,
                "Result with {} threads: {}",
                trial.threads,
                format_significant(v, PRECISION)
            )?,
            TrialOutcome::ContainsNaN => writeln!(
                f,
                "Result with {} threads: calculation contains NaN.",
                trial.threads
            )?,
        }
        write!(
            f,
            "Elapsed time: {} seconds",
            format_significant(trial.elapsed.as_secs_f64(), PRECISION)
        )
    }
}
