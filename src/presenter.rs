//! Display-ready view of a scoring reply.
//!
//! Pure derivation: nothing here holds state. The verdict always follows the
//! service's `pred_riesgo`, never the probability.

use crate::scoring::PredictionResponse;

/// Colour family a front end should use for the verdict badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    HighRisk,
    LowRisk,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::HighRisk => "ALTO RIESGO",
            Self::LowRisk => "BAJO RIESGO",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::HighRisk => Severity::Error,
            Self::LowRisk => Severity::Success,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    /// Probability as a percentage with one decimal, e.g. `"73.4%"`.
    pub percentage: String,
    pub verdict: Verdict,
    /// Flags raised by the service, verbatim; `None` when there are none.
    pub flags: Option<Vec<String>>,
}

impl ResultView {
    pub fn severity(&self) -> Severity {
        self.verdict.severity()
    }
}

pub fn present(response: &PredictionResponse) -> ResultView {
    let verdict = if response.pred_riesgo == 1 {
        Verdict::HighRisk
    } else {
        Verdict::LowRisk
    };
    let flags = response
        .top_flags
        .as_ref()
        .filter(|flags| !flags.is_empty())
        .cloned();
    ResultView {
        percentage: format_percentage(response.prob_riesgo),
        verdict,
        flags,
    }
}

fn format_percentage(probability: f64) -> String {
    format!("{}%", one_decimal(probability * 100.0))
}

/// One decimal place with exact halves rounded away from zero.
///
/// `{:.1}` rounds an exact half to even. A value with an exact hundredths
/// digit of 5 is an odd multiple of 1/4, so those are detected exactly and
/// rounded up in magnitude; everything else is already decided by `{:.1}`.
fn one_decimal(value: f64) -> String {
    let is_half = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if is_half {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}
