//! Enumerations describing the shape of an experiment design.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseOptionError;

/// Whether the alternative hypothesis allows deviation in one or both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sidedness {
    /// Deviation in one direction only; the full alpha sits in one tail.
    OneSided,
    /// Deviation in either direction; alpha is split across both tails.
    #[default]
    TwoSided,
}

impl Sidedness {
    /// Number of tails alpha is spread across.
    pub fn tails(&self) -> u8 {
        match self {
            Sidedness::OneSided => 1,
            Sidedness::TwoSided => 2,
        }
    }

    /// Alpha mass in a single tail.
    pub fn tail_alpha(&self, alpha: f64) -> f64 {
        alpha / f64::from(self.tails())
    }
}

impl TryFrom<u8> for Sidedness {
    type Error = ParseOptionError;

    fn try_from(sides: u8) -> Result<Self, Self::Error> {
        match sides {
            1 => Ok(Sidedness::OneSided),
            2 => Ok(Sidedness::TwoSided),
            other => Err(ParseOptionError::new("sides", other.to_string(), "1 or 2")),
        }
    }
}

impl FromStr for Sidedness {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" | "one-sided" | "one_sided" => Ok(Sidedness::OneSided),
            "2" | "two" | "two-sided" | "two_sided" => Ok(Sidedness::TwoSided),
            _ => Err(ParseOptionError::new("sides", s, "1 or 2")),
        }
    }
}

impl fmt::Display for Sidedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sidedness::OneSided => write!(f, "one-sided"),
            Sidedness::TwoSided => write!(f, "two-sided"),
        }
    }
}

/// Kind of metric being compared between arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// A rate in (0, 1), e.g. a conversion rate.
    #[default]
    Proportion,
    /// A continuous mean with a known standard deviation.
    Mean,
}

impl FromStr for MetricKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proportion" => Ok(MetricKind::Proportion),
            "mean" => Ok(MetricKind::Mean),
            _ => Err(ParseOptionError::new("metric_type", s, "'proportion' or 'mean'")),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Proportion => write!(f, "proportion"),
            MetricKind::Mean => write!(f, "mean"),
        }
    }
}

/// How a requested effect relates to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// The effect is the delta itself: target = baseline + mde.
    #[default]
    Absolute,
    /// The effect is a lift: target = baseline * (1 + mde).
    Relative,
}

impl FromStr for EffectKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absolute" => Ok(EffectKind::Absolute),
            "relative" => Ok(EffectKind::Relative),
            _ => Err(ParseOptionError::new("mde_type", s, "'relative' or 'absolute'")),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Absolute => write!(f, "absolute"),
            EffectKind::Relative => write!(f, "relative"),
        }
    }
}

/// Distribution family the test statistic is referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestFamily {
    /// Standard normal (z-test).
    #[default]
    Normal,
    /// Student's t with degrees of freedom derived from the sample sizes.
    StudentT,
    /// Chi-square test of two proportions; sized with the equivalent z formula.
    ChiSquare,
}

impl TestFamily {
    /// Whether the critical values depend on the sample size through degrees of freedom.
    pub fn depends_on_sample_size(&self) -> bool {
        matches!(self, TestFamily::StudentT)
    }
}

impl FromStr for TestFamily {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "z" | "normal" => Ok(TestFamily::Normal),
            "t" | "student-t" | "student_t" => Ok(TestFamily::StudentT),
            "chi2" | "chi-square" | "chi_square" => Ok(TestFamily::ChiSquare),
            _ => Err(ParseOptionError::new("test_type", s, "'z', 't', or 'chi2'")),
        }
    }
}

impl fmt::Display for TestFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFamily::Normal => write!(f, "z"),
            TestFamily::StudentT => write!(f, "t"),
            TestFamily::ChiSquare => write!(f, "chi2"),
        }
    }
}

/// Multiple-comparison adjustment applied to alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionMethod {
    /// Alpha is used as given.
    #[default]
    None,
    /// alpha / m.
    Bonferroni,
    /// 1 - (1 - alpha)^(1/m).
    Sidak,
}

impl CorrectionMethod {
    /// Whether this method changes alpha at all.
    pub fn is_applied(&self) -> bool {
        !matches!(self, CorrectionMethod::None)
    }
}

impl FromStr for CorrectionMethod {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(CorrectionMethod::None),
            "bonferroni" => Ok(CorrectionMethod::Bonferroni),
            "sidak" => Ok(CorrectionMethod::Sidak),
            _ => Err(ParseOptionError::new(
                "correction",
                s,
                "'bonferroni', 'sidak', or none",
            )),
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionMethod::None => write!(f, "none"),
            CorrectionMethod::Bonferroni => write!(f, "bonferroni"),
            CorrectionMethod::Sidak => write!(f, "sidak"),
        }
    }
}
