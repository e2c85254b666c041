use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            bail!("invalid period: {} > {}", self.start, self.end);
        }
        Ok(())
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn n_years(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Smallest range covering both.
    pub fn envelope(&self, other: &YearRange) -> YearRange {
        YearRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Clamp a year into this range. Used when a requested year falls
    /// outside the coverage of a land product.
    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.start, self.end)
    }
}

/// The full set of sub-periods driving the assessment.
/// Each productivity component can run on its own window; the vegetation
/// index is integrated once over the envelope of all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentPeriods {
    /// Overall assessment window, also the state baseline start / target end.
    pub assessment: YearRange,
    pub trend: YearRange,
    pub performance: YearRange,
    /// Last year of the state baseline sub-period.
    pub state_baseline_end: i32,
    /// First year of the state target sub-period.
    pub state_target_start: i32,
    /// Soil organic carbon window.
    pub soc: YearRange,
}

impl AssessmentPeriods {
    pub fn validate(&self) -> Result<()> {
        self.assessment.validate()?;
        self.trend.validate()?;
        self.performance.validate()?;
        self.soc.validate()?;
        if !self.assessment.contains(self.state_baseline_end) {
            bail!(
                "state baseline end {} outside assessment {}..{}",
                self.state_baseline_end,
                self.assessment.start,
                self.assessment.end
            );
        }
        if !self.assessment.contains(self.state_target_start) {
            bail!(
                "state target start {} outside assessment {}..{}",
                self.state_target_start,
                self.assessment.start,
                self.assessment.end
            );
        }
        if self.state_target_start <= self.state_baseline_end {
            bail!("state target sub-period must start after the baseline ends");
        }
        Ok(())
    }

    pub fn state_baseline(&self) -> YearRange {
        YearRange::new(self.assessment.start, self.state_baseline_end)
    }

    pub fn state_target(&self) -> YearRange {
        YearRange::new(self.state_target_start, self.assessment.end)
    }

    /// Envelope of every sub-period that consumes the VI integration.
    pub fn integration_envelope(&self) -> YearRange {
        self.assessment
            .envelope(&self.trend)
            .envelope(&self.performance)
    }
}

impl Default for AssessmentPeriods {
    fn default() -> Self {
        Self {
            assessment: YearRange::new(2001, 2015),
            trend: YearRange::new(2001, 2015),
            performance: YearRange::new(2001, 2015),
            state_baseline_end: 2012,
            state_target_start: 2013,
            soc: YearRange::new(2001, 2015),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_periods_are_valid() {
        AssessmentPeriods::default().validate().unwrap();
    }

    #[test]
    fn envelope_spans_all_windows() {
        let mut p = AssessmentPeriods::default();
        p.trend = YearRange::new(1998, 2010);
        p.performance = YearRange::new(2005, 2018);
        let env = p.integration_envelope();
        assert_eq!(env, YearRange::new(1998, 2018));
    }

    #[test]
    fn state_sub_periods_must_not_overlap() {
        let mut p = AssessmentPeriods::default();
        p.state_target_start = p.state_baseline_end;
        assert!(p.validate().is_err());
    }

    #[test]
    fn reversed_range_is_invalid() {
        assert!(YearRange::new(2015, 2001).validate().is_err());
    }

    #[test]
    fn clamp_year_respects_coverage() {
        let range = YearRange::new(1992, 2020);
        assert_eq!(range.clamp_year(1980), 1992);
        assert_eq!(range.clamp_year(2030), 2020);
        assert_eq!(range.clamp_year(2000), 2000);
    }
}
