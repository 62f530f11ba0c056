//! Combined statistics report.

use serde::{Deserialize, Serialize};

use crate::engine::{
    AgeExtreme, AthleteMedalSummary, AthleteParticipation, AthleteProfile, CountryMedals,
    MedalGapCounts, QueryEngine, WeightRange,
};
use crate::utils::error::{StatsError, StatsResult};

/// Every query answer bundled into one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub athlete: AthleteMedalSummary,
    pub nation_count: usize,
    pub youngest: Vec<AthleteProfile>,
    pub oldest: Vec<AthleteProfile>,
    pub weight_range: Option<WeightRange>,
    pub most_frequent_athlete: Option<AthleteParticipation>,
    pub top_countries: Vec<CountryMedals>,
    pub medal_gaps: MedalGapCounts,
    pub never_medaled: Vec<String>,
}

impl QueryEngine {
    /// Run every query and bundle the answers
    pub fn generate_report(&self, athlete: &str, top_n: usize) -> StatisticsReport {
        let mut top_countries = self.country_medal_ranking();
        top_countries.truncate(top_n);

        StatisticsReport {
            athlete: self.athlete_medal_summary(athlete),
            nation_count: self.distinct_nation_count(),
            youngest: self.extreme_age(AgeExtreme::Youngest),
            oldest: self.extreme_age(AgeExtreme::Oldest),
            weight_range: self.weight_range(),
            most_frequent_athlete: self.most_frequent_athlete(),
            top_countries,
            medal_gaps: self.medal_gap_counts(),
            never_medaled: self.countries_never_medaled(),
        }
    }

    /// Generate report as JSON string
    pub fn generate_report_json(&self, athlete: &str, top_n: usize) -> StatsResult<String> {
        let report = self.generate_report(athlete, top_n);
        serde_json::to_string_pretty(&report).map_err(|e| StatsError::Internal(e.to_string()))
    }

    /// Generate Markdown report
    pub fn generate_report_markdown(&self, athlete: &str, top_n: usize) -> String {
        let report = self.generate_report(athlete, top_n);

        let mut md = String::new();
        md.push_str("# Olympic Games Statistics Report\n\n");

        md.push_str("## Athlete Medals\n\n");
        md.push_str(&format!("**{}** won {} medal(s).\n\n", report.athlete.athlete, report.athlete.total));
        if !report.athlete.breakdown.is_empty() {
            md.push_str("| Medal | Count |\n");
            md.push_str("|-------|-------|\n");
            for (medal, count) in &report.athlete.breakdown {
                md.push_str(&format!("| {} | {} |\n", medal, count));
            }
            md.push('\n');
        }

        md.push_str("## Participation\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Nations | {} |\n", report.nation_count));
        let weight = report
            .weight_range
            .map(|range| format!("{:.1} kg - {:.1} kg", range.min, range.max))
            .unwrap_or_else(|| "N/A".to_string());
        md.push_str(&format!("| Weight Range | {} |\n", weight));
        if let Some(ref athlete) = report.most_frequent_athlete {
            md.push_str(&format!(
                "| Most Frequent Athlete | {} ({} entries) |\n",
                athlete.name, athlete.entries
            ));
        }
        md.push('\n');

        for (title, profiles) in [("Youngest Athletes", &report.youngest), ("Oldest Athletes", &report.oldest)] {
            if profiles.is_empty() {
                continue;
            }
            md.push_str(&format!("## {}\n\n", title));
            md.push_str("| Name | Age | Sex | Team | Year | Sport | Event |\n");
            md.push_str("|------|-----|-----|------|------|-------|-------|\n");
            for profile in profiles {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    profile.name,
                    profile.age,
                    profile.sex,
                    profile.team,
                    profile.year,
                    profile.sport,
                    profile.event
                ));
            }
            md.push('\n');
        }

        if !report.top_countries.is_empty() {
            md.push_str("## Medal Ranking\n\n");
            md.push_str("| Rank | Country | NOC | Gold | Silver | Bronze | Total |\n");
            md.push_str("|------|---------|-----|------|--------|--------|-------|\n");
            for (i, row) in report.top_countries.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    i + 1,
                    row.country,
                    row.noc,
                    row.gold,
                    row.silver,
                    row.bronze,
                    row.total
                ));
            }
            md.push('\n');
        }

        md.push_str("## Countries Without Medals\n\n");
        md.push_str("| Medal | Countries |\n");
        md.push_str("|-------|-----------|\n");
        md.push_str(&format!("| Any | {} |\n", report.medal_gaps.any));
        md.push_str(&format!("| Gold | {} |\n", report.medal_gaps.gold));
        md.push_str(&format!("| Silver | {} |\n", report.medal_gaps.silver));
        md.push_str(&format!("| Bronze | {} |\n", report.medal_gaps.bronze));
        md.push('\n');

        if !report.never_medaled.is_empty() {
            md.push_str("### Never Medaled\n\n");
            for country in &report.never_medaled {
                md.push_str(&format!("- {}\n", country));
            }
            md.push('\n');
        }

        md
    }
}
