use charming::{
    component::{Axis, Legend, Title},
    element::{AxisLabel, AxisType, ItemStyle},
    series::Bar,
    Chart,
};
use colored::*;
use serde::Serialize;

use crate::engine::CountryMedals;
use crate::utils::error::{StatsError, StatsResult};

/// Bar colors as RGB, matching the medal metals
pub const GOLD_RGB: (u8, u8, u8) = (0xFF, 0xD7, 0x00);
pub const SILVER_RGB: (u8, u8, u8) = (0xC0, 0xC0, 0xC0);
pub const BRONZE_RGB: (u8, u8, u8) = (0xCD, 0x7F, 0x32);

/// Rotation of the country labels on the category axis, in degrees
const LABEL_ROTATION: f64 = 45.0;

/// Stack group shared by the three medal series
const MEDAL_STACK: &str = "medals";

fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// One stacked bar of the medal chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedalBar {
    pub label: String,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl MedalBar {
    pub fn total(&self) -> usize {
        self.gold + self.silver + self.bronze
    }
}

/// Stacked gold / silver / bronze bar chart of the best ranked countries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedalBarChart {
    pub title: String,
    pub bars: Vec<MedalBar>,
}

impl MedalBarChart {
    /// Build the chart from the first `top_n` rows of a ranking
    ///
    /// The ranking is expected to be sorted by total already; bars keep its order.
    pub fn from_ranking(ranking: &[CountryMedals], top_n: usize) -> StatsResult<Self> {
        if top_n == 0 {
            return Err(StatsError::Presentation(
                "the medal chart needs at least one bar".to_string(),
            ));
        }

        let bars = ranking
            .iter()
            .take(top_n)
            .map(|row| MedalBar {
                label: row.country.clone(),
                gold: row.gold,
                silver: row.silver,
                bronze: row.bronze,
            })
            .collect();

        Ok(Self {
            title: format!("Top {} countries by total medals", top_n),
            bars,
        })
    }

    /// Render horizontal stacked bars scaled to `width` columns
    pub fn render_terminal(&self, width: usize) -> String {
        if self.bars.is_empty() {
            return "No medal data to chart.".dimmed().to_string();
        }

        let max_total = self.bars.iter().map(MedalBar::total).max().unwrap_or(0).max(1);
        let label_width = self.bars.iter().map(|bar| bar.label.chars().count()).max().unwrap_or(0);
        let scale = |count: usize| (count * width + max_total / 2) / max_total;

        let mut output = String::new();
        output.push_str(&format!("{}\n\n", self.title.bold()));

        for bar in &self.bars {
            let segment = |count: usize, (r, g, b): (u8, u8, u8)| {
                "█".repeat(scale(count)).truecolor(r, g, b).to_string()
            };

            output.push_str(&format!(
                "{:>label_width$} |{}{}{} {}\n",
                bar.label,
                segment(bar.gold, GOLD_RGB),
                segment(bar.silver, SILVER_RGB),
                segment(bar.bronze, BRONZE_RGB),
                bar.total().to_string().bold(),
                label_width = label_width
            ));
        }

        output.push_str(&format!(
            "\n{} {}  {} {}  {} {}\n",
            "■".truecolor(GOLD_RGB.0, GOLD_RGB.1, GOLD_RGB.2),
            "Gold",
            "■".truecolor(SILVER_RGB.0, SILVER_RGB.1, SILVER_RGB.2),
            "Silver",
            "■".truecolor(BRONZE_RGB.0, BRONZE_RGB.1, BRONZE_RGB.2),
            "Bronze"
        ));

        output
    }

    /// ECharts option with one stacked bar series per medal kind
    pub fn to_echarts(&self) -> Chart {
        let labels: Vec<String> = self.bars.iter().map(|bar| bar.label.clone()).collect();
        let series = |name: &str, count: fn(&MedalBar) -> usize, color: (u8, u8, u8)| {
            let values: Vec<f64> = self.bars.iter().map(|bar| count(bar) as f64).collect();
            Bar::new()
                .name(name)
                .stack(MEDAL_STACK)
                .item_style(ItemStyle::new().color(hex(color).as_str()))
                .data(values)
        };

        Chart::new()
            .title(Title::new().text(self.title.as_str()).left("center"))
            .legend(Legend::new().data(vec!["Gold", "Silver", "Bronze"]).bottom(0))
            .x_axis(
                Axis::new()
                    .type_(AxisType::Category)
                    .data(labels)
                    .axis_label(AxisLabel::new().rotate(LABEL_ROTATION)),
            )
            .y_axis(Axis::new().type_(AxisType::Value).name("Number of medals"))
            .series(series("Gold", |bar| bar.gold, GOLD_RGB))
            .series(series("Silver", |bar| bar.silver, SILVER_RGB))
            .series(series("Bronze", |bar| bar.bronze, BRONZE_RGB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, gold: usize, silver: usize, bronze: usize) -> CountryMedals {
        CountryMedals {
            country: country.to_string(),
            noc: country[..3].to_uppercase(),
            gold,
            silver,
            bronze,
            total: gold + silver + bronze,
        }
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(hex(GOLD_RGB), "#FFD700");
        assert_eq!(hex(SILVER_RGB), "#C0C0C0");
        assert_eq!(hex(BRONZE_RGB), "#CD7F32");
    }

    #[test]
    fn test_chart_keeps_top_rows_in_order() {
        let ranking = vec![row("United States", 5, 3, 1), row("Germany", 2, 2, 2), row("Kenya", 1, 0, 0)];
        let chart = MedalBarChart::from_ranking(&ranking, 2).unwrap();

        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].label, "United States");
        assert_eq!(chart.bars[1].total(), 6);
    }

    #[test]
    fn test_zero_bars_is_rejected() {
        let result = MedalBarChart::from_ranking(&[], 0);
        assert!(matches!(result, Err(StatsError::Presentation(_))));
    }

    #[test]
    fn test_echarts_series_are_stacked() {
        let chart = MedalBarChart::from_ranking(&[row("Norway", 3, 2, 1)], 10).unwrap();
        let option = serde_json::to_value(chart.to_echarts()).unwrap();

        let series = option["series"].as_array().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0]["type"], "bar");
        assert_eq!(series[0]["name"], "Gold");
        assert!(series.iter().all(|s| s["stack"] == MEDAL_STACK));
        assert_eq!(series[1]["data"][0].as_f64(), Some(2.0));
        assert_eq!(series[2]["data"][0].as_f64(), Some(1.0));
    }

    #[test]
    fn test_terminal_chart_lists_every_bar() {
        colored::control::set_override(false);
        let chart = MedalBarChart::from_ranking(&[row("Norway", 3, 2, 1), row("Sweden", 1, 0, 0)], 10).unwrap();
        let rendered = chart.render_terminal(20);

        assert!(rendered.contains("Norway |"));
        assert!(rendered.contains("Sweden |"));
        assert!(rendered.contains("Bronze"));
    }
}
