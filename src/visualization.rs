use log::debug;
use serde_json::{Value, json};

use crate::core::analytics::AnalyticsReport;

// Generates Chart.js configurations for the analytics views
pub struct Visualization;

impl Visualization {
    /// Generates a Chart.js line chart configuration for the six-month
    /// spend trend of an analytics report.
    ///
    /// # Arguments
    /// * `room_name` - Display name of the room, used in the chart title.
    /// * `report` - The analytics report to visualize.
    ///
    /// # Returns
    /// A JSON Value containing the Chart.js configuration.
    pub fn monthly_trend_chart(room_name: &str, report: &AnalyticsReport) -> Value {
        debug!(
            "Generating trend chart for '{}' with {} buckets",
            room_name,
            report.monthly_trend.len()
        );

        let labels: Vec<String> = report.monthly_trend.iter().map(|b| b.label()).collect();
        let data: Vec<Value> = report
            .monthly_trend
            .iter()
            .map(|b| json!(b.total.round_dp(2)))
            .collect();

        json!({
            "type": "line",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": "Monthly Spend",
                    "data": data,
                    "borderColor": "rgba(75, 192, 192, 1)",
                    "backgroundColor": "rgba(75, 192, 192, 0.6)",
                    "borderWidth": 2,
                    "fill": false
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "title": {
                            "display": true,
                            "text": "Approved Spend"
                        }
                    },
                    "x": {
                        "title": {
                            "display": true,
                            "text": "Month"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": format!("Monthly Spend Trend: {}", room_name)
                    }
                }
            }
        })
    }
}
