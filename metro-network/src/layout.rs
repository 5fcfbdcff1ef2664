//! Declarative network layouts.
//!
//! A [`MetroLayout`] describes a whole network as data: lines in order,
//! each station with its travel time from the previous one and any
//! transfers. Layouts can be read from JSON and replayed onto a
//! [`MetroBuilder`], so the same validation applies as when building by
//! hand.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metro::{Metro, MetroBuilder, MetroError};

/// Errors from loading a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The layout file could not be read
    #[error("cannot read layout: {0}")]
    Io(#[from] std::io::Error),

    /// The layout text is not valid JSON for a layout
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A station after the first has no travel time
    #[error("station {station} on line {line} needs a travel time from the previous station")]
    MissingTravelTime { line: String, station: String },

    /// The layout describes an invalid topology
    #[error("invalid layout: {0}")]
    Metro(#[from] MetroError),
}

/// A whole network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetroLayout {
    /// City served by the network
    pub city: String,

    /// Lines, created in this order
    pub lines: Vec<LineLayout>,

    /// Transfers added once every line is built, as `[from, to]` pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<(String, String)>,
}

/// One line and its stations in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineLayout {
    /// Line color
    pub color: String,

    /// Stations from first to last
    pub stations: Vec<StationLayout>,
}

/// One station on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLayout {
    /// Station name
    pub name: String,

    /// Travel time from the previous station (e.g. "2M21S"); unset for the first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_from_previous: Option<String>,

    /// Names of already-declared stations on other lines to transfer to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<String>,
}

impl StationLayout {
    /// A station without travel time or transfers.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            time_from_previous: None,
            transfers: Vec::new(),
        }
    }

    /// Set the travel time from the previous station.
    pub fn after(mut self, time: &str) -> Self {
        self.time_from_previous = Some(time.to_string());
        self
    }

    /// Add a transfer to a station on another line.
    pub fn transfer_to(mut self, station: &str) -> Self {
        self.transfers.push(station.to_string());
        self
    }
}

impl MetroLayout {
    /// Parse a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the layout as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replay the layout onto a fresh builder.
    pub fn to_builder(&self) -> Result<MetroBuilder, LayoutError> {
        let mut builder = MetroBuilder::new(self.city.as_str());

        for line in &self.lines {
            builder.create_line(&line.color)?;

            for (index, station) in line.stations.iter().enumerate() {
                let transfers: Vec<&str> = station.transfers.iter().map(String::as_str).collect();

                if index == 0 {
                    builder.create_first_station(&line.color, &station.name, &transfers)?;
                    continue;
                }

                let time = station.time_from_previous.as_deref().ok_or_else(|| {
                    LayoutError::MissingTravelTime {
                        line: line.color.clone(),
                        station: station.name.clone(),
                    }
                })?;
                builder.create_last_station(&line.color, &station.name, time, &transfers)?;
            }
        }

        for (from, to) in &self.transfers {
            builder.add_transfer(from, to)?;
        }

        debug!(city = %self.city, lines = self.lines.len(), "applied layout");
        Ok(builder)
    }

    /// Build the finished network.
    pub fn build(&self) -> Result<Metro, LayoutError> {
        self.to_builder().map(MetroBuilder::build)
    }
}

/// The Perm network: the Red and Blue lines, joined at Perm1 and Tyazhmash.
pub fn perm_layout() -> MetroLayout {
    MetroLayout {
        city: "Perm".to_string(),
        lines: vec![
            LineLayout {
                color: "Red".to_string(),
                stations: vec![
                    StationLayout::new("Sportivnaya"),
                    StationLayout::new("Medvedkovskaya").after("2M21S"),
                    StationLayout::new("Molodezhnaya").after("1M58S"),
                    StationLayout::new("Perm1").after("3M"),
                    StationLayout::new("Perm2").after("2M10S"),
                    StationLayout::new("DvoretsKultury").after("4M26S"),
                ],
            },
            LineLayout {
                color: "Blue".to_string(),
                stations: vec![
                    StationLayout::new("Pacanskaya"),
                    StationLayout::new("UlicaKirova").after("1M30S"),
                    StationLayout::new("Tyazhmash")
                        .after("1M47S")
                        .transfer_to("Perm1"),
                    StationLayout::new("Nizhnekamskaya").after("3M19S"),
                    StationLayout::new("Soborna").after("1M48S"),
                ],
            },
        ],
        transfers: vec![("Perm1".to_string(), "Tyazhmash".to_string())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashier::{Cashier, TariffConfig};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn perm_layout_builds() {
        let metro = perm_layout().build().unwrap();

        assert_eq!(metro.city(), "Perm");
        assert_eq!(metro.lines().len(), 2);
        assert_eq!(metro.station_count(), 11);
        assert_eq!(metro.transfers().len(), 1);
    }

    #[test]
    fn perm_layout_stage_counts() {
        let metro = perm_layout().build().unwrap();

        assert_eq!(metro.count_stages("Sportivnaya", "Perm2").unwrap(), 4);
        assert_eq!(metro.count_stages("Sportivnaya", "Soborna").unwrap(), 5);
    }

    #[test]
    fn ticket_priced_on_perm_network() {
        let metro = perm_layout().build().unwrap();
        let mut cashier = Cashier::new("Sportivnaya", TariffConfig::default());
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let price = cashier
            .sell_ticket(&metro, "Sportivnaya", "Soborna", day)
            .unwrap();

        // 5 stages at 5 plus a fee of 20
        assert_eq!(price, Decimal::from(45));
    }

    #[test]
    fn json_layout_roundtrip() {
        let layout = perm_layout();
        let json = layout.to_json().unwrap();
        assert_eq!(MetroLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn parse_minimal_json() {
        let json = r#"{
            "city": "Test",
            "lines": [
                {
                    "color": "Green",
                    "stations": [
                        { "name": "A" },
                        { "name": "B", "time_from_previous": "1M" }
                    ]
                }
            ]
        }"#;

        let metro = MetroLayout::from_json(json).unwrap().build().unwrap();
        assert_eq!(metro.count_stages("A", "B").unwrap(), 1);
    }

    #[test]
    fn missing_travel_time_rejected() {
        let layout = MetroLayout {
            city: "Test".into(),
            lines: vec![LineLayout {
                color: "Green".into(),
                stations: vec![StationLayout::new("A"), StationLayout::new("B")],
            }],
            transfers: Vec::new(),
        };

        let err = layout.build().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MissingTravelTime { ref line, ref station } if line == "Green" && station == "B"
        ));
    }

    #[test]
    fn topology_errors_surface() {
        let mut layout = perm_layout();
        layout.lines[1].stations[0].name = "Perm1".into();

        let err = layout.build().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Metro(MetroError::StationAlreadyExists(ref name)) if name == "Perm1"
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            MetroLayout::from_json("{ not json"),
            Err(LayoutError::Json(_))
        ));
    }
}
