//! Building a network line by line.

use tracing::debug;

use crate::domain::LineColor;

use super::error::MetroError;
use super::line::Line;
use super::network::Metro;
use super::station::{LineId, Station, StationId, Transfer};
use super::validate::{check_duration, check_line_not_exists, check_station_not_exists};

/// Builder for a [`Metro`].
///
/// All mutation happens here. Each request is fully validated before it
/// touches the topology, so a failed call leaves the network unchanged.
/// [`MetroBuilder::build`] hands over the finished, read-only network.
///
/// # Example
///
/// ```
/// use metro_network::metro::MetroBuilder;
///
/// let mut builder = MetroBuilder::new("Perm");
/// builder.create_line("Red").unwrap();
/// builder.create_first_station("Red", "Sportivnaya", &[]).unwrap();
/// builder.create_last_station("Red", "Medvedkovskaya", "2M21S", &[]).unwrap();
///
/// let metro = builder.build();
/// assert_eq!(metro.count_stages("Sportivnaya", "Medvedkovskaya").unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MetroBuilder {
    pub(super) metro: Metro,
}

impl MetroBuilder {
    /// Create a builder for an empty network in `city`.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            metro: Metro::new(city.into()),
        }
    }

    /// Read access to the network built so far.
    pub fn metro(&self) -> &Metro {
        &self.metro
    }

    /// Finish building and return the network.
    pub fn build(self) -> Metro {
        debug!(
            city = %self.metro.city,
            lines = self.metro.lines.len(),
            stations = self.metro.stations.len(),
            transfers = self.metro.transfers.len(),
            "metro built"
        );
        self.metro
    }

    /// Create a new, empty line.
    pub fn create_line(&mut self, color: &str) -> Result<&Line, MetroError> {
        let color = LineColor::parse(color)?;
        check_line_not_exists(&self.metro.lines_by_color, &color)?;

        let id = LineId(self.metro.lines.len());
        self.metro.lines_by_color.insert(color.clone(), id);
        self.metro.lines.push(Line::new(id, color));

        debug!(line = %self.metro.lines[id.0].color, "created line");
        Ok(&self.metro.lines[id.0])
    }

    /// Create the first station of an empty line.
    ///
    /// `transfer_stations` names existing stations on other lines that this
    /// station connects to. Names on the station's own line are ignored.
    /// Station names are stored trimmed.
    pub fn create_first_station(
        &mut self,
        line_color: &str,
        name: &str,
        transfer_stations: &[&str],
    ) -> Result<&Station, MetroError> {
        let name = name.trim();
        let line = self.metro.line_id(line_color)?;
        check_station_not_exists(&self.metro.stations_by_name, name)?;
        let targets = self.resolve_transfer_targets(line, transfer_stations)?;

        let id = self.metro.lines[line.0].create_first_station(&mut self.metro.stations, name)?;
        Ok(self.register_station(id, &targets))
    }

    /// Append a station after the current last station of a line.
    ///
    /// `duration` is the travel time from the current last station, in the
    /// compact form accepted by [`SegmentDuration`](crate::domain::SegmentDuration).
    pub fn create_last_station(
        &mut self,
        line_color: &str,
        name: &str,
        duration: &str,
        transfer_stations: &[&str],
    ) -> Result<&Station, MetroError> {
        let name = name.trim();
        let line = self.metro.line_id(line_color)?;
        check_station_not_exists(&self.metro.stations_by_name, name)?;
        let time_to_station = check_duration(duration)?;
        let targets = self.resolve_transfer_targets(line, transfer_stations)?;

        let id = self.metro.lines[line.0].create_last_station(
            &mut self.metro.stations,
            name,
            time_to_station,
        )?;
        Ok(self.register_station(id, &targets))
    }

    /// Record a transfer between two existing stations on different lines.
    ///
    /// Adding a transfer that already exists, in either direction, is a no-op.
    pub fn add_transfer(&mut self, from: &str, to: &str) -> Result<(), MetroError> {
        let from_id = self.metro.station_id(from)?;
        let to_id = self.metro.station_id(to)?;

        if self.metro.station(from_id).line() == self.metro.station(to_id).line() {
            return Err(MetroError::SameLineTransfer(from.to_string(), to.to_string()));
        }

        if self.metro.transfers.iter().any(|t| t.joins(from_id, to_id)) {
            debug!(from, to, "transfer already recorded");
            return Ok(());
        }

        self.metro.transfers.push(Transfer {
            from: from_id,
            to: to_id,
        });
        debug!(from, to, "added transfer");
        Ok(())
    }

    /// Resolve transfer target names, dropping those on `line` itself.
    fn resolve_transfer_targets(
        &self,
        line: LineId,
        names: &[&str],
    ) -> Result<Vec<StationId>, MetroError> {
        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            let id = self.metro.station_id(name)?;
            if self.metro.station(id).line() == line {
                debug!(station = *name, "ignoring transfer to own line");
                continue;
            }
            if !targets.contains(&id) {
                targets.push(id);
            }
        }
        Ok(targets)
    }

    /// Index a freshly created station by name and record its transfers.
    fn register_station(&mut self, id: StationId, targets: &[StationId]) -> &Station {
        let name = self.metro.stations[id.0].name.clone();
        self.metro.stations_by_name.insert(name, id);
        for &to in targets {
            self.metro.transfers.push(Transfer { from: id, to });
        }
        &self.metro.stations[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metro::ErrorKind;

    fn red_line() -> MetroBuilder {
        let mut builder = MetroBuilder::new("Perm");
        builder.create_line("Red").unwrap();
        builder.create_first_station("Red", "A", &[]).unwrap();
        builder.create_last_station("Red", "B", "1M", &[]).unwrap();
        builder
    }

    #[test]
    fn create_line_twice_fails() {
        let mut builder = MetroBuilder::new("Perm");
        builder.create_line("Red").unwrap();

        let err = builder.create_line("Red").unwrap_err();
        assert_eq!(
            err,
            MetroError::LineAlreadyExists(LineColor::parse("Red").unwrap())
        );
        // Colors compare after trimming.
        assert!(builder.create_line(" Red ").is_err());
        assert_eq!(builder.metro().lines().len(), 1);
    }

    #[test]
    fn create_line_blank_color_fails() {
        let mut builder = MetroBuilder::new("Perm");
        let err = builder.create_line("  ").unwrap_err();
        assert!(matches!(err, MetroError::InvalidLineColor(_)));
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn station_on_missing_line_fails() {
        let mut builder = MetroBuilder::new("Perm");
        let err = builder.create_first_station("Red", "A", &[]).unwrap_err();
        assert_eq!(err, MetroError::LineNotExists("Red".into()));

        let err = builder
            .create_last_station("Red", "A", "1M", &[])
            .unwrap_err();
        assert_eq!(err, MetroError::LineNotExists("Red".into()));
    }

    #[test]
    fn first_station_twice_fails() {
        let mut builder = red_line();
        let err = builder.create_first_station("Red", "C", &[]).unwrap_err();
        assert_eq!(
            err,
            MetroError::LineNotEmpty(LineColor::parse("Red").unwrap())
        );
        assert!(builder.metro().get_station_by_name("C").is_err());
    }

    #[test]
    fn last_station_on_empty_line_fails() {
        let mut builder = MetroBuilder::new("Perm");
        builder.create_line("Red").unwrap();
        let err = builder
            .create_last_station("Red", "A", "1M", &[])
            .unwrap_err();
        assert_eq!(err, MetroError::EmptyLine(LineColor::parse("Red").unwrap()));
    }

    #[test]
    fn duplicate_station_name_fails_across_lines() {
        let mut builder = red_line();
        builder.create_line("Blue").unwrap();

        let err = builder.create_first_station("Blue", "A", &[]).unwrap_err();
        assert_eq!(err, MetroError::StationAlreadyExists("A".into()));
        assert!(builder.metro().find_line_by_color("Blue").unwrap().is_empty());
    }

    #[test]
    fn invalid_duration_fails_without_mutation() {
        let mut builder = red_line();
        let err = builder
            .create_last_station("Red", "C", "0M0S", &[])
            .unwrap_err();
        assert!(matches!(err, MetroError::InvalidDuration { .. }));

        let metro = builder.build();
        assert_eq!(metro.station_count(), 2);
        let b = metro.get_station_by_name("B").unwrap();
        assert!(b.is_last_in_line());
    }

    #[test]
    fn unknown_transfer_target_fails_without_mutation() {
        let mut builder = red_line();
        builder.create_line("Blue").unwrap();

        let err = builder
            .create_first_station("Blue", "X", &["Nowhere"])
            .unwrap_err();
        assert_eq!(err, MetroError::StationNotFound("Nowhere".into()));
        assert!(builder.metro().get_station_by_name("X").is_err());
        assert!(builder.metro().find_line_by_color("Blue").unwrap().is_empty());
    }

    #[test]
    fn transfers_to_own_line_are_stripped() {
        let mut builder = red_line();
        let c = builder
            .create_last_station("Red", "C", "1M", &["A"])
            .unwrap()
            .id();

        let metro = builder.build();
        assert!(!metro.is_transfer_station(c));
        assert!(metro.transfers().is_empty());
    }

    #[test]
    fn transfer_recorded_on_creation() {
        let mut builder = red_line();
        builder.create_line("Blue").unwrap();
        let x = builder
            .create_first_station("Blue", "X", &["B", "B"])
            .unwrap()
            .id();

        let metro = builder.build();
        let b = metro.get_station_by_name("B").unwrap().id();
        assert_eq!(metro.transfers().len(), 1);
        assert!(metro.is_transfer_station(x));
        assert!(metro.is_transfer_station(b));

        let from_b: Vec<&str> = metro.transfers_of(b).map(|s| s.name()).collect();
        assert_eq!(from_b, vec!["X"]);
    }

    #[test]
    fn add_transfer_is_idempotent() {
        let mut builder = red_line();
        builder.create_line("Blue").unwrap();
        builder.create_first_station("Blue", "X", &[]).unwrap();

        builder.add_transfer("B", "X").unwrap();
        builder.add_transfer("X", "B").unwrap();
        builder.add_transfer("B", "X").unwrap();

        assert_eq!(builder.metro().transfers().len(), 1);
    }

    #[test]
    fn add_transfer_on_same_line_fails() {
        let mut builder = red_line();
        let err = builder.add_transfer("A", "B").unwrap_err();
        assert_eq!(err, MetroError::SameLineTransfer("A".into(), "B".into()));

        let err = builder.add_transfer("A", "A").unwrap_err();
        assert_eq!(err, MetroError::SameLineTransfer("A".into(), "A".into()));
    }

    #[test]
    fn station_names_are_trimmed() {
        let mut builder = red_line();

        let err = builder
            .create_last_station("Red", " B ", "1M", &[])
            .unwrap_err();
        assert_eq!(err, MetroError::StationAlreadyExists("B".into()));

        let c = builder
            .create_last_station("Red", "C\t", "1M", &[])
            .unwrap()
            .id();
        let metro = builder.build();
        assert_eq!(metro.station(c).name(), "C");
        assert_eq!(metro.get_station_by_name(" C ").unwrap().id(), c);
        assert_eq!(metro.count_stages("A ", "C").unwrap(), 2);
    }

    #[test]
    fn add_transfer_unknown_station_fails() {
        let mut builder = red_line();
        let err = builder.add_transfer("A", "Nowhere").unwrap_err();
        assert_eq!(err, MetroError::StationNotFound("Nowhere".into()));
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
