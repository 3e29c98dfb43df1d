//! Output and reporting functions for query results.
//!
//! Records are written one per line as they arrive. Readings and alerts are
//! grouped under underlined headers, repeated whenever the group changes.

use crate::models::records::{Alert, IndexReading, Station};
use chrono::NaiveDate;
use colored::Colorize;
use std::collections::HashSet;
use std::io::{self, Write};

/// Formats a station as `MUNICIPALITY, NAME (ID)`.
pub fn format_station(station: &Station) -> String {
    format!(
        "{}, {} ({})",
        station.municipality, station.name, station.id
    )
}

/// Formats a reading as `POLLUTANT - AVERAGE (AGGREGATION) - INDEX`.
///
/// The hour is appended when one applies, and a highlighted `ALERT!` marker
/// when the reading is flagged.
pub fn format_index_reading(reading: &IndexReading) -> String {
    let mut formatted = format!(
        "{} - {} ({}) - {}",
        reading.pollutant, reading.average, reading.aggregation, reading.index_name
    );

    if let Some(hour) = &reading.hour {
        formatted.push_str(&format!(" ({})", hour));
    }
    if reading.alert {
        formatted.push_str(&format!(" {}", "ALERT!".red().bold()));
    }

    formatted
}

/// Formats an alert as `DATE - POLLUTANT - AVERAGE - INDEX`.
pub fn format_alert(alert: &Alert) -> String {
    let mut formatted = format!(
        "{} - {} - {} - {}",
        alert.date, alert.pollutant, alert.average, alert.index_name
    );

    if let Some(hour) = &alert.hour {
        formatted.push_str(&format!(" ({})", hour));
    }

    formatted
}

/// Streaming report writer.
///
/// Keeps the grouping state across pages so that a header is not repeated
/// when a group spans two server answers.
pub struct Report<W: Write> {
    out: W,
    seen_stations: HashSet<String>,
    reading_group: Option<(String, NaiveDate)>,
    alert_group: Option<String>,
    written: usize,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Report {
            out,
            seen_stations: HashSet::new(),
            reading_group: None,
            alert_group: None,
            written: 0,
        }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a station unless one with the same id was already written.
    pub fn station(&mut self, station: &Station) -> io::Result<()> {
        if !self.seen_stations.insert(station.id.clone()) {
            return Ok(());
        }
        writeln!(self.out, "{}", format_station(station))?;
        self.written += 1;
        Ok(())
    }

    pub fn index_reading(&mut self, reading: &IndexReading) -> io::Result<()> {
        let group = (reading.station_id.clone(), reading.date);
        if self.reading_group.as_ref() != Some(&group) {
            self.header(&format!("{} - {}", reading.station_name, reading.date))?;
            self.reading_group = Some(group);
        }
        writeln!(self.out, "{}", format_index_reading(reading))?;
        self.written += 1;
        Ok(())
    }

    pub fn alert(&mut self, alert: &Alert) -> io::Result<()> {
        if self.alert_group.as_deref() != Some(alert.station_id.as_str()) {
            self.header(&format!(
                "{} ({}) - {}",
                alert.station_name, alert.station_id, alert.date
            ))?;
            self.alert_group = Some(alert.station_id.clone());
        }
        writeln!(self.out, "{}", format_alert(alert))?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "-".repeat(title.chars().count()))
    }
}
