use chrono::{Days, NaiveDate};
use clap::ValueEnum;

/// Query type selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Command {
    /// Get a list of air quality measurement stations
    Stations,
    /// Get air quality indexes for a station
    Indexes,
    /// Get alerts
    Alerts,
}

/// Date selection of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// No date given, the command picks its own default day.
    Latest,
    On(NaiveDate),
    /// Inclusive range, either bound may be open.
    Between {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DateFilter {
    /// Builds the filter from the raw `-d`, `-i` and `-x` values.
    ///
    /// The caller is responsible for rejecting `date` combined with a bound.
    pub fn from_flags(
        date: Option<NaiveDate>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        match (date, from, to) {
            (Some(d), _, _) => DateFilter::On(d),
            (None, None, None) => DateFilter::Latest,
            (None, from, to) => DateFilter::Between { from, to },
        }
    }

    /// Replaces `Latest` with a concrete day.
    pub fn resolve(self, latest: NaiveDate) -> Self {
        match self {
            DateFilter::Latest => DateFilter::On(latest),
            other => other,
        }
    }

    /// Whether `date` satisfies the filter. `Latest` accepts anything.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::Latest => true,
            DateFilter::On(d) => d == date,
            DateFilter::Between { from, to } => {
                from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
            }
        }
    }
}

/// A validated query, produced by the argument parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub command: Command,
    pub station_id: Option<String>,
    pub pollutant: Option<String>,
    pub dates: DateFilter,
}

impl Request {
    /// Day used when no date was given: station data is published for the
    /// previous day, readings and alerts for the current one.
    pub fn default_day(&self, today: NaiveDate) -> NaiveDate {
        match self.command {
            Command::Stations => today.checked_sub_days(Days::new(1)).unwrap_or(today),
            Command::Indexes | Command::Alerts => today,
        }
    }
}
