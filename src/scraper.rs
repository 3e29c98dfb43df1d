//! Query execution against the air quality MapServer.
//!
//! A [`Request`] is turned into one ArcGIS `query` per command. Answers are
//! decoded page by page and written to the report as they arrive, so records
//! from earlier pages stay printed if a later page fails.

use crate::error::{ArqualError, Result};
use crate::models::records::{Alert, Dated, IndexReading, Station};
use crate::models::request::{Command, DateFilter, Request};
use crate::network::{ClientConfig, Transport};
use crate::parser::{Page, parse_page};
use crate::ui::output::Report;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::io::Write;
use tracing::{debug, info, warn};

const ATTR_DATE: &str = "data";
const ATTR_POLLUTANT: &str = "poluente_abv";
const ATTR_STATION_ID: &str = "estacao_id";

/// MapServer layer holding each kind of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Indexes = 0,
    Stations = 1,
    Alerts = 9,
}

/// SQL-like filter sent as the `where` parameter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WhereClause {
    conditions: Vec<String>,
}

impl WhereClause {
    pub fn new() -> Self {
        WhereClause::default()
    }

    /// Adds `name<op>'value'`, doubling quotes inside `value`.
    pub fn condition(mut self, name: &str, op: &str, value: &str) -> Self {
        self.conditions
            .push(format!("{}{}'{}'", name, op, value.replace('\'', "''")));
        self
    }

    pub fn optional(self, name: &str, op: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.condition(name, op, v),
            None => self,
        }
    }

    /// Adds the conditions selecting `dates`. `Latest` must be resolved first.
    pub fn dates(self, dates: &DateFilter) -> Self {
        match *dates {
            DateFilter::Latest => self,
            DateFilter::On(d) => self.condition(ATTR_DATE, "=", &d.to_string()),
            DateFilter::Between { from, to } => self
                .optional(ATTR_DATE, ">=", from.map(|d| d.to_string()).as_deref())
                .optional(ATTR_DATE, "<=", to.map(|d| d.to_string()).as_deref()),
        }
    }

    pub fn build(&self) -> String {
        self.conditions.join(" and ")
    }
}

/// One ArcGIS `query` call, before paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub layer: Layer,
    pub filter: WhereClause,
    pub out_fields: &'static str,
    pub order_by: &'static str,
}

impl Query {
    /// Builds the query for `request`, resolving a missing date against
    /// `today`.
    pub fn for_request(request: &Request, today: NaiveDate) -> Self {
        let dates = request.dates.resolve(request.default_day(today));
        let filter = WhereClause::new().dates(&dates);

        match request.command {
            Command::Stations => Query {
                layer: Layer::Stations,
                filter,
                out_fields: "concelho_nome,estacao_id,estacao_nome",
                order_by: "concelho_nome,estacao_nome",
            },
            Command::Indexes => Query {
                layer: Layer::Indexes,
                filter: filter
                    .optional(ATTR_STATION_ID, "=", request.station_id.as_deref())
                    .optional(ATTR_POLLUTANT, "=", request.pollutant.as_deref()),
                out_fields: "*",
                order_by: "data,estacao_nome,poluente_abv",
            },
            Command::Alerts => Query {
                layer: Layer::Alerts,
                filter: filter
                    .optional(ATTR_STATION_ID, "=", request.station_id.as_deref())
                    .optional(ATTR_POLLUTANT, "=", request.pollutant.as_deref()),
                out_fields: "*",
                order_by: "estacao_nome,data,poluente_abv",
            },
        }
    }

    /// Query string parameters for the page starting at `offset`.
    pub fn params(&self, offset: usize, page_size: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("f", String::from("json")),
            ("spatialRel", String::from("esriSpatialRelIntersects")),
            ("outFields", self.out_fields.to_string()),
            ("orderByFields", self.order_by.to_string()),
            ("returnGeometry", String::from("false")),
            ("where", self.filter.build()),
        ];
        if offset > 0 {
            params.push(("resultOffset", offset.to_string()));
        }
        if let Some(size) = page_size {
            params.push(("resultRecordCount", size.to_string()));
        }
        params
    }
}

/// Runs requests against the server through a [`Transport`].
pub struct Scraper<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> Scraper<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Scraper { config, transport }
    }

    /// Executes `request` and writes its records to `out`.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    /// - [`ArqualError::Network`] if a request fails
    /// - [`ArqualError::Parse`] if an answer cannot be decoded
    /// - [`ArqualError::NoData`] if the query matched nothing
    pub fn run<W: Write>(&self, request: &Request, today: NaiveDate, out: W) -> Result<usize> {
        let query = Query::for_request(request, today);
        let dates = request.dates.resolve(request.default_day(today));
        let mut report = Report::new(out);

        match request.command {
            Command::Stations => self.fetch_pages::<Station, _>(&query, |stations| {
                for station in stations {
                    report.station(&station)?;
                }
                Ok(())
            })?,
            Command::Indexes => self.fetch_pages::<IndexReading, _>(&query, |readings| {
                for reading in in_range(readings, dates) {
                    report.index_reading(&reading)?;
                }
                Ok(())
            })?,
            Command::Alerts => self.fetch_pages::<Alert, _>(&query, |alerts| {
                for alert in in_range(alerts, dates) {
                    report.alert(&alert)?;
                }
                Ok(())
            })?,
        };

        report.flush()?;

        match report.written() {
            0 => Err(ArqualError::NoData),
            n => Ok(n),
        }
    }

    /// Fetches every page of `query`, handing each decoded page to `on_page`
    /// before requesting the next one.
    fn fetch_pages<R, F>(&self, query: &Query, mut on_page: F) -> Result<()>
    where
        R: DeserializeOwned,
        F: FnMut(Vec<R>) -> Result<()>,
    {
        let url = self.config.layer_url(query.layer as u32);
        let mut offset = 0;

        for page_number in 1..=self.config.max_pages {
            let params = query.params(offset, self.config.page_size);
            let body = self.transport.get(&url, &params)?;
            let Page { records, truncated } = parse_page::<R>(&body)?;

            info!(page = page_number, records = records.len(), truncated, "page received");

            let received = records.len();
            on_page(records)?;

            if !truncated || received == 0 {
                return Ok(());
            }
            offset += received;
        }

        warn!(
            max_pages = self.config.max_pages,
            "page limit reached, remaining records were not fetched"
        );
        Ok(())
    }
}

/// Drops records outside the requested dates.
fn in_range<R: Dated>(records: Vec<R>, dates: DateFilter) -> impl Iterator<Item = R> {
    records.into_iter().filter(move |record| {
        let keep = dates.contains(record.date());
        if !keep {
            debug!(date = %record.date(), "discarding record outside the requested dates");
        }
        keep
    })
}
