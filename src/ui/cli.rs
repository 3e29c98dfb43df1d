//! Command-line interface module.
//!
//! This module handles all CLI argument parsing and turns the parsed
//! arguments into a validated [`Request`].

use crate::models::request::{Command, DateFilter, Request};
use crate::network::{ClientConfig, DEFAULT_BASE_URL};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;

const VERSION_TEXT: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nNotice: All data is scraped from https://qualar.apambiente.pt"
);

const EXAMPLES: &str = "\
Examples:
  Get the list of stations:
    arqual stations

  Get air quality indexes of station 3072 for 2020-04-17:
    arqual indexes -s 3072 -d 2020-04-17

  Get air quality indexes of station 3072 between 2020-04-10 and 2020-04-20:
    arqual indexes -s 3072 --datemin 2020-04-10 --datemax 2020-04-20

  Get all alerts since 2019-01-01:
    arqual alerts --datemin 2019-01-01";

/// CLI arguments for arqual
#[derive(Parser, Debug)]
#[command(
    name = "arqual",
    version = VERSION_TEXT,
    about = "Query Portuguese air quality data from QualAr",
    after_help = EXAMPLES,
    disable_version_flag = true,
    arg_required_else_help = true
)]
pub struct Args {
    /// Data to retrieve
    #[arg(value_enum)]
    pub command: Command,

    /// Specify the date for the data you want (YYYY-MM-DD)
    #[arg(short = 'd', long, value_name = "DATE", value_parser = parse_date,
        conflicts_with_all = ["datemin", "datemax"])]
    pub date: Option<NaiveDate>,

    /// Specify minimum date for the data you want (YYYY-MM-DD)
    #[arg(short = 'i', long, value_name = "DATE", value_parser = parse_date)]
    pub datemin: Option<NaiveDate>,

    /// Specify maximum date for the data you want (YYYY-MM-DD)
    #[arg(short = 'x', long, value_name = "DATE", value_parser = parse_date)]
    pub datemax: Option<NaiveDate>,

    /// Specify the ID of the station
    #[arg(short = 's', long, value_name = "STATION_ID",
        required_if_eq("command", "indexes"))]
    pub station: Option<String>,

    /// Restrict results to one pollutant (e.g. PM10, O3, NO2)
    #[arg(short = 'p', long, value_name = "POLLUTANT")]
    pub pollutant: Option<String>,

    /// Root URL of the air quality MapServer
    #[arg(long, value_name = "URL", env = "ARQUAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Maximum number of records requested per page
    #[arg(long, value_name = "N", env = "ARQUAL_PAGE_SIZE",
        value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    if value.len() != 10 {
        return Err(format!("'{}' is not a date in YYYY-MM-DD format", value));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("'{}' is not a valid YYYY-MM-DD date: {}", value, e))
}

impl Args {
    /// Validates the cross-option rules clap cannot express and builds the
    /// request.
    ///
    /// # Errors
    /// A usage error if `stations` is given a station, a pollutant or a
    /// range, or if `--datemin` is later than `--datemax`.
    pub fn to_request(&self) -> Result<Request, clap::Error> {
        if self.command == Command::Stations {
            let rejected = [
                ("--station", self.station.is_some()),
                ("--pollutant", self.pollutant.is_some()),
                ("--datemin", self.datemin.is_some()),
                ("--datemax", self.datemax.is_some()),
            ];
            if let Some((flag, _)) = rejected.iter().find(|(_, set)| *set) {
                return Err(Args::command().error(
                    ErrorKind::ArgumentConflict,
                    format!("the argument '{}' cannot be used with 'stations'", flag),
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.datemin, self.datemax) {
            if min > max {
                return Err(Args::command().error(
                    ErrorKind::ValueValidation,
                    format!("--datemin {} is later than --datemax {}", min, max),
                ));
            }
        }

        Ok(Request {
            command: self.command,
            station_id: self.station.clone(),
            pollutant: self.pollutant.clone(),
            dates: DateFilter::from_flags(self.date, self.datemin, self.datemax),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            ..ClientConfig::default()
        }
    }
}

/// First help or version flag on the command line, ahead of `--`.
fn info_flag(argv: &[OsString]) -> Option<&'static str> {
    argv.iter()
        .skip(1)
        .take_while(|arg| arg.as_os_str() != "--")
        .find_map(|arg| match arg.to_str()? {
            "-h" | "--help" => Some("--help"),
            "-v" | "--version" => Some("--version"),
            _ => None,
        })
}

/// Parses an argument vector into arguments and a validated request.
///
/// Help and version requests come back as errors of kind
/// [`ErrorKind::DisplayHelp`] and [`ErrorKind::DisplayVersion`], whose
/// exit code is 0. They win over any other argument, valid or not.
pub fn parse_args<I, T>(argv: I) -> Result<(Args, Request), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    if let Some(flag) = info_flag(&argv) {
        let program = argv
            .first()
            .cloned()
            .unwrap_or_else(|| OsString::from("arqual"));
        Args::try_parse_from([program, OsString::from(flag)])?;
    }

    let args = Args::try_parse_from(argv)?;
    let request = args.to_request()?;
    Ok((args, request))
}
