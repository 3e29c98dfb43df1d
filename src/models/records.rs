use super::serde_helpers::{display_value, epoch_millis_date, flag, hour_display, string_or_number};
use chrono::NaiveDate;
use serde::Deserialize;

/// One page of an ArcGIS query answer.
///
/// Either `features` or `error` is present.
#[derive(Debug, Deserialize)]
pub struct FeatureSet<T> {
    pub features: Option<Vec<Feature<T>>>,

    pub error: Option<RemoteError>,

    #[serde(default, rename = "exceededTransferLimit")]
    pub exceeded_transfer_limit: bool,
}

#[derive(Debug, Deserialize)]
pub struct Feature<T> {
    pub attributes: T,
}

/// Error document returned with a 200 status.
#[derive(Debug, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Air quality measurement station
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    #[serde(rename = "estacao_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "estacao_nome")]
    pub name: String,
    #[serde(rename = "concelho_nome")]
    pub municipality: String,
}

/// Index reading of one pollutant at a station on a given day
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexReading {
    #[serde(rename = "estacao_id", deserialize_with = "string_or_number")]
    pub station_id: String,
    #[serde(rename = "estacao_nome")]
    pub station_name: String,
    #[serde(rename = "data", deserialize_with = "epoch_millis_date")]
    pub date: NaiveDate,
    #[serde(rename = "poluente_abv")]
    pub pollutant: String,
    #[serde(rename = "avg_display", deserialize_with = "display_value")]
    pub average: String,
    #[serde(rename = "poluente_agr", deserialize_with = "display_value")]
    pub aggregation: String,
    #[serde(rename = "indice_nome")]
    pub index_name: String,
    #[serde(rename = "hora_display", default, deserialize_with = "hour_display")]
    pub hour: Option<String>,
    #[serde(rename = "alerta", default, deserialize_with = "flag")]
    pub alert: bool,
}

/// Published alert for a station
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Alert {
    #[serde(rename = "estacao_id", deserialize_with = "string_or_number")]
    pub station_id: String,
    #[serde(rename = "estacao_nome")]
    pub station_name: String,
    #[serde(rename = "data", deserialize_with = "epoch_millis_date")]
    pub date: NaiveDate,
    #[serde(rename = "poluente_abv")]
    pub pollutant: String,
    #[serde(rename = "avg_display", deserialize_with = "display_value")]
    pub average: String,
    #[serde(rename = "indice_nome")]
    pub index_name: String,
    #[serde(rename = "hora_display", default, deserialize_with = "hour_display")]
    pub hour: Option<String>,
}

/// Records that carry a measurement date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for IndexReading {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Alert {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
