use crate::error::{NetworkError, ParseError, Result};
use crate::models::records::FeatureSet;
use serde::de::DeserializeOwned;

/// Records decoded from one query answer.
#[derive(Debug)]
pub struct Page<T> {
    pub records: Vec<T>,
    /// The server truncated the answer, more records follow.
    pub truncated: bool,
}

/// Decodes an ArcGIS query answer into records.
///
/// The whole body is decoded before anything is returned, so a single bad
/// record fails the page. An error document is reported as a
/// [`NetworkError::Remote`].
pub fn parse_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>> {
    let set: FeatureSet<T> = serde_json::from_str(body).map_err(ParseError::Json)?;

    if let Some(error) = set.error {
        return Err(NetworkError::Remote {
            code: error.code,
            message: error.message,
        }
        .into());
    }

    let features = set.features.ok_or(ParseError::MissingField("features"))?;

    Ok(Page {
        records: features.into_iter().map(|f| f.attributes).collect(),
        truncated: set.exceeded_transfer_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArqualError;
    use crate::models::records::{Alert, IndexReading, Station};

    #[test]
    fn test_parse_stations() {
        let body = r#"{"features": [
            {"attributes": {
                "concelho_nome": "Lisboa", "estacao_id": 3072, "estacao_nome": "Avenida"
            }},
            {"attributes": {
                "concelho_nome": "Porto", "estacao_id": "1010", "estacao_nome": "Boavista"
            }}
        ]}"#;

        let page: Page<Station> = parse_page(body).unwrap();
        assert!(!page.truncated);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].id, "3072");
        assert_eq!(page.records[1].municipality, "Porto");
    }

    #[test]
    fn test_parse_truncated_page() {
        let body = r#"{"exceededTransferLimit": true, "features": []}"#;
        let page: Page<Alert> = parse_page(body).unwrap();
        assert!(page.truncated);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_missing_attribute_is_parse_error() {
        let body = r#"{"features": [{"attributes": {"estacao_id": 3072, "data": 1587081600000}}]}"#;
        let err = parse_page::<IndexReading>(body).unwrap_err();
        assert!(matches!(err, ArqualError::Parse(ParseError::Json(_))));
        assert!(err.to_string().contains("estacao_nome"));
    }

    #[test]
    fn test_missing_features_is_parse_error() {
        let err = parse_page::<Station>(r#"{"fields": []}"#).unwrap_err();
        assert!(matches!(
            err,
            ArqualError::Parse(ParseError::MissingField("features"))
        ));
    }

    #[test]
    fn test_html_body_is_parse_error() {
        let err = parse_page::<Station>("<html><body>Maintenance</body></html>").unwrap_err();
        assert!(matches!(err, ArqualError::Parse(_)));
    }

    #[test]
    fn test_error_document_is_network_error() {
        let body = r#"{"error": {"code": 400, "message": "Unable to complete operation."}}"#;
        let err = parse_page::<Station>(body).unwrap_err();
        match err {
            ArqualError::Network(NetworkError::Remote { code, message }) => {
                assert_eq!(code, 400);
                assert_eq!(message, "Unable to complete operation.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
