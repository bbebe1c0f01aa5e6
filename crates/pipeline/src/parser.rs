use chrono::{DateTime, Local};
use dewmon_core::{Reading, RecordError};

/// Decode a raw transport line as UTF-8 and strip surrounding whitespace
/// (including a trailing `\r` from CRLF devices).
pub fn decode_line(raw: &[u8]) -> Result<&str, RecordError> {
    std::str::from_utf8(raw)
        .map(str::trim)
        .map_err(|_| RecordError::Decode)
}

/// Parse one wire record of the form `device_ts,temperature,rh,extra`.
///
/// The reading is stamped with `received_at`; the device timestamp is kept
/// only as provenance.
pub fn parse_record(line: &str, received_at: DateTime<Local>) -> Result<Reading, RecordError> {
    let fields: Vec<&str> = line.split(',').collect();
    let [device_ts, temp, rh, extra] = fields.as_slice() else {
        return Err(RecordError::FieldCount { found: fields.len() });
    };

    Ok(Reading {
        timestamp: received_at,
        temperature: parse_number("temperature", temp)?,
        relative_humidity: parse_number("relative_humidity", rh)?,
        device_timestamp: device_ts.to_string(),
        raw_extra: extra.to_string(),
    })
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, RecordError> {
    raw.trim().parse::<f64>().map_err(|_| RecordError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_record() {
        let now = Local::now();
        let r = parse_record("12:00:00,21.5,60.0,0", now).unwrap();
        assert_eq!(r.temperature, 21.5);
        assert_eq!(r.relative_humidity, 60.0);
        assert_eq!(r.device_timestamp, "12:00:00");
        assert_eq!(r.raw_extra, "0");
        assert_eq!(r.timestamp, now);
    }

    #[test]
    fn rejects_non_numeric_temperature() {
        let err = parse_record("12:00:00,abc,55,x", Local::now()).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidNumber { field: "temperature", value: "abc".into() }
        );
    }

    #[test]
    fn rejects_non_numeric_humidity() {
        let err = parse_record("12:00:00,21.0,--,x", Local::now()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber { field: "relative_humidity", .. }));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_record("12:00:00,21.5,60.0", Local::now()).unwrap_err(),
            RecordError::FieldCount { found: 3 }
        );
        assert_eq!(
            parse_record("12:00:00,21.5,60.0,0,9", Local::now()).unwrap_err(),
            RecordError::FieldCount { found: 5 }
        );
        assert_eq!(
            parse_record("", Local::now()).unwrap_err(),
            RecordError::FieldCount { found: 1 }
        );
    }

    #[test]
    fn opaque_fields_are_not_validated() {
        let r = parse_record(",  19.25 , 41 ,", Local::now()).unwrap();
        assert_eq!(r.temperature, 19.25);
        assert_eq!(r.relative_humidity, 41.0);
        assert!(r.device_timestamp.is_empty());
    }

    #[test]
    fn decode_trims_crlf() {
        assert_eq!(decode_line(b"  1,2,3,4\r\n"), Ok("1,2,3,4"));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert_eq!(decode_line(&[0x31, 0xff, 0xfe]), Err(RecordError::Decode));
    }
}
