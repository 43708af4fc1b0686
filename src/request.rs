//! # Payload Normalizer
//!
//! Turns the raw form values of the active content type into the canonical
//! parameter set the generation endpoint expects: per-type field renames,
//! event date canonicalization and country-code composition. Everything
//! else, known or unknown, passes through untouched.

use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::form::FormValues;
use crate::schema::QrType;

use std::collections::BTreeMap;

/// Canonical name-value parameters for one generation request.
pub type RequestParams = BTreeMap<String, String>;

/// Normalize form values for transmission. Pure and total: missing
/// optional fields are simply absent from the output, never an error.
pub fn normalize(ty: QrType, values: &FormValues) -> RequestParams {
    let mut params: RequestParams = values
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    match ty {
        // The endpoint takes `phone_number`, the form field is `phone`.
        QrType::Phone => {
            if let Some(value) = params.remove("phone") {
                params.insert("phone_number".to_string(), value);
            }
        }
        // Contact fields share their names with other types' fields; the
        // endpoint disambiguates them with a `vcard_` prefix.
        QrType::Vcard => {
            for (from, to) in [
                ("phone", "vcard_phone"),
                ("mobile", "vcard_mobile"),
                ("email", "vcard_email"),
                ("url", "vcard_url"),
            ] {
                if let Some(value) = params.remove(from) {
                    params.insert(to.to_string(), value);
                }
            }
        }
        QrType::Event => {
            for key in ["start_date", "end_date"] {
                if let Some(canonical) = params.get(key).and_then(|v| canonical_timestamp(v)) {
                    params.insert(key.to_string(), canonical);
                }
            }
        }
        _ => {}
    }

    compose_phone(&mut params);
    params
}

/// Convert a local `YYYY-MM-DDTHH:MM[:SS]` form value into an RFC 3339
/// UTC timestamp. Values that don't parse are left to the caller untouched.
fn canonical_timestamp(value: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Merge a separate country-code selector into the phone-number value,
/// stripping `+`, spaces and hyphens from the combined string. The code
/// itself is never transmitted as its own parameter.
fn compose_phone(params: &mut RequestParams) {
    let Some(code) = params.remove("country_code") else {
        return;
    };
    if let Some(number) = params.get("phone_number") {
        let full: String = format!("{code}{number}")
            .chars()
            .filter(|c| !matches!(c, '+' | ' ' | '-'))
            .collect();
        params.insert("phone_number".to_string(), full);
    }
}
