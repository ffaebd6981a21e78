use crate::error::{gmail_error, AgentResult};
use base64::alphabet;
use base64::engine::{self, Engine};
use chrono::{Local, TimeZone};
use super::models::{MessageBody, MessageHeader, MessagePart, NormalizedEmail, RawMessage};

/// Gmail encodes part bodies as URL-safe base64 with padding that varies
/// between messages, so decoding accepts both padded and unpadded input.
const URL_SAFE_ANY_PAD: engine::GeneralPurpose = engine::GeneralPurpose::new(
    &alphabet::URL_SAFE,
    engine::GeneralPurposeConfig::new()
        .with_decode_padding_mode(engine::DecodePaddingMode::Indifferent),
);

/// Flatten one raw message into a display-ready record.
///
/// Absent headers and absent text simply yield absent output fields, but a
/// structurally broken body (missing data, undecodable base64, invalid
/// UTF-8, unparsable timestamp) is an error for the listing caller.
pub fn normalize_message(raw: &RawMessage) -> AgentResult<NormalizedEmail> {
    let millis: i64 = raw
        .internal_date
        .parse()
        .map_err(|_| gmail_error(&format!("Invalid internalDate: {:?}", raw.internal_date)))?;

    Ok(NormalizedEmail {
        snippet: raw.snippet.clone(),
        date: format_internal_date(millis)?,
        from: header_value(&raw.payload.headers, "From"),
        subject: header_value(&raw.payload.headers, "Subject"),
        text: extract_text(&raw.payload.body_shape())?,
    })
}

/// Render the capture timestamp in the host's local timezone
fn format_internal_date(millis: i64) -> AgentResult<String> {
    match Local.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(date_time) => {
            Ok(date_time.format("%Y-%m-%d %H:%M:%S").to_string())
        }
        _ => Err(gmail_error(&format!("internalDate out of range: {}", millis))),
    }
}

/// First header with the given name, exact match
fn header_value(headers: &[MessageHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|header| header.name == name)
        .map(|header| header.value.clone())
}

/// Extract the message text.
///
/// Multi-part messages prefer a `text/plain` part over `text/html`, taking
/// the last occurrence of each; neither present means no text. A single-part
/// body is decoded directly without a type check.
fn extract_text(body: &MessageBody) -> AgentResult<Option<String>> {
    match body {
        MessageBody::Single { data } => {
            let data = data
                .as_deref()
                .ok_or_else(|| gmail_error("Message body has no data"))?;
            decode_body(data).map(Some)
        }
        MessageBody::Multi(parts) => {
            let mut plain_text = None;
            let mut html_text = None;
            for part in parts {
                match part.mime_type.as_str() {
                    "text/plain" => plain_text = Some(decode_part(part)?),
                    "text/html" => html_text = Some(decode_part(part)?),
                    _ => {}
                }
            }
            Ok(plain_text.or(html_text))
        }
    }
}

fn decode_part(part: &MessagePart) -> AgentResult<String> {
    let data = part
        .body
        .as_ref()
        .and_then(|body| body.data.as_deref())
        .ok_or_else(|| gmail_error(&format!("{} part has no body data", part.mime_type)))?;
    decode_body(data)
}

fn decode_body(data: &str) -> AgentResult<String> {
    let bytes = URL_SAFE_ANY_PAD
        .decode(data)
        .map_err(|e| gmail_error(&format!("Invalid base64 in message body: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| gmail_error(&format!("Message body is not valid UTF-8: {}", e)))
}
