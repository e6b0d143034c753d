use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use self::xml::XmlError;


pub mod xml;

/// Somewhere a decoded response can be written.
///
/// Implemented for every deserializable type, so `&mut T` for any
/// `T: DeserializeOwned` can be handed to the request options.
pub trait ResponseTarget {
    fn decode_json(&mut self, json: &[u8]) -> serde_json::Result<()>;
}

impl<T: DeserializeOwned> ResponseTarget for T {
    fn decode_json(&mut self, json: &[u8]) -> serde_json::Result<()> {
        *self = serde_json::from_slice(json)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("failed to unmarshal JSON response")]
    Json(#[source] serde_json::Error),

    #[error("failed to parse XML response")]
    XmlParse(#[source] XmlError),

    #[error("failed to convert XML to JSON")]
    XmlConvert(#[source] serde_json::Error),

    #[error("failed to unmarshal XML to JSON")]
    XmlToJsonTarget(#[source] serde_json::Error),

    #[error("failed to unmarshal XML response")]
    XmlTarget(#[source] serde_json::Error),
}

/// The decode path chosen for a response.
#[derive(Debug, PartialEq, Eq)]
pub enum ContentKind<'a> {
    Json,
    Xml,
    Unsupported(&'a str),
}

impl<'a> ContentKind<'a> {
    /// Sniffs the media type, ignoring parameters such as `charset`.
    pub fn sniff(content_type: &'a str) -> ContentKind<'a> {
        let media_type = content_type.split(';').next().unwrap_or_default();
        if media_type.contains("application/json") {
            ContentKind::Json
        } else if media_type.contains("application/xml") {
            ContentKind::Xml
        } else {
            ContentKind::Unsupported(media_type)
        }
    }
}

/// Decodes `body` into the given targets according to `content_type`.
///
/// JSON bodies only feed `target`. XML bodies are normalized to JSON first,
/// then decoded into `xml_to_json` and `target`, each when present.
pub fn resolve(
    content_type: &str,
    body: &[u8],
    target: Option<&mut dyn ResponseTarget>,
    xml_to_json: Option<&mut dyn ResponseTarget>,
) -> Result<(), ResolveError> {
    let kind = ContentKind::sniff(content_type);
    debug!("resolving {} byte response as {:?}", body.len(), kind);

    match kind {
        ContentKind::Json => {
            if let Some(target) = target {
                target.decode_json(body).map_err(ResolveError::Json)?;
            }
        }
        ContentKind::Xml => {
            let tree = xml::to_value(body).map_err(ResolveError::XmlParse)?;
            let json = serde_json::to_vec(&tree).map_err(ResolveError::XmlConvert)?;
            if let Some(xml_to_json) = xml_to_json {
                xml_to_json
                    .decode_json(&json)
                    .map_err(ResolveError::XmlToJsonTarget)?;
            }
            if let Some(target) = target {
                target.decode_json(&json).map_err(ResolveError::XmlTarget)?;
            }
        }
        ContentKind::Unsupported(media_type) => {
            return Err(ResolveError::UnsupportedContentType(
                media_type.to_string(),
            ))
        }
    }

    Ok(())
}
