use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the trade_screenshots table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TradeScreenshot {
    pub id: Uuid,
    pub trade_id: Uuid,
    #[serde(skip_serializing)]
    pub image_data: Vec<u8>,
    pub mime_type: String,
}

impl TradeScreenshot {
    /// Re-encode into the data-URI form the frontend submitted.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64.encode(&self.image_data)
        )
    }
}

/// A decoded screenshot payload, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotPayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ScreenshotPayload {
    /// Parse a data-URI style string: a MIME-type header segment, a comma,
    /// then the base64-encoded payload. Both `data:image/png;base64,...` and
    /// the bare `image/png;base64,...` forms are accepted.
    pub fn from_data_uri(s: &str) -> Option<Self> {
        let (header, encoded) = s.split_once(',')?;

        let header = header.strip_prefix("data:").unwrap_or(header);
        let mime_type = header
            .strip_suffix(";base64")
            .unwrap_or(header)
            .trim()
            .to_string();

        let bytes = BASE64.decode(encoded.trim()).ok()?;

        Some(Self { mime_type, bytes })
    }
}
