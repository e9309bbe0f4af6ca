#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use mt_core::contract::Attachment;
use mt_core::dates::{DateError, format_iso, parse_iso};

/// Wire shape of a file reference: the collaborator converts file-picker
/// results into this record before anything reaches the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDto {
    pub name: String,
    pub url: String,
    pub upload_date: String,
}

impl AttachmentDto {
    pub fn from_attachment(attachment: &Attachment) -> Self {
        Self {
            name: attachment.name.clone(),
            url: attachment.url.clone(),
            upload_date: format_iso(attachment.upload_date),
        }
    }

    pub fn into_attachment(self) -> Result<Attachment, DateError> {
        Ok(Attachment {
            name: self.name,
            url: self.url,
            upload_date: parse_iso(&self.upload_date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn dto_round_trips() {
        let attachment = Attachment {
            name: "pv_ouverture.pdf".to_string(),
            url: "blob:7f3a".to_string(),
            upload_date: date!(2024 - 04 - 18),
        };
        let dto = AttachmentDto::from_attachment(&attachment);
        assert_eq!(dto.upload_date, "2024-04-18");
        assert_eq!(dto.into_attachment().unwrap(), attachment);
    }

    #[test]
    fn wire_field_is_camel_case() {
        let json = r#"{"name":"a.pdf","url":"blob:1","uploadDate":"2024-01-02"}"#;
        let dto: AttachmentDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.upload_date, "2024-01-02");
        assert!(serde_json::to_string(&dto).unwrap().contains("uploadDate"));
    }

    #[test]
    fn malformed_dates_are_refused() {
        let dto = AttachmentDto {
            name: "a.pdf".to_string(),
            url: "blob:1".to_string(),
            upload_date: "18/04/2024".to_string(),
        };
        assert_eq!(dto.into_attachment().unwrap_err(), DateError::InvalidFormat);
    }
}
