use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Pictures
// ---------------------------------------------------------------------------

/// Media type of entries that can be shown in the picture list.
pub const IMAGE_MEDIA_TYPE: &str = "image";

/// One Astronomy Picture of the Day entry, as returned by the feed.
///
/// Only the fields below are read; anything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Picture {
    pub title: String,
    pub date: NaiveDate,
    pub explanation: String,
    pub media_type: String,
    pub url: String,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl Picture {
    /// Whether the entry is eligible for the display list.
    pub fn is_image(&self) -> bool {
        self.media_type == IMAGE_MEDIA_TYPE
    }

    /// Date formatted as `MM/dd/yyyy` for list rows and the detail screen.
    pub fn display_date(&self) -> String {
        self.date.format("%m/%d/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_feed_entry_and_ignores_extra_fields() {
        let json = r#"{
            "title": "Nebula",
            "date": "2024-01-01",
            "explanation": "Gas and dust.",
            "media_type": "image",
            "url": "https://apod.nasa.gov/nebula.jpg",
            "service_version": "v1",
            "hdurl": "https://apod.nasa.gov/nebula_hd.jpg"
        }"#;

        let picture: Picture = serde_json::from_str(json).unwrap();
        assert_eq!(picture.title, "Nebula");
        assert_eq!(picture.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            picture.hdurl.as_deref(),
            Some("https://apod.nasa.gov/nebula_hd.jpg")
        );
        assert_eq!(picture.copyright, None);
        assert!(picture.is_image());
    }

    #[test]
    fn rejects_entry_with_bad_date() {
        let json = r#"{
            "title": "Nebula",
            "date": "01/01/2024",
            "explanation": "",
            "media_type": "image",
            "url": ""
        }"#;
        assert!(serde_json::from_str::<Picture>(json).is_err());
    }

    #[test]
    fn display_date_is_month_first() {
        let json = r#"{
            "title": "Clip",
            "date": "2023-05-07",
            "explanation": "",
            "media_type": "video",
            "url": ""
        }"#;
        let picture: Picture = serde_json::from_str(json).unwrap();
        assert_eq!(picture.display_date(), "05/07/2023");
        assert!(!picture.is_image());
    }
}
