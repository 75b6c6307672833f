use lazy_static::lazy_static;
use std::fmt;
use validator::Validate;

lazy_static! {
    static ref CARD_ID_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Identifier of a card in the record service.
///
/// Card ids end up both as a URL path segment and as an object key, so they are
/// restricted to URL- and key-safe characters.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CardId {
    #[validate(length(min = 1, max = 128), regex(path = *CARD_ID_REGEX))]
    value: String,
}

impl CardId {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let card_id = Self { value };
        card_id.validate()?;
        Ok(card_id)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Image MIME types accepted for card images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageContentType {
    Gif,
    Jpeg,
    Png,
}

impl ImageContentType {
    pub const ALL: [ImageContentType; 3] = [Self::Gif, Self::Jpeg, Self::Png];

    /// Content type stored with an object whose request named none.
    pub const DEFAULT: ImageContentType = Self::Png;

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|content_type| content_type.as_mime() == value)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// Object key under which a card image is stored, `<cardId>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilename(String);

impl ImageFilename {
    /// GIFs keep their extension; every other image is stored as `.jpg`,
    /// including PNGs and uploads without a content type.
    pub fn for_card(card_id: &CardId, content_type: Option<ImageContentType>) -> Self {
        let extension = match content_type {
            Some(ImageContentType::Gif) => "gif",
            _ => "jpg",
        };
        Self(format!("{}.{}", card_id, extension))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
