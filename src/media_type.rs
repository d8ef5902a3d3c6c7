//! Media kinds and their HKDF context strings.

use crate::error::MediaCryptoError;
use std::fmt;
use std::str::FromStr;

/// Kind of media being encrypted. Selects the HKDF `info` string, so the same
/// media key yields unrelated key material for each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaType {
    /// Every media type, in declaration order.
    pub const ALL: [MediaType; 4] = [Self::Image, Self::Video, Self::Audio, Self::Document];

    /// HKDF `info` parameter for this media type.
    #[must_use]
    pub const fn hkdf_info(self) -> &'static [u8] {
        match self {
            Self::Image => b"WhatsApp Image Keys",
            Self::Video => b"WhatsApp Video Keys",
            Self::Audio => b"WhatsApp Audio Keys",
            Self::Document => b"WhatsApp Document Keys",
        }
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Audio => "AUDIO",
            Self::Document => "DOCUMENT",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MediaType {
    type Err = MediaCryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MediaCryptoError::UnknownMediaType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_strings() {
        assert_eq!(MediaType::Image.hkdf_info(), b"WhatsApp Image Keys");
        assert_eq!(MediaType::Video.hkdf_info(), b"WhatsApp Video Keys");
        assert_eq!(MediaType::Audio.hkdf_info(), b"WhatsApp Audio Keys");
        assert_eq!(MediaType::Document.hkdf_info(), b"WhatsApp Document Keys");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("image".parse::<MediaType>().unwrap(), MediaType::Image);
        assert_eq!("DOCUMENT".parse::<MediaType>().unwrap(), MediaType::Document);
        assert!(matches!(
            "sticker".parse::<MediaType>(),
            Err(MediaCryptoError::UnknownMediaType(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for t in MediaType::ALL {
            assert_eq!(t.to_string().parse::<MediaType>().unwrap(), t);
        }
    }
}
