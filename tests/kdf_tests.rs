//! tests/kdf_tests.rs
//! HKDF key schedule

mod common;
use common::TEST_MEDIA_KEY;

use hkdf::Hkdf;
use sha2::Sha256;
use wamedia_rs::{derive_media_keys, expand_media_key, MediaCryptoError, MediaType};

#[test]
fn expansion_matches_hkdf_directly() {
    for media_type in MediaType::ALL {
        let mut okm = [0u8; 112];
        Hkdf::<Sha256>::new(None, &TEST_MEDIA_KEY)
            .expand(media_type.hkdf_info(), &mut okm)
            .unwrap();

        let expanded = expand_media_key(&TEST_MEDIA_KEY, media_type).unwrap();
        assert_eq!(expanded.as_slice(), okm.as_slice(), "{media_type}");
    }
}

#[test]
fn split_uses_first_80_bytes() {
    let expanded = expand_media_key(&TEST_MEDIA_KEY, MediaType::Audio).unwrap();
    let keys = derive_media_keys(&TEST_MEDIA_KEY, MediaType::Audio).unwrap();
    assert_eq!(keys.iv().as_slice(), &expanded[..16]);
    assert_eq!(keys.cipher_key().as_slice(), &expanded[16..48]);
    assert_eq!(keys.mac_key().as_slice(), &expanded[48..80]);
}

#[test]
fn info_strings() {
    assert_eq!(MediaType::Image.hkdf_info(), b"WhatsApp Image Keys");
    assert_eq!(MediaType::Video.hkdf_info(), b"WhatsApp Video Keys");
    assert_eq!(MediaType::Audio.hkdf_info(), b"WhatsApp Audio Keys");
    assert_eq!(MediaType::Document.hkdf_info(), b"WhatsApp Document Keys");
}

#[test]
fn derivation_is_deterministic() {
    let a = derive_media_keys(&TEST_MEDIA_KEY, MediaType::Video).unwrap();
    let b = derive_media_keys(&TEST_MEDIA_KEY, MediaType::Video).unwrap();
    assert_eq!(a.iv(), b.iv());
    assert_eq!(a.cipher_key(), b.cipher_key());
    assert_eq!(a.mac_key(), b.mac_key());
}

#[test]
fn rejects_wrong_key_length() {
    assert!(matches!(
        derive_media_keys(&[0u8; 31], MediaType::Image),
        Err(MediaCryptoError::InvalidKeyLength { expected: 32, actual: 31 })
    ));
    assert!(matches!(
        expand_media_key(&[], MediaType::Image),
        Err(MediaCryptoError::InvalidKeyLength { expected: 32, actual: 0 })
    ));
}

#[test]
fn media_type_names_parse() {
    for media_type in MediaType::ALL {
        assert_eq!(media_type.name().parse::<MediaType>().unwrap(), media_type);
        assert_eq!(
            media_type.name().to_lowercase().parse::<MediaType>().unwrap(),
            media_type
        );
    }
    assert!(matches!(
        "STICKER".parse::<MediaType>(),
        Err(MediaCryptoError::UnknownMediaType(_))
    ));
}
