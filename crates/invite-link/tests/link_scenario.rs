//! End-to-end link generation against the reference keys.
//!
//! The receiving side is reproduced here with the same primitives: the tag
//! is recomputed over `IV || ciphertext` and the plaintext decrypted, so a
//! layout change on either side fails these tests.

use std::sync::Arc;
use std::thread;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use invite_link::crypto::SealedMessage;
use invite_link::{payload, CanonicalPayload, InvitationRecord, LinkConfig, LinkEncoder, NoopSink};

const ENC_KEY: &str = "StwbunBzOTc3yRKdrWLQUTWcXY632jmcuHZMPtncdZI=";
const AUTH_KEY: &str = "Yj2w5XlhA2Z0HztUzMUovuc8Awauxa2Obkwh/9DeFm8=";

fn encoder() -> LinkEncoder<NoopSink> {
    LinkEncoder::new(LinkConfig::new(ENC_KEY, AUTH_KEY, "acme-shop"), NoopSink)
}

fn sealed_from(url: &str) -> SealedMessage {
    let (_, value) = url.split_once("?p=").expect("link has a p parameter");
    SealedMessage::parse(value).expect("p parameter is a sealed message")
}

fn mac_of(bytes: &[u8]) -> Hmac<Sha256> {
    let mut mac = Hmac::<Sha256>::new_from_slice(&STANDARD.decode(AUTH_KEY).unwrap()).unwrap();
    mac.update(bytes);
    mac
}

fn verify(blob: &[u8]) -> bool {
    let (signed, tag) = blob.split_at(blob.len() - 32);
    mac_of(signed).verify_slice(tag).is_ok()
}

fn decrypt(sealed: &SealedMessage) -> CanonicalPayload {
    let key = STANDARD.decode(ENC_KEY).unwrap();
    let plaintext = cbc::Decryptor::<Aes256>::new_from_slices(&key, sealed.iv())
        .unwrap()
        .decrypt_padded_vec_mut::<Pkcs7>(sealed.ciphertext())
        .unwrap();
    serde_json::from_slice(&plaintext).unwrap()
}

fn reference_record() -> InvitationRecord {
    InvitationRecord {
        email: Some("test@example.com".into()),
        name: Some("Test User".into()),
        reference: Some("ORDER123".into()),
        sku: Some(vec!["SKU1".into()]),
        tags: None,
    }
}

#[test]
fn reference_scenario_produces_verifiable_link() {
    let payload = payload::build(reference_record()).unwrap();
    let url = encoder().encode(&payload).unwrap();

    assert!(url.starts_with("https://www.trustpilot.de/evaluate-bgl/embed/"));

    let sealed = sealed_from(&url);
    let blob = sealed.to_bytes();
    assert!(blob.len() >= 48);
    assert_eq!(sealed.ciphertext().len() % 16, 0);
    assert!(verify(&blob));
    assert_eq!(decrypt(&sealed), payload);
}

#[test]
fn flipping_any_bit_breaks_the_tag() {
    let payload = payload::build(reference_record()).unwrap();
    let blob = sealed_from(&encoder().encode(&payload).unwrap()).to_bytes();

    for i in 0..blob.len() {
        let mut tampered = blob.clone();
        tampered[i] ^= 0x01;
        assert!(!verify(&tampered), "bit flip at byte {i} went unnoticed");
    }
}

#[test]
fn record_from_json_round_trips_through_link() {
    let record: InvitationRecord = serde_json::from_str(
        r#"{"email":"rosie@cotton.com","name":"Rosie Cotton","ref":"ORDER123","sku":["SKU1","SKU2"],"tags":["category1"],"phone":"n/a"}"#,
    )
    .unwrap();
    let payload = payload::build(record).unwrap();
    let decrypted = decrypt(&sealed_from(&encoder().encode(&payload).unwrap()));
    assert_eq!(decrypted.sku, Some(vec!["SKU1".to_string(), "SKU2".to_string()]));
    assert_eq!(decrypted.tags, Some(vec!["category1".to_string()]));
}

#[test]
fn concurrent_callers_share_one_encoder() {
    let encoder = Arc::new(encoder());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let encoder = Arc::clone(&encoder);
            thread::spawn(move || {
                let record = InvitationRecord {
                    reference: Some(format!("ORDER{i}")),
                    ..reference_record()
                };
                encoder.encode(&payload::build(record).unwrap()).unwrap()
            })
        })
        .collect();

    let urls: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, url) in urls.iter().enumerate() {
        assert_eq!(decrypt(&sealed_from(url)).reference, format!("ORDER{i}"));
    }
}
