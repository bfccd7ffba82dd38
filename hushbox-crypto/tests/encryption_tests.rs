use hushbox_crypto::{
    decrypt_file, decrypt_text, encrypt_file, encrypt_text, CryptoError, FilePayload, Progress,
};
use std::sync::Mutex;

#[tokio::test]
async fn text_roundtrip() {
    let envelope = encrypt_text("the quick brown fox", "Tr0ub4dor&3 plus entropy")
        .await
        .unwrap();
    let text = decrypt_text(&envelope, "Tr0ub4dor&3 plus entropy")
        .await
        .unwrap();
    assert_eq!(text, "the quick brown fox");
}

#[tokio::test]
async fn empty_text_roundtrip() {
    let envelope = encrypt_text("", "password").await.unwrap();
    assert_eq!(decrypt_text(&envelope, "password").await.unwrap(), "");
}

#[tokio::test]
async fn wrong_password_rejected() {
    let envelope = encrypt_text("secret", "password-one").await.unwrap();
    let result = decrypt_text(&envelope, "password-two").await;
    assert!(matches!(result, Err(CryptoError::Authentication)));
}

#[tokio::test]
async fn each_encryption_is_fresh() {
    let env1 = encrypt_text("same plaintext", "same password").await.unwrap();
    let env2 = encrypt_text("same plaintext", "same password").await.unwrap();

    // Fresh salt and IV every time, so ciphertexts never repeat
    assert_ne!(env1.salt, env2.salt);
    assert_ne!(env1.iv, env2.iv);
    assert_ne!(env1.ciphertext, env2.ciphertext);

    // Both still decrypt independently
    assert_eq!(decrypt_text(&env1, "same password").await.unwrap(), "same plaintext");
    assert_eq!(decrypt_text(&env2, "same password").await.unwrap(), "same plaintext");
}

#[tokio::test]
async fn flipped_tag_bit_rejected() {
    let mut envelope = encrypt_text("tamper with me", "password").await.unwrap();
    envelope.tag[0] ^= 0x01;
    let result = decrypt_text(&envelope, "password").await;
    assert!(matches!(result, Err(CryptoError::Authentication)));
}

#[tokio::test]
async fn flipped_ciphertext_bit_rejected() {
    let mut envelope = encrypt_text("tamper with me", "password").await.unwrap();
    let last = envelope.ciphertext.len() - 1;
    envelope.ciphertext[last] ^= 0x80;
    let result = decrypt_text(&envelope, "password").await;
    assert!(matches!(result, Err(CryptoError::Authentication)));
}

#[tokio::test]
async fn flipped_iv_bit_rejected() {
    let mut envelope = encrypt_text("tamper with me", "password").await.unwrap();
    envelope.iv[5] ^= 0x10;
    let result = decrypt_text(&envelope, "password").await;
    assert!(matches!(result, Err(CryptoError::Authentication)));
}

#[tokio::test]
async fn file_roundtrip_preserves_contents_and_metadata() {
    let original = FilePayload {
        filename: "Quarterly Report (final) v2.pdf".into(),
        mime_type: "application/pdf".into(),
        contents: (0..=255u8).cycle().take(10_000).collect(),
    };

    let envelope = encrypt_file(original.clone(), "file password", None)
        .await
        .unwrap();
    assert_eq!(envelope.original_filename.as_deref(), Some("Quarterly Report (final) v2.pdf"));
    assert_eq!(envelope.original_size, Some(10_000));
    assert_eq!(envelope.mime_type.as_deref(), Some("application/pdf"));

    let restored = decrypt_file(&envelope, "file password", None).await.unwrap();
    assert_eq!(restored, original);
}

#[tokio::test]
async fn file_progress_hits_the_three_checkpoints() {
    let payload = FilePayload {
        filename: "a.bin".into(),
        mime_type: "application/octet-stream".into(),
        contents: vec![42u8; 1024],
    };
    let seen = Mutex::new(Vec::new());
    let record = |p: Progress| seen.lock().unwrap().push(p.percent());

    encrypt_file(payload, "password", Some(&record)).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![30, 80, 100]);
}

#[tokio::test]
async fn file_wrong_password_rejected() {
    let payload = FilePayload {
        filename: "a.bin".into(),
        mime_type: "application/octet-stream".into(),
        contents: vec![1, 2, 3],
    };
    let envelope = encrypt_file(payload, "right", None).await.unwrap();
    let result = decrypt_file(&envelope, "wrong", None).await;
    assert!(matches!(result, Err(CryptoError::Authentication)));
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let (a, b) = tokio::join!(
        encrypt_text("payload a", "password a"),
        encrypt_text("payload b", "password b"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.salt, b.salt);
    assert_eq!(decrypt_text(&a, "password a").await.unwrap(), "payload a");
    assert_eq!(decrypt_text(&b, "password b").await.unwrap(), "payload b");
}

// Property-based tests
mod proptests {
    use hushbox_crypto::{decrypt, encrypt, DerivedKey};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cipher_always_roundtrips(
            key in any::<[u8; 32]>(),
            iv in any::<[u8; 12]>(),
            payload in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let key = DerivedKey::from_bytes(key);
            let (ciphertext, tag) = encrypt(&key, &iv, &payload).unwrap();
            let plaintext = decrypt(&key, &iv, &ciphertext, &tag).unwrap();
            prop_assert_eq!(plaintext, payload);
        }
    }
}
