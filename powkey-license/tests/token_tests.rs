mod common;

use common::{alice_pair, PROJECT, SALT, SUBJECT};
use powkey_license::{
    build, decode_pow, derive_private_key, encode_pow, split_payload, Identity, LicenseError,
    TokenPair, PRIVATE_KEY_HEX_LEN,
};
use pretty_assertions::assert_eq;

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn identity_canonical() {
    let id = Identity::new("Acme Corp", "Rocket").unwrap();
    assert_eq!(id.subject(), "Acme Corp");
    assert_eq!(id.project(), "Rocket");
    assert_eq!(id.canonical(), "Acme Corp/Rocket");
}

#[test]
fn identity_rejects_blank_fields() {
    assert!(matches!(Identity::new("", "p"), Err(LicenseError::InvalidInput(_))));
    assert!(matches!(Identity::new("s", ""), Err(LicenseError::InvalidInput(_))));
    assert!(matches!(Identity::new("   ", "p"), Err(LicenseError::InvalidInput(_))));
}

#[test]
fn identity_build_matches_free_build() {
    let id = Identity::new(SUBJECT, PROJECT).unwrap();
    assert_eq!(id.build(SALT).unwrap(), alice_pair());
    assert!(matches!(id.build(""), Err(LicenseError::InvalidInput(_))));
    assert!(matches!(id.build("al#ice"), Err(LicenseError::InvalidInput(_))));
}

#[test]
fn identity_rejects_delimiter() {
    assert!(Identity::new("Al#ice", "Widget").is_err());
    assert!(Identity::new("Alice", "Wid#get").is_err());
}

// ── build ────────────────────────────────────────────────────────

#[test]
fn scenario_a_decodes_to_embedded_payload() {
    let pair = alice_pair();
    assert_eq!(decode_pow(&pair.pow).unwrap(), "Alice/Widget#alice");
    assert_eq!(pair.pow, "QWxpY2UvV2lkZ2V0I2FsaWNl");
}

#[test]
fn private_key_is_double_digest_of_pow() {
    let pair = alice_pair();
    assert_eq!(pair.private_key, derive_private_key(&pair.pow));
    assert_eq!(pair.private_key.len(), PRIVATE_KEY_HEX_LEN);
    assert_eq!(pair.private_key, pair.private_key.to_lowercase());
}

#[test]
fn build_is_deterministic() {
    assert_eq!(alice_pair(), alice_pair());
}

#[test]
fn salt_changes_both_strings() {
    let a = build(SUBJECT, PROJECT, SALT).unwrap();
    let b = build(SUBJECT, PROJECT, "bob").unwrap();
    assert_ne!(a.pow, b.pow);
    assert_ne!(a.private_key, b.private_key);
}

#[test]
fn scenario_d_empty_project_is_rejected() {
    let err = build(SUBJECT, "", SALT).unwrap_err();
    assert!(matches!(err, LicenseError::InvalidInput(_)));
    assert!(format!("{err}").contains("cannot be empty"));
}

#[test]
fn empty_subject_is_rejected() {
    assert!(matches!(build("", PROJECT, SALT), Err(LicenseError::InvalidInput(_))));
}

#[test]
fn empty_salt_is_rejected() {
    assert!(matches!(build(SUBJECT, PROJECT, ""), Err(LicenseError::InvalidInput(_))));
}

#[test]
fn delimiter_collisions_are_rejected() {
    for (s, p, u) in [
        ("Ali#ce", PROJECT, SALT),
        (SUBJECT, "Wid#get", SALT),
        (SUBJECT, PROJECT, "al#ice"),
    ] {
        let err = build(s, p, u).unwrap_err();
        assert!(format!("{err}").contains('#'), "{s} {p} {u}");
    }
}

#[test]
fn unicode_identity_round_trips() {
    let pair = build("Zoë Ångström", "日本語プロジェクト", "zoë").unwrap();
    let decoded = decode_pow(&pair.pow).unwrap();
    assert_eq!(decoded, "Zoë Ångström/日本語プロジェクト#zoë");
    assert_eq!(
        split_payload(&decoded).unwrap(),
        ("Zoë Ångström/日本語プロジェクト", "zoë")
    );
}

// ── encoding ─────────────────────────────────────────────────────

#[test]
fn decode_rejects_bad_base64() {
    assert!(matches!(decode_pow("not base64!!"), Err(LicenseError::InvalidEncoding(_))));
}

#[test]
fn decode_rejects_non_utf8() {
    let pow = base64_of(&[0xff, 0xfe, 0xfd]);
    assert!(matches!(decode_pow(&pow), Err(LicenseError::InvalidEncoding(_))));
}

#[test]
fn encode_matches_standard_base64() {
    assert_eq!(encode_pow("a/b#c"), "YS9iI2M=");
}

fn base64_of(bytes: &[u8]) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine};
    STANDARD.encode(bytes)
}

// ── TokenPair ────────────────────────────────────────────────────

#[test]
fn env_file_rendering() {
    let pair = TokenPair {
        pow: "UE9X".to_string(),
        private_key: "abc123".to_string(),
    };
    assert_eq!(pair.to_env_file(), "POW=\"UE9X\"\nPRIVATE_KEY=\"abc123\"\n");
}

#[test]
fn token_pair_serde() {
    let pair = alice_pair();
    let json = serde_json::to_string(&pair).unwrap();
    assert!(json.contains("\"private_key\""));
    let parsed: TokenPair = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, pair);
}

#[test]
fn private_key_known_answer() {
    assert_eq!(
        alice_pair().private_key,
        "56af35e361706d0616ed4d226f2221f784ffc257aabcb82b3f6d6f5353b000be"
    );
}
