//! Fingerprint phrase derivation.
//!
//! Maps key material to five words from a fixed list, so two parties can
//! compare a public key out of band without reading hex digests aloud.

use sha2::{Digest, Sha256};

/// Word count in a fingerprint phrase.
const PHRASE_WORDS: usize = 5;

/// Fixed word list; order is part of the derivation and must not change.
const WORD_LIST: [&str; 64] = [
    "acorn", "anchor", "badge", "bamboo", "beacon", "bridge", "cabin", "camera", "candle",
    "canyon", "carbon", "cedar", "circle", "copper", "coral", "crater", "dawn", "delta",
    "ember", "fable", "falcon", "fjord", "galaxy", "garnet", "glacier", "granite", "harbor",
    "hazel", "horizon", "indigo", "island", "jasper", "juniper", "kernel", "lagoon", "lantern",
    "ledger", "linden", "magnet", "maple", "marble", "meadow", "mesa", "nebula", "obsidian",
    "onyx", "orchard", "osprey", "pebble", "pine", "prism", "quarry", "quartz", "raven",
    "ridge", "saffron", "sierra", "summit", "thicket", "timber", "tundra", "vertex", "willow",
    "zephyr",
];

/// Derives the fingerprint phrase for the given material and public key.
/// Deterministic: the same inputs always produce the same phrase.
pub fn derive(fingerprint_material: &str, public_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fingerprint_material.as_bytes());
    hasher.update(b"|");
    hasher.update(public_key.as_bytes());
    let digest = hasher.finalize();

    digest
        .iter()
        .take(PHRASE_WORDS)
        .map(|byte| WORD_LIST[(*byte as usize) % WORD_LIST.len()])
        .collect::<Vec<_>>()
        .join("-")
}

/// Derives a user API key bound to the session's organization context and
/// the caller-supplied confirmation secret.
pub fn derive_api_key(organization: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(organization.as_bytes());
    hasher.update(b"|api-key|");
    hasher.update(secret.as_bytes());
    let digest = hasher.finalize();

    let hex: String = digest.iter().take(16).map(|b| format!("{b:02x}")).collect();
    format!("0.{hex}")
}
