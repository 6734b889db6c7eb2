// Proptest generators for session types.

use proptest::prelude::*;

/// A lowercase secret word of 1..=8 letters.
pub fn secret_word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// A single guess candidate, mostly valid letters with some junk mixed in.
pub fn guess_candidate() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => "[a-z]",
        1 => "[A-Z]",
        1 => "[0-9?!]|[a-z]{2}|",
    ]
}

/// A run of guess candidates for one session.
pub fn guess_sequence() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(guess_candidate(), 0..40)
}

pub fn max_incorrect() -> impl Strategy<Value = u32> {
    1u32..10
}

pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}
