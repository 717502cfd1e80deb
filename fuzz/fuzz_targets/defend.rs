//! Fuzz target for field defense.
//!
//! Runs arbitrary text through every strategy and checks the output
//! guarantees each one makes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use xss_defender_core::{DefenseConfig, DefenseStrategy, clean, defend, escape, is_clean};

/// Arbitrary field value for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzField {
    /// Field value, `None` for an absent parameter
    text: Option<String>,
    /// Escape after trimming
    escape_after_trim: bool,
}

fuzz_target!(|field: FuzzField| {
    let text = field.text.as_deref();

    for strategy in DefenseStrategy::ALL {
        let config = DefenseConfig::new(strategy).with_escape_after_trim(field.escape_after_trim);

        match (strategy, defend(text, &config)) {
            (DefenseStrategy::Trim, Ok(out)) => {
                if field.escape_after_trim {
                    assert!(!out.contains('<') && !out.contains('>'));
                } else {
                    assert_eq!(clean(&out), out);
                }
            }
            (DefenseStrategy::Escape, Ok(out)) => {
                assert!(!out.contains('<') && !out.contains('>'));
            }
            (DefenseStrategy::Throw, Ok(out)) => {
                assert!(out.is_empty() || is_clean(&out));
            }
            (DefenseStrategy::Throw, Err(err)) => {
                assert!(err.is_detection());
            }
            (_, Err(err)) => panic!("{strategy} must not fail: {err}"),
        }
    }

    if let Some(text) = text {
        // Sanitizing is idempotent
        let once = clean(text);
        assert_eq!(clean(&once), once);

        let escaped = escape(text);
        assert!(!escaped.contains('<') && !escaped.contains('>'));
        assert!(!escaped.contains('"') && !escaped.contains('\''));
    }
});
