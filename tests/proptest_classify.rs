//! Property tests over the whole encoding space.
//!
//! Thumb is small enough to walk exhaustively; ARM words are sampled.

use proptest::prelude::*;

use disarmv4t::lexicon::CONDITIONS;
use disarmv4t::{classify_arm, classify_thumb, render_arm, render_thumb, ArmCategory, ThumbCategory};

#[test]
fn thumb_classification_is_total_and_stable() {
    for word in 0..=u16::MAX {
        let category = classify_thumb(word);
        assert_eq!(category, classify_thumb(word), "{word:#06x}");
        let text = render_thumb(word, 0x0800_0004, 0x0800_0000);
        assert!(!text.is_empty(), "{word:#06x}");
        if category == ThumbCategory::Undefined {
            assert_eq!(text, "Undefined");
        } else {
            assert_ne!(text, "Undefined", "{word:#06x} classified as {category:?}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20000))]

    /// Classification never panics and is deterministic.
    #[test]
    fn arm_classification_is_deterministic(word in any::<u32>()) {
        prop_assert_eq!(classify_arm(word), classify_arm(word));
    }

    /// The condition field never changes the category.
    #[test]
    fn arm_condition_does_not_affect_category(word in any::<u32>(), cond in 0u32..16) {
        let other = (word & 0x0FFF_FFFF) | (cond << 28);
        prop_assert_eq!(classify_arm(word), classify_arm(other));
    }

    /// Rendering is total and only yields the bare sentinel for undefined words.
    #[test]
    fn arm_render_matches_category(word in any::<u32>(), pc in any::<u32>()) {
        let text = render_arm(word, pc);
        prop_assert!(!text.is_empty());
        if classify_arm(word) == ArmCategory::Undefined {
            prop_assert_eq!(text, "Undefined");
        } else {
            prop_assert_ne!(text, "Undefined");
        }
    }

    /// Data-processing mnemonics carry the condition suffix from the table.
    #[test]
    fn arm_condition_suffix_appended(cond in 0usize..16, rd in 0u32..16, imm in 0u32..256) {
        // mov rd,#imm
        let word = ((cond as u32) << 28) | 0x03A0_0000 | (rd << 12) | imm;
        let text = render_arm(word, 8);
        let mnemonic = text.split_whitespace().next().unwrap_or_default();
        prop_assert_eq!(mnemonic, format!("mov{}", CONDITIONS[cond]));
    }
}
