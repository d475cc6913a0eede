//! Property-based tests for the compliance domain models.

use proptest::prelude::*;

use crate::{ControlledLineItem, FormStatus};

fn arb_status() -> impl Strategy<Value = FormStatus> {
    prop_oneof![
        Just(FormStatus::Draft),
        Just(FormStatus::Pending),
        Just(FormStatus::Submitted),
        Just(FormStatus::Completed),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any allowed transition moves strictly forward by exactly one state.
    #[test]
    fn prop_status_transitions_are_forward_only(from in arb_status(), to in arb_status()) {
        if from.can_transition_to(to) {
            prop_assert!(to > from);
            prop_assert_eq!(from.next(), Some(to));
        }
        if to <= from {
            prop_assert!(!from.can_transition_to(to));
        }
    }

    #[test]
    fn prop_status_parses_its_own_display(status in arb_status()) {
        prop_assert_eq!(status.to_string().parse::<FormStatus>(), Ok(status));
    }

    /// Item names never carry leading, trailing or doubled spaces.
    #[test]
    fn prop_item_name_has_no_stray_whitespace(
        name in "[ A-Za-z]{0,20}",
        strength in "[ 0-9a-z]{0,8}",
        dosage_form in "[ A-Za-z]{0,10}",
    ) {
        let item = ControlledLineItem {
            product_name: name,
            strength,
            dosage_form,
            quantity: 1,
            ..Default::default()
        };
        let item_name = item.item_name();
        prop_assert_eq!(item_name.trim(), item_name.as_str());
        prop_assert!(!item_name.contains("  "));
    }
}
