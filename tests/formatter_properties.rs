// Bullet formatter properties
// Author: kelexine (https://github.com/kelexine)

use medchat_relay::translation::format_as_bullets;
use proptest::prelude::*;

fn model_like_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(String::new()),
            "[ \t]{0,3}[*•-]{0,3} ?[A-Za-z0-9 ,.()]{0,30}",
            "[A-Za-z0-9 ,.:]{1,40}",
        ],
        0..12,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn formatting_is_idempotent(text in model_like_text()) {
        let once = format_as_bullets(&text);
        prop_assert_eq!(format_as_bullets(&once), once);
    }

    #[test]
    fn formatting_is_deterministic(text in any::<String>()) {
        prop_assert_eq!(format_as_bullets(&text), format_as_bullets(&text));
    }

    #[test]
    fn every_line_is_a_bullet_or_input_returned(text in model_like_text()) {
        let out = format_as_bullets(&text);
        if out != text {
            for line in out.lines() {
                prop_assert!(line.starts_with("- "));
                prop_assert!(line.len() > 2);
            }
        }
    }

    #[test]
    fn never_empty_for_non_blank_input(text in "[A-Za-z]{1,10}( [A-Za-z]{1,10}){0,5}") {
        prop_assert!(!format_as_bullets(&text).is_empty());
    }
}

#[test]
fn documented_example() {
    assert_eq!(format_as_bullets("* foo\n\nbar\n- baz"), "- foo\n- bar\n- baz");
}
