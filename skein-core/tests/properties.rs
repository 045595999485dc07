//! 基于属性的测试：运算符优先级与路径解析的幂等性

mod common;

use common::{first_expression, sexpr};
use proptest::prelude::*;
use skein_core::resolve;

/// 二元运算符及其结合强度（数值越大越紧）
const OPERATORS: &[(&str, u8)] = &[
    ("||", 1),
    ("&&", 2),
    ("|", 3),
    ("^", 4),
    ("&", 5),
    ("==", 6),
    ("!==", 6),
    ("<", 7),
    ("instanceof", 7),
    ("<<", 8),
    (">>>", 8),
    ("+", 9),
    ("-", 9),
    ("*", 10),
    ("%", 10),
    ("**", 11),
];

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}",
        "[a-z]{1,6}\\.[a-z]{1,3}",
        Just(".".to_string()),
        Just("..".to_string()),
    ]
}

fn import_path() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("./"), Just("../"), Just("/"), Just("@scope/")],
        prop::collection::vec(segment(), 1..5),
    )
        .prop_map(|(prefix, segments)| format!("'{}{}'", prefix, segments.join("/")))
}

proptest! {
    /// `a op1 b op2 c` 按优先级与结合性嵌套
    #[test]
    fn prop_binary_pairs_nest_by_precedence(
        first in 0..OPERATORS.len(),
        second in 0..OPERATORS.len(),
    ) {
        let (op1, p1) = OPERATORS[first];
        let (op2, p2) = OPERATORS[second];
        let expression = first_expression(&format!("a {op1} b {op2} c"));
        let right_assoc = p1 == p2 && op1 == "**";
        let expected = if p1 > p2 || (p1 == p2 && !right_assoc) {
            format!("({op2} ({op1} a b) c)")
        } else {
            format!("({op1} a ({op2} b c))")
        };
        prop_assert_eq!(sexpr(&expression), expected);
    }

    /// 已解析的标识再次解析不变
    #[test]
    fn prop_resolve_is_idempotent(spec in import_path(), importer in "/[a-z]{1,5}/[a-z]{1,5}\\.js") {
        let once = resolve(&spec, &importer);
        prop_assert!(once.starts_with('/'));
        prop_assert_eq!(resolve(&once, "/other/place.js"), once.clone());
        prop_assert_eq!(resolve(&format!("'{once}'"), &importer), once);
    }
}
