// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::workflow::Arguments;

#[test]
fn parameter_splits_at_the_first_equals() {
    assert_eq!(parse_parameter("hello=one"), Some(Parameter::new("hello", "one")));
    assert_eq!(parse_parameter("expr=a=b"), Some(Parameter::new("expr", "a=b")));
    assert_eq!(parse_parameter("empty="), Some(Parameter::new("empty", "")));
    assert_eq!(parse_parameter("novalue"), None);
}

#[test]
fn entries_without_equals_are_dropped() {
    let parsed = parse_parameters(&["hello=one", "junk", "bye=two"]);
    assert_eq!(
        parsed,
        vec![Parameter::new("hello", "one"), Parameter::new("bye", "two")]
    );
}

#[test]
fn overrides_come_first_then_untouched_template_parameters() {
    let template = vec![
        Parameter::new("what", "template"),
        Parameter::new("keep", "me"),
        Parameter::new("hello", "template"),
    ];
    let overrides = parse_parameters(&["hello=one", "bye=two", "what=is"]);

    let merged = apply_overrides(&template, &overrides);

    assert_eq!(
        merged,
        vec![
            Parameter::new("hello", "one"),
            Parameter::new("bye", "two"),
            Parameter::new("what", "is"),
            Parameter::new("keep", "me"),
        ]
    );
}

#[test]
fn no_overrides_keeps_the_template() {
    let template = vec![Parameter::new("a", "1")];
    assert_eq!(apply_overrides(&template, &[]), template);
}

#[test]
fn template_parameters_keep_their_other_fields() {
    let arguments: Arguments = serde_yaml::from_str(
        r#"
parameters:
  - name: keep
    value: me
    description: left alone
    enum: [me, you]
  - name: hello
    value: template
    description: replaced
"#,
    )
    .unwrap();

    let merged = apply_overrides(&arguments.parameters, &parse_parameters(&["hello=one"]));

    assert_eq!(merged[0], Parameter::new("hello", "one"));
    let rendered = serde_yaml::to_string(&merged[1]).unwrap();
    assert!(rendered.contains("description: left alone"), "{}", rendered);
    assert!(rendered.contains("enum:"), "{}", rendered);
}
