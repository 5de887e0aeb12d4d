//! Integration tests for top-level entry parsing and junk recovery.

use ftl::parser::{CommentKind, Entry, PatternElement, parse};

#[test]
fn test_simple_message() {
    let resource = parse("hello = Hello, world!");
    assert_eq!(resource.entries.len(), 1);
    match &resource.entries[0] {
        Entry::Message(message) => {
            assert_eq!(message.id.name, "hello");
            let value = message.value.as_ref().expect("message should have a value");
            assert_eq!(
                value.elements,
                vec![PatternElement::Text("Hello, world!".to_string())]
            );
            assert!(message.attributes.is_empty());
        }
        _ => panic!("expected a message"),
    }
}

#[test]
fn test_multiple_messages() {
    let resource = parse("one = First\ntwo = Second\nthree = Third\n");
    assert_eq!(resource.entries.len(), 3);
    for entry in &resource.entries {
        assert!(matches!(entry, Entry::Message(_)));
    }
}

#[test]
fn test_term() {
    let resource = parse("-brand = Firefox");
    match &resource.entries[0] {
        Entry::Term(term) => {
            assert_eq!(term.id.name, "brand");
            assert_eq!(
                term.value.elements,
                vec![PatternElement::Text("Firefox".to_string())]
            );
        }
        _ => panic!("expected a term"),
    }
}

#[test]
fn test_term_without_value_is_junk() {
    let resource = parse("-brand =\n    .short = Fx\n");
    assert_eq!(resource.entries.len(), 1);
    match &resource.entries[0] {
        Entry::Junk(junk) => {
            assert_eq!(junk.annotations[0].code, "missing-term-value");
        }
        _ => panic!("expected junk"),
    }
}

#[test]
fn test_message_with_attributes() {
    let resource = parse("button = Save\n    .tooltip = Click to save");
    match &resource.entries[0] {
        Entry::Message(message) => {
            assert_eq!(message.id.name, "button");
            assert_eq!(message.attributes.len(), 1);
            assert_eq!(message.attributes[0].id.name, "tooltip");
            assert_eq!(
                message.attributes[0].value.elements,
                vec![PatternElement::Text("Click to save".to_string())]
            );
        }
        _ => panic!("expected a message"),
    }
}

#[test]
fn test_attribute_only_message() {
    let resource = parse("key =\n    .label = Text\n    .hint = More text\n");
    match &resource.entries[0] {
        Entry::Message(message) => {
            assert!(message.value.is_none());
            assert_eq!(message.attributes.len(), 2);
        }
        _ => panic!("expected a message"),
    }
}

#[test]
fn test_message_without_value_or_attributes_is_junk() {
    let resource = parse("empty =\nnext = ok\n");
    assert_eq!(resource.entries.len(), 2);
    match &resource.entries[0] {
        Entry::Junk(junk) => {
            assert_eq!(junk.annotations[0].code, "missing-message-field");
        }
        _ => panic!("expected junk"),
    }
    assert!(matches!(&resource.entries[1], Entry::Message(_)));
}

#[test]
fn test_multiline_pattern_joins_with_single_space() {
    let resource = parse("multi = first line\n    second line\nnext = x\n");
    assert_eq!(resource.entries.len(), 2);
    match &resource.entries[0] {
        Entry::Message(message) => {
            let value = message.value.as_ref().expect("value");
            assert_eq!(
                value.elements,
                vec![PatternElement::Text("first line second line".to_string())]
            );
        }
        _ => panic!("expected a message"),
    }
}

#[test]
fn test_block_pattern_on_next_line() {
    let resource = parse("hello =\n    Hello, world!");
    match &resource.entries[0] {
        Entry::Message(message) => {
            let value = message.value.as_ref().expect("value");
            assert_eq!(
                value.elements,
                vec![PatternElement::Text("Hello, world!".to_string())]
            );
        }
        _ => panic!("expected a message"),
    }
}

#[test]
fn test_line_comment() {
    let resource = parse("# a comment\n");
    match &resource.entries[0] {
        Entry::Comment(comment) => {
            assert_eq!(comment.content, "a comment");
            assert_eq!(comment.kind, CommentKind::Line);
        }
        _ => panic!("expected a comment"),
    }
}

#[test]
fn test_comment_kinds() {
    let resource = parse("# line\n## group\n### resource\n");
    assert_eq!(resource.entries.len(), 3);
    let kinds: Vec<CommentKind> = resource
        .entries
        .iter()
        .map(|entry| match entry {
            Entry::Comment(comment) => comment.kind,
            _ => panic!("expected comments"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![CommentKind::Line, CommentKind::Group, CommentKind::Resource]
    );
}

#[test]
fn test_consecutive_comment_lines_merge() {
    let resource = parse("# first\n# second\nmsg = x\n");
    assert_eq!(resource.entries.len(), 2);
    match &resource.entries[0] {
        Entry::Comment(comment) => {
            assert_eq!(comment.content, "first\nsecond");
        }
        _ => panic!("expected a comment"),
    }
}

#[test]
fn test_four_hash_comment_is_junk() {
    let resource = parse("#### too deep\n");
    match &resource.entries[0] {
        Entry::Junk(junk) => {
            assert_eq!(junk.annotations[0].code, "comment-too-deep");
        }
        _ => panic!("expected junk"),
    }
}

#[test]
fn test_junk_recovery_resumes_at_next_entry() {
    let resource = parse("bad = { missing\nhello = World");
    assert_eq!(resource.entries.len(), 2);
    match &resource.entries[0] {
        Entry::Junk(junk) => {
            assert_eq!(junk.content, "bad = { missing\n");
            assert!(!junk.annotations.is_empty());
        }
        _ => panic!("expected junk"),
    }
    match &resource.entries[1] {
        Entry::Message(message) => {
            assert_eq!(message.id.name, "hello");
            let value = message.value.as_ref().expect("value");
            assert_eq!(
                value.elements,
                vec![PatternElement::Text("World".to_string())]
            );
        }
        _ => panic!("expected a message"),
    }
}

#[test]
fn test_junk_swallows_indented_continuation_lines() {
    let resource = parse("=nope\n  still junk\n# recovered\n");
    assert_eq!(resource.entries.len(), 2);
    match &resource.entries[0] {
        Entry::Junk(junk) => {
            assert_eq!(junk.content, "=nope\n  still junk\n");
        }
        _ => panic!("expected junk"),
    }
    assert!(matches!(&resource.entries[1], Entry::Comment(_)));
}

#[test]
fn test_parse_is_total_on_adversarial_input() {
    // None of these may panic or loop; every line of garbage lands in junk.
    let inputs = [
        "",
        "   \n\n  ",
        "{",
        "}",
        "= = =",
        "a",
        "a =",
        "-",
        "-=x",
        "#",
        "####",
        "key = { $ }",
        "key = { NUMBER( }",
        "key = text { unclosed",
        "key = { \"unterminated }",
        "\u{0}\u{1}\u{2}",
    ];
    for input in inputs {
        let _ = parse(input);
    }
}

#[test]
fn test_spans_cover_entries() {
    let source = "first = one\nsecond = two\n";
    let resource = parse(source);
    match (&resource.entries[0], &resource.entries[1]) {
        (Entry::Message(first), Entry::Message(second)) => {
            assert_eq!(&source[first.span.start..first.span.end], "first = one");
            assert_eq!(&source[second.span.start..second.span.end], "second = two");
        }
        _ => panic!("expected two messages"),
    }
}

#[test]
fn test_later_entries_keep_resource_order() {
    let resource = parse("dup = first\ndup = second\n");
    assert_eq!(resource.entries.len(), 2);
    let texts: Vec<String> = resource
        .entries
        .iter()
        .map(|entry| match entry {
            Entry::Message(message) => match &message.value.as_ref().expect("value").elements[0] {
                PatternElement::Text(text) => text.clone(),
                PatternElement::Placeable(_) => panic!("expected text"),
            },
            _ => panic!("expected messages"),
        })
        .collect();
    assert_eq!(texts, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn test_crlf_line_endings() {
    let resource = parse("a = one\r\nb = two\r\n");
    assert_eq!(resource.entries.len(), 2);
    match &resource.entries[0] {
        Entry::Message(message) => {
            let value = message.value.as_ref().expect("value");
            assert_eq!(value.elements, vec![PatternElement::Text("one".to_string())]);
        }
        _ => panic!("expected a message"),
    }
}
