mod common;

use common::{entity, find, names, nodes};
use docvers_core::{merge, strip_tags, Tag, VersionContext, VersionOptions};
use serde_json::json;

#[test]
fn test_foo_bar_then_foo_baz() {
    let options = VersionOptions::default();
    let ctx = VersionContext::new(&options);
    let v1 = nodes(json!([
        {"type": "function", "params": ["foo"]},
        {"type": "function", "params": ["bar"]}
    ]));
    let v2 = nodes(json!([
        {"type": "function", "params": ["foo"]},
        {"type": "function", "params": ["baz"]}
    ]));

    let merged = merge(&strip_tags(&v1, ctx.tags()), &v2, &ctx);

    assert_eq!(names(&merged), vec!["foo", "bar", "baz"]);
    let foo = find(&merged, "foo").unwrap();
    assert!(ctx.tags().tags_of(foo).is_empty());
    assert!(ctx.tags().tags_of(find(&merged, "bar").unwrap()).is_empty());
    assert_eq!(
        ctx.tags().tags_of(find(&merged, "baz").unwrap()),
        vec![Tag::Added]
    );
}

#[test]
fn test_merge_does_not_touch_inputs() {
    let options = VersionOptions::default();
    let ctx = VersionContext::new(&options);
    let old = nodes(json!([
        {"type": "object", "params": ["Widget"], "content": [
            {"type": "method", "params": ["get"]}
        ]}
    ]));
    let new = nodes(json!([
        {"type": "object", "params": ["Widget"], "content": [
            {"type": "method", "params": ["set"]}
        ]}
    ]));
    let (old_before, new_before) = (old.clone(), new.clone());

    let _ = merge(&old, &new, &ctx);

    assert_eq!(old, old_before);
    assert_eq!(new, new_before);
}

#[test]
fn test_nested_update_through_unmergeable_description() {
    let options = VersionOptions::default();
    let ctx = VersionContext::new(&options);
    let old = nodes(json!([
        {"type": "class", "params": ["Widget"], "content": [
            {"type": "method", "params": ["get"], "content": [
                {"type": "param", "params": ["x"]},
                {"type": "description", "content": ["Gets x", {"type": "code", "content": ["x"]}]}
            ]}
        ]}
    ]));
    let new = nodes(json!([
        {"type": "class", "params": ["Widget"], "content": [
            {"type": "method", "params": ["get"], "content": [
                {"type": "param", "params": ["x"]},
                {"type": "description", "content": ["Returns x"]}
            ]}
        ]}
    ]));

    let merged = merge(&old, &new, &ctx);
    let widget = find(&merged, "Widget").unwrap();
    let get = widget.children_of_kind("method").next().unwrap();

    assert!(!widget.has_tag(&Tag::Updated));
    assert!(get.has_tag(&Tag::Updated));
    assert_eq!(
        get.children_of_kind("description").next().unwrap(),
        &entity(json!({"type": "description", "content": ["Returns x"]}))
    );
}

#[test]
fn test_removed_subtree_excluded_after_strip() {
    let options = VersionOptions::default();
    let ctx = VersionContext::new(&options);
    let v1 = nodes(json!([
        {"type": "api", "content": [
            {"type": "object", "params": ["Widget"], "content": [
                {"type": "method", "params": ["get"]}
            ]},
            {"type": "function", "params": ["helper"]}
        ]}
    ]));
    let v2 = nodes(json!([
        {"type": "api", "content": [
            {"type": "object", "params": ["Widget"], "content": [{"type": "removed"}]}
        ]}
    ]));
    let v3 = nodes(json!([
        {"type": "api", "content": [
            {"type": "method", "params": ["get"]}
        ]}
    ]));

    let two = merge(&strip_tags(&v1, ctx.tags()), &v2, &ctx);
    let three = merge(&strip_tags(&two, ctx.tags()), &v3, &ctx);

    let api = three[0].as_entity().unwrap();
    assert_eq!(names(&api.content), vec!["helper", "get"]);
    assert!(find(&api.content, "get").unwrap().has_tag(&Tag::Added));
}

#[test]
fn test_custom_removal_tag() {
    let options: VersionOptions = serde_json::from_value(json!({
        "tags": {"dropped": {"removeEntity": true, "order": 9}}
    }))
    .unwrap();
    let ctx = VersionContext::new(&options);
    let content = nodes(json!([
        {"type": "function", "params": ["a"], "content": [{"type": "dropped"}]},
        {"type": "function", "params": ["b"]}
    ]));

    assert_eq!(names(&strip_tags(&content, ctx.tags())), vec!["b"]);
}

#[test]
fn test_text_replaces_whole_level() {
    let options = VersionOptions::default();
    let ctx = VersionContext::new(&options);
    let old = nodes(json!([
        {"type": "property", "params": ["size"], "content": [
            "The size.",
            {"type": "default", "content": ["1"]}
        ]}
    ]));
    let new = nodes(json!([
        {"type": "property", "params": ["size"], "content": ["The size in pixels."]}
    ]));

    let merged = merge(&old, &new, &ctx);
    let size = find(&merged, "size").unwrap();

    assert_eq!(size.text_content(), "The size in pixels.");
    assert!(!size.has_child_kind("default"));
    assert!(size.has_tag(&Tag::Updated));
}
