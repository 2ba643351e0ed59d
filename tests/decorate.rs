//! End-to-end tests for metadata accumulation and log decoration.
//!
//! These drive the public API the way an application would: attach tags
//! while descending a call tree, emit at the leaf, and assert on the
//! captured subscriber output.

use ctxmeta::{Context, ContextLogger, Field, Meta, CONTEXT_FIELD};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn single_attachment_reaches_the_log_output() {
    let root = Context::new();
    let ctx = root.with_meta(Meta::from([("user_id", "southclaws")]));

    ContextLogger::new("api").info(&ctx, "test context", Vec::new());

    assert!(logs_contain(r#""context":{"user_id":"southclaws"}"#));
}

#[traced_test]
#[test]
fn nested_attachments_all_reach_the_log_output() {
    let root = Context::new();
    let ctx1 = root.with_meta(Meta::from([("user_id", "southclaws")]));
    let ctx2 = ctx1.with_meta(Meta::from([("deal_id", "xyz")]));
    let ctx3 = ctx2.with_meta(Meta::from([("commitment_id", "123")]));

    ContextLogger::new("api").info(&ctx3, "test context", Vec::new());

    assert!(logs_contain(r#""user_id":"southclaws""#));
    assert!(logs_contain(r#""deal_id":"xyz""#));
    assert!(logs_contain(r#""commitment_id":"123""#));
}

#[traced_test]
#[test]
fn deeper_attachment_overwrites_shallower_on_collision() {
    let root = Context::new();
    let ctx1 = root.with_meta(Meta::from([("user_id", "southclaws")]));
    let ctx2 = ctx1.with_meta(Meta::from([("deal_id", "xyz")]));
    let ctx3 = ctx2.with_meta(Meta::from([("deal_id", "overwritten")]));

    ContextLogger::new("api").info(&ctx3, "test context", Vec::new());

    assert!(logs_contain(r#""user_id":"southclaws""#));
    assert!(logs_contain(r#""deal_id":"overwritten""#));
    assert!(!logs_contain(r#""deal_id":"xyz""#));
}

#[traced_test]
#[test]
fn undecorated_context_logs_without_a_context_member() {
    let root = Context::new();

    ContextLogger::new("api").info(
        &root,
        "no tags attached",
        vec![Field::string("message", "hello")],
    );

    assert!(logs_contain(r#""message":"hello""#));
    assert!(!logs_contain(r#""context""#));
}

#[test]
fn decoration_is_usable_without_the_logger() {
    // The decorator is a pure read; callers with their own emission path
    // use it directly.
    let ctx = Context::new()
        .with_meta(Meta::from([("job", "reindex")]))
        .with_meta(Meta::from([("shard", "7")]));

    let fields = ctx.decorate(vec![Field::string("event", "started")]);

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name(), "event");

    let context_field = &fields[1];
    assert_eq!(context_field.name(), CONTEXT_FIELD);
    assert_eq!(context_field.value()["job"], "reindex");
    assert_eq!(context_field.value()["shard"], "7");
}

#[test]
fn branches_of_a_call_tree_stay_isolated() {
    let request = Context::new().with_meta(Meta::from([("request_id", "req-42")]));

    let left = request.with_meta(Meta::from([("worker", "left")]));
    let right = request.with_meta(Meta::from([("worker", "right")]));

    let left_fields = left.decorate(Vec::new());
    let right_fields = right.decorate(Vec::new());
    let parent_fields = request.decorate(Vec::new());

    assert_eq!(left_fields[0].value()["worker"], "left");
    assert_eq!(right_fields[0].value()["worker"], "right");
    assert!(parent_fields[0].value().get("worker").is_none());
    assert_eq!(parent_fields[0].value()["request_id"], "req-42");
}
