mod common;

use common::{ScriptedTransport, ms};
use formwarden::{Category, Form, FormConfig, FormOptions, MemoryHost};

fn username_form(transport: ScriptedTransport, options: FormOptions) -> (Form, MemoryHost) {
    let host = MemoryHost::new().with_text("username", "");
    let form = Form::builder()
        .config(
            FormConfig::new()
                .verification("username", "ajax", "taken", "/check?u=")
                .options(options),
        )
        .host(host.clone())
        .transport(transport)
        .build();
    (form, host)
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_response_applies() {
    // "a" is slow and would answer valid; "ab" is fast and answers taken.
    let transport = ScriptedTransport::new()
        .respond("/check?u=a", ms(1_000), "true")
        .respond("/check?u=ab", ms(10), "false");
    let (form, _host) = username_form(transport.clone(), FormOptions::new());

    form.on_change("username", "a");
    // Past the debounce, so the "a" request is on the wire.
    tokio::time::sleep(ms(400)).await;
    form.on_change("username", "ab");
    form.settle().await;

    // Give the superseded request every chance to land.
    tokio::time::sleep(ms(2_000)).await;

    let check = form.verification("username", "ajax").unwrap();
    assert!(!check.valid);
    assert!(!check.in_flight);
    assert_eq!(form.errors(Category::Verification).len(), 1);
    assert_eq!(
        transport.calls(),
        vec!["/check?u=a".to_string(), "/check?u=ab".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_keystrokes() {
    let transport = ScriptedTransport::new().respond("/check?u=abc", ms(10), "true");
    let (form, host) = username_form(transport.clone(), FormOptions::new());

    form.on_change("username", "a");
    tokio::time::sleep(ms(100)).await;
    form.on_change("username", "ab");
    tokio::time::sleep(ms(100)).await;
    form.on_change("username", "abc");
    assert_eq!(form.pending(), 1);

    form.settle().await;

    assert_eq!(transport.calls(), vec!["/check?u=abc".to_string()]);
    assert!(form.is_valid());
    let report = host.report(&"username".into()).unwrap();
    assert!(report.valid);
    assert_eq!(report.message, None);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_reported_while_pending() {
    let transport = ScriptedTransport::new().respond("/check?u=ab", ms(50), "true");
    let (form, _host) = username_form(transport, FormOptions::new());

    let report = form.on_change("username", "ab").unwrap();
    assert!(report.in_flight);
    assert!(!report.valid);

    form.settle().await;

    let report = form.field_report("username").unwrap();
    assert!(!report.in_flight);
    assert!(report.valid);
}

#[tokio::test(start_paused = true)]
async fn test_empty_value_short_circuits() {
    let transport = ScriptedTransport::new().respond("/check?u=ab", ms(50), "true");
    let (form, _host) = username_form(transport.clone(), FormOptions::new());

    form.on_change("username", "ab");
    form.on_change("username", "");
    assert_eq!(form.pending(), 0);

    tokio::time::sleep(ms(1_000)).await;

    assert!(transport.calls().is_empty());
    let check = form.verification("username", "ajax").unwrap();
    assert!(!check.valid);
    assert!(!check.in_flight);
    assert!(!form.is_valid());
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_leaves_check_invalid() {
    let transport = ScriptedTransport::new().fail("/check?u=ab", ms(10));
    let (form, host) = username_form(transport, FormOptions::new());

    form.on_change("username", "ab");
    form.settle().await;

    let report = host.report(&"username".into()).unwrap();
    assert!(!report.valid);
    assert!(!report.in_flight);
    assert_eq!(report.message.as_deref(), Some("taken"));
}

#[tokio::test(start_paused = true)]
async fn test_unrecognized_verdict_is_invalid() {
    let transport = ScriptedTransport::new().respond("/check?u=ab", ms(10), "maybe");
    let (form, _host) = username_form(transport, FormOptions::new());

    form.on_change("username", "ab");
    form.settle().await;

    assert!(!form.verification("username", "ajax").unwrap().valid);
}

#[tokio::test(start_paused = true)]
async fn test_destroy_cancels_outstanding_requests() {
    let transport = ScriptedTransport::new().respond("/check?u=ab", ms(500), "true");
    let (form, _host) = username_form(transport.clone(), FormOptions::new());

    form.on_change("username", "ab");
    form.destroy();
    assert_eq!(form.pending(), 0);

    tokio::time::sleep(ms(2_000)).await;

    assert!(transport.calls().is_empty());
    let check = form.verification("username", "ajax").unwrap();
    assert!(!check.valid);
    assert!(!check.in_flight);
}

#[tokio::test(start_paused = true)]
async fn test_pending_counts_each_field() {
    let transport = ScriptedTransport::new()
        .respond("/user?u=ab", ms(100), "true")
        .respond("/mail?e=x%40y.z", ms(300), "true");
    let host = MemoryHost::new().with_text("username", "").with_text("email", "");
    let form = Form::builder()
        .config(
            FormConfig::new()
                .verification("username", "ajax", "taken", "/user?u=")
                .verification("email", "ajax", "in use", "/mail?e="),
        )
        .host(host)
        .transport(transport)
        .build();

    form.on_change("username", "ab");
    form.on_change("email", "x@y.z");
    assert_eq!(form.pending(), 2);

    // Debounce plus the faster response.
    tokio::time::sleep(ms(500)).await;
    assert_eq!(form.pending(), 1);

    form.settle().await;
    assert_eq!(form.pending(), 0);
    assert!(form.is_valid());
}

#[tokio::test(start_paused = true)]
async fn test_interaction_checks_rules_only() {
    let transport = ScriptedTransport::new().respond("/check?u=ab", ms(10), "true");
    let host = MemoryHost::new().with_text("username", "");
    let form = Form::builder()
        .config(
            FormConfig::new()
                .rule("username", "required", "required")
                .verification("username", "ajax", "taken", "/check?u="),
        )
        .host(host)
        .transport(transport.clone())
        .build();

    let report = form.on_interaction("username", "ab").unwrap();
    assert!(report.valid);
    assert_eq!(form.pending(), 0);

    tokio::time::sleep(ms(1_000)).await;
    assert!(transport.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_onchange_disabled_ignores_events() {
    let transport = ScriptedTransport::new().respond("/check?u=ab", ms(10), "true");
    let (form, host) = username_form(transport.clone(), FormOptions::new().with_onchange(false));

    assert!(form.on_change("username", "ab").is_none());
    assert!(form.on_interaction("username", "ab").is_none());
    assert_eq!(form.pending(), 0);
    assert_eq!(host.render_count(), 0);
}

#[tokio::test]
async fn test_rules_message_shown_before_verification() {
    let host = MemoryHost::new().with_text("username", "");
    let form = Form::builder()
        .config(
            FormConfig::new()
                .rule("username", "minLength", 3usize)
                .verification("username", "ajax", "taken", "/check?u="),
        )
        .host(host)
        .transport(ScriptedTransport::new())
        .build();

    let report = form.on_change("username", "ab").unwrap();
    assert_eq!(
        report.message.as_deref(),
        Some("must be more than 3 characters long, currently 2")
    );
    form.destroy();
}

#[tokio::test]
async fn test_highlight_can_be_disabled() {
    let host = MemoryHost::new().with_text("email", "");
    let form = Form::builder()
        .config(
            FormConfig::new()
                .rule("email", "required", "required")
                .options(FormOptions::new().with_highlight(false)),
        )
        .host(host)
        .build();

    let report = form.on_change("email", "").unwrap();
    assert!(!report.valid);
    assert!(!report.highlight);
}

#[tokio::test]
async fn test_carriage_returns_are_ignored() {
    let host = MemoryHost::new().with_text("bio", "");
    let form = Form::builder()
        .config(FormConfig::new().rule("bio", "maxLength", 4usize))
        .host(host)
        .build();

    let report = form.on_change("bio", "ab\r\ncd").unwrap();
    assert!(!report.valid);

    let report = form.on_change("bio", "a\r\nb").unwrap();
    assert!(report.valid);
}
