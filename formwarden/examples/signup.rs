use std::fs::File;
use std::time::Duration;

use async_trait::async_trait;
use formwarden::error::TransportError;
use formwarden::{Form, FormConfig, MemoryHost, SubmitOutcome, Transport};
use simplelog::{Config, LevelFilter, WriteLogger};

const CONFIG: &str = r#"{
    "rules": {
        "email": { "required": "email required", "email": "not an email" },
        "username": { "required": "username required", "rangeLength": [3, 12], "noSymbols": "letters and digits only" },
        "age": { "number": "digits only" }
    },
    "verification": {
        "username": { "ajax": ["username taken", "/users/available?name="] }
    },
    "debounceMs": 200,
    "submitTimeoutMs": 2000
}"#;

/// Pretends to be the backend: a few names are taken, every answer is slow.
struct FakeBackend;

#[async_trait]
impl Transport for FakeBackend {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let name = url.rsplit('=').next().unwrap_or_default();
        let taken = ["admin", "root", "alice"].contains(&name);
        Ok((!taken).to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let host = MemoryHost::new()
        .with_text("email", "")
        .with_text("username", "")
        .with_text("age", "");

    let form = Form::builder()
        .config(FormConfig::from_json(CONFIG)?)
        .host(host.clone())
        .transport(FakeBackend)
        .submit_handler(|form| println!("submitted: {:?}", form.result()))
        .build();

    for diagnostic in form.diagnostics() {
        println!("config: {}", diagnostic);
    }

    // A user typing, with the host mirroring values as they change.
    for (field, value) in [
        ("email", "alice@example"),
        ("email", "alice@example.com"),
        ("username", "al"),
        ("username", "alice"),
        ("age", "4x"),
        ("age", "42"),
    ] {
        host.set_value(field, value);
        if let Some(report) = form.on_change(field, value) {
            println!(
                "{:>8} = {:<20} valid={:<5} {}",
                field,
                format!("{:?}", value),
                report.valid,
                report.message.unwrap_or_default()
            );
        }
    }

    println!("submit -> {:?}", form.on_submit().await);
    if let Some(error) = form.result().first_error() {
        println!("first error: {} ({})", error.message, error.field);
    }

    host.set_value("username", "alicia");
    form.on_change("username", "alicia");
    match form.on_submit().await {
        SubmitOutcome::Submitted => println!("submit -> handler ran"),
        other => println!("submit -> {:?}", other),
    }

    Ok(())
}
