use env_injector::{inject_placeholders, InjectError, PlaceholderSet};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
    <script>
        window.SUPABASE_URL = "{{SUPABASE_URL}}";
        window.SUPABASE_ANON_KEY = "{{SUPABASE_ANON_KEY}}";
        window.SUPABASE_SERVICE_KEY = "{{SUPABASE_SERVICE_KEY}}";
        window.SMTP_EMAIL = "{{SMTP_EMAIL}}";
        window.SMTP_PASSWORD = "{{SMTP_PASSWORD}}";
    </script>
</head>
<body data-url="{{SUPABASE_URL}}"></body>
</html>
"#;

const NAMES: [&str; 5] = [
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "SUPABASE_SERVICE_KEY",
    "SMTP_EMAIL",
    "SMTP_PASSWORD",
];

fn write_document(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("index.html");
    fs::write(&path, DOCUMENT).expect("write document");
    path
}

fn partial_set() -> PlaceholderSet {
    PlaceholderSet::from_lookup(NAMES, |name| match name {
        "SUPABASE_URL" => Some("https://project.supabase.co".to_string()),
        "SMTP_EMAIL" => Some("relay@example.org".to_string()),
        _ => None,
    })
}

#[test]
fn injects_values_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir);

    let report = inject_placeholders(&path, &partial_set()).expect("injection succeeds");
    let html = fs::read_to_string(&path).unwrap();

    assert!(!html.contains("{{"));
    assert_eq!(html.matches("https://project.supabase.co").count(), 2);
    assert!(html.contains(r#"window.SMTP_EMAIL = "relay@example.org";"#));
    assert!(html.contains(r#"window.SMTP_PASSWORD = "";"#));
    assert_eq!(report.replaced, 6);
    assert_eq!(
        report.unset,
        vec!["SUPABASE_ANON_KEY", "SUPABASE_SERVICE_KEY", "SMTP_PASSWORD"]
    );
}

#[test]
fn second_run_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir);

    inject_placeholders(&path, &partial_set()).unwrap();
    let once = fs::read_to_string(&path).unwrap();

    let report = inject_placeholders(&path, &partial_set()).unwrap();
    let twice = fs::read_to_string(&path).unwrap();

    assert_eq!(once, twice);
    assert_eq!(report.replaced, 0);
}

#[test]
fn missing_document_is_reported_and_not_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("web").join("index.html");

    let err = inject_placeholders(&path, &partial_set()).unwrap_err();

    assert!(matches!(err, InjectError::DocumentNotFound(_)));
    assert!(err.to_string().ends_with("index.html not found!"));
    assert!(!path.exists());
}

#[test]
fn binary_substitutes_from_process_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_env-injector"))
        .current_dir(dir.path())
        .env("INJECT_DOCUMENT_PATH", &path)
        .env("SUPABASE_URL", "https://bin.supabase.co")
        .env("SUPABASE_ANON_KEY", "anon-key")
        .env_remove("SUPABASE_SERVICE_KEY")
        .env_remove("SMTP_EMAIL")
        .env_remove("SMTP_PASSWORD")
        .output()
        .expect("run env-injector");

    assert!(output.status.success());

    let html = fs::read_to_string(&path).unwrap();
    assert_eq!(html.matches("https://bin.supabase.co").count(), 2);
    assert!(html.contains(r#"window.SUPABASE_ANON_KEY = "anon-key";"#));
    assert!(html.contains(r#"window.SMTP_EMAIL = "";"#));
}

#[test]
fn binary_exits_with_status_1_when_document_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.html");

    let output = Command::new(env!("CARGO_BIN_EXE_env-injector"))
        .current_dir(dir.path())
        .env("INJECT_DOCUMENT_PATH", &path)
        .output()
        .expect("run env-injector");

    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());
}
