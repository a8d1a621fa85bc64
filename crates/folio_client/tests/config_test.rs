//! Configuration layering and credential persistence.

use folio_client::{CredentialStore, CredentialsConfig, FolioConfig, HttpRecordStore};
use folio_core::EditPolicy;
use folio_error::{ConfigErrorKind, FolioErrorKind};
use std::str::FromStr;

#[test]
fn bundled_defaults_are_complete() -> anyhow::Result<()> {
    let config = FolioConfig::from_toml_str("")?;

    assert_eq!(config.store.base_url, "http://localhost:8080/api");
    assert_eq!(config.store.timeout_secs, 30);
    assert_eq!(config.generation.ws_url, "ws://localhost:8080/api/gpt/stream");
    assert_eq!(config.generation.default_model, "gpt-4o-mini");
    assert_eq!(config.editor.edit_policy, EditPolicy::LastWriterWins);
    assert_eq!(config.credentials.path, None);
    Ok(())
}

#[test]
fn overrides_replace_only_given_keys() -> anyhow::Result<()> {
    let config = FolioConfig::from_toml_str(
        r#"
        [store]
        base_url = "https://books.example.com/api"

        [editor]
        edit_policy = "lock-while-generating"

        [credentials]
        path = "/tmp/folio-token"
        "#,
    )?;

    assert_eq!(config.store.base_url, "https://books.example.com/api");
    assert_eq!(config.store.timeout_secs, 30);
    assert_eq!(config.generation.default_model, "gpt-4o-mini");
    assert_eq!(config.editor.edit_policy, EditPolicy::LockWhileGenerating);
    assert_eq!(
        config.credentials.path.as_deref(),
        Some(std::path::Path::new("/tmp/folio-token"))
    );
    Ok(())
}

#[test]
fn unknown_edit_policy_is_rejected() {
    let result = FolioConfig::from_toml_str(
        r#"
        [editor]
        edit_policy = "merge"
        "#,
    );
    let err = result.unwrap_err();
    assert!(matches!(
        err.kind(),
        FolioErrorKind::Config(e) if matches!(e.kind, ConfigErrorKind::Invalid(_))
    ));
}

#[test]
fn edit_policy_parses_from_cli_spelling() -> anyhow::Result<()> {
    assert_eq!(
        EditPolicy::from_str("lock-while-generating")?,
        EditPolicy::LockWhileGenerating
    );
    assert_eq!(EditPolicy::LastWriterWins.to_string(), "last-writer-wins");
    Ok(())
}

#[test]
fn config_file_layers_over_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("folio.toml");
    std::fs::write(&path, "[generation]\ndefault_model = \"gpt-4o\"\n")?;

    let config = FolioConfig::from_file(&path)?;
    assert_eq!(config.generation.default_model, "gpt-4o");
    assert_eq!(config.generation.ws_url, "ws://localhost:8080/api/gpt/stream");
    Ok(())
}

#[test]
fn credential_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = CredentialStore::new(dir.path().join("nested").join("token"));

    assert_eq!(store.load()?, None);

    store.save("  secret-token\n")?;
    assert_eq!(store.load()?.as_deref(), Some("secret-token"));

    store.clear()?;
    assert_eq!(store.load()?, None);
    store.clear()?;
    Ok(())
}

#[test]
fn blank_credential_file_means_logged_out() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("token");
    std::fs::write(&path, "\n  \n")?;

    assert_eq!(CredentialStore::new(&path).load()?, None);
    Ok(())
}

#[test]
fn configured_credential_path_wins() -> anyhow::Result<()> {
    let config = CredentialsConfig {
        path: Some("/tmp/folio-test/token".into()),
    };
    let store = CredentialStore::from_config(&config)?;
    assert_eq!(store.path(), std::path::Path::new("/tmp/folio-test/token"));
    Ok(())
}

#[test]
fn endpoints_extend_the_base_path() -> anyhow::Result<()> {
    let store = HttpRecordStore::new("http://localhost:8080/api/", None)?;

    assert_eq!(
        store.endpoint(&["books", "b1", "fields", "mdBody"])?.as_str(),
        "http://localhost:8080/api/books/b1/fields/mdBody"
    );
    assert_eq!(
        store.endpoint(&["books", "a b/c"])?.as_str(),
        "http://localhost:8080/api/books/a%20b%2Fc"
    );
    assert!(!store.is_authenticated());
    Ok(())
}

#[test]
fn invalid_base_url_is_rejected() {
    for url in ["not a url", "mailto:someone@example.com"] {
        let err = HttpRecordStore::new(url, Some("t".into())).unwrap_err();
        match err.kind() {
            FolioErrorKind::Config(e) => {
                assert!(matches!(e.kind, ConfigErrorKind::InvalidBaseUrl { .. }))
            }
            other => panic!("unexpected error for {url}: {other}"),
        }
    }
}
