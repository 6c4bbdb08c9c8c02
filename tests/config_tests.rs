// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billed::config::{ClientConfig, DEFAULT_API_URL};
use billed::format::DateStyle;
use std::collections::HashMap;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let cfg = ClientConfig::from_file(&dir.path().join("config.toml")).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
}

#[test]
fn file_values_and_env_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "api_url = \"https://api.billed.test\"\ndate_style = \"french_short\"\n",
    )
    .unwrap();
    let cfg = ClientConfig::from_file(&path).unwrap();
    assert_eq!(cfg.api_url, "https://api.billed.test");
    assert_eq!(cfg.date_style, DateStyle::FrenchShort);
    assert_eq!(cfg.timeout_secs, 15);

    let env: HashMap<&str, &str> =
        HashMap::from([("BILLED_API_URL", " http://127.0.0.1:9000 "), ("BILLED_TIMEOUT_SECS", "3")]);
    let cfg = cfg
        .with_env_overrides(|k| env.get(k).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(cfg.api_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.timeout().as_secs(), 3);
}

#[test]
fn bad_timeout_override_is_rejected() {
    let err = ClientConfig::default()
        .with_env_overrides(|k| (k == "BILLED_TIMEOUT_SECS").then(|| "soon".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("BILLED_TIMEOUT_SECS"));
}
