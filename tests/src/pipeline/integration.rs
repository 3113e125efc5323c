#![cfg(test)]
use std::collections::HashMap;
use std::fs;

use async_trait::async_trait;
use uncdn_common::config::Config;
use uncdn_common::error::LoadError;
use uncdn_core::fetch::{self, FetchError, SourceFetcher};
use uncdn_core::filter;
use uncdn_core::loader;
use uncdn_core::prerequisite::{self, Prerequisite};

/// Serves canned bodies; unknown URLs behave like an unreachable host.
struct CannedSources(HashMap<String, String>);

impl CannedSources {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
        )
    }
}

#[async_trait]
impl SourceFetcher for CannedSources {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.0.get(url).cloned().ok_or_else(|| FetchError::Timeout {
            url: url.to_string(),
        })
    }
}

fn db() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::from_db_dir(dir.path().join("cidr-db"));
    fs::create_dir_all(&cfg.source_dir).unwrap();
    (dir, cfg)
}

/// Fetch, then load, then filter: the path taken by `uncdn --update -i in -o out`.
#[tokio::test]
async fn update_then_filter() {
    let (dir, cfg) = db();
    fs::write(
        &cfg.source_list,
        "https://cdn.example/ips-v4\nhttps://offline.example/list\nhttps://cloud.example/ranges.html\n",
    )
    .unwrap();

    let sources = CannedSources::new(&[
        ("https://cdn.example/ips-v4", "104.16.0.0/13\n172.64.0.0/13\n"),
        (
            "https://cloud.example/ranges.html",
            "<tr><td>13.32.0.5/15</td><td>999.1.1.1/24</td></tr>",
        ),
    ]);

    assert!(matches!(
        prerequisite::check(&cfg),
        Prerequisite::MissingAggregate { .. }
    ));

    let report = fetch::update(&cfg, &sources).await.unwrap();
    assert_eq!(report.sources, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(report.unique, 4);
    assert_eq!(prerequisite::check(&cfg), Prerequisite::Ready);

    // 999.1.1.1/24 survives extraction but not loading; 13.32.0.5/15 is normalized.
    let ranges = loader::load_all(&cfg).unwrap();
    assert_eq!(ranges.len(), 3);
    let loaded: Vec<String> = ranges.iter().map(|r| r.to_string()).collect();
    assert!(loaded.contains(&"13.32.0.0/15".to_string()));

    let input = dir.path().join("hosts.txt");
    let output = dir.path().join("clean.txt");
    fs::write(
        &input,
        "a.example 104.18.2.2\nb.example 8.8.8.8\n\nc.example 13.33.1.1 10.0.0.1\nd.example\n",
    )
    .unwrap();

    let outcome = filter::filter_file(&input, &output, &ranges).unwrap();

    assert_eq!(outcome.removed, 2);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "b.example 8.8.8.8\nd.example\n"
    );
}

#[tokio::test]
async fn update_without_source_list_fails() {
    let (_dir, cfg) = db();
    let err = fetch::update(&cfg, &CannedSources::new(&[])).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::MissingSourceList { .. })
    ));
}

#[test]
fn manual_cidr_files_are_merged_with_the_aggregate() {
    let (dir, cfg) = db();
    fs::write(&cfg.aggregate_output, "192.168.0.0/16\n").unwrap();
    fs::write(cfg.source_dir.join("manual-CIDRS.txt"), "10.0.0.5/24\n10.0.0.0/24\n").unwrap();
    fs::write(cfg.source_dir.join("notes.txt"), "8.8.8.0/24\n").unwrap();

    let ranges = loader::load_all(&cfg).unwrap();
    assert_eq!(ranges.len(), 2);

    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(
        &input,
        "server 192.168.1.5 ok\nserver 10.0.0.1 ok\nserver 8.8.8.8 ok\nno ip here\n",
    )
    .unwrap();

    let outcome = filter::filter_file(&input, &output, &ranges).unwrap();
    assert_eq!(outcome.removed, 2);
    assert_eq!(outcome.kept, vec!["server 8.8.8.8 ok", "no ip here"]);

    // A second pass over clean output changes nothing.
    let again = dir.path().join("again.txt");
    let second = filter::filter_file(&output, &again, &ranges).unwrap();
    assert_eq!(second.removed, 0);
    assert_eq!(
        fs::read_to_string(&again).unwrap(),
        fs::read_to_string(&output).unwrap()
    );
}

#[test]
fn everything_removed_leaves_a_single_newline() {
    let (dir, cfg) = db();
    fs::write(&cfg.aggregate_output, "0.0.0.0/0\n").unwrap();

    let ranges = loader::load_all(&cfg).unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "1.1.1.1\n2.2.2.2\n").unwrap();

    let outcome = filter::filter_file(&input, &output, &ranges).unwrap();

    assert_eq!(outcome.removed, 2);
    assert_eq!(fs::read_to_string(&output).unwrap(), "\n");
}
