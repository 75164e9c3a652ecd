//! Common test utilities for dashdocs integration tests.
//!
//! Provides `TestEnv` for setting up an isolated docsets root with
//! fixture docsets in both index dialects.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use dashdocs::fixtures::{self, Entry};
use dashdocs::types::IndexRow;
use dashdocs::{Config, Dialect, SearchEngine};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary docsets root.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// Creates a new empty docsets root.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Installs `<root>/<name>.docset`.
    pub fn add_docset(&self, name: &str, dialect: Dialect, entries: &[Entry]) -> PathBuf {
        fixtures::create_docset(self.root(), name, dialect, entries)
            .expect("Failed to create docset")
    }

    /// Installs a docset at `<root>/<rel>`, for the nested layouts.
    pub fn add_docset_at(&self, rel: &str, dialect: Dialect, entries: &[Entry]) -> PathBuf {
        let docset = self.root().join(rel);
        fixtures::create_docset_at(&docset, dialect, entries).expect("Failed to create docset");
        docset
    }

    /// Installs a docset whose index file holds arbitrary bytes.
    pub fn add_raw_index(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let resources = self
            .root()
            .join(format!("{name}.docset"))
            .join("Contents")
            .join("Resources");
        fs::create_dir_all(&resources).expect("Failed to create docset directories");
        let index = resources.join("docSet.dsidx");
        fs::write(&index, bytes).expect("Failed to write index");
        index
    }

    /// Installs a docset whose index is created by the given SQL.
    pub fn add_sql_index(&self, name: &str, sql: &str) -> PathBuf {
        let index = self.add_raw_index(name, b"");
        fs::remove_file(&index).expect("Failed to clear index");
        let conn = rusqlite::Connection::open(&index).expect("Failed to open index");
        conn.execute_batch(sql).expect("Failed to build index");
        index
    }

    /// Config for this root with the given common docsets.
    pub fn config(&self, common: &[&str]) -> Config {
        Config {
            docsets_root: self.root().to_path_buf(),
            common_docsets: common.iter().map(|s| (*s).to_string()).collect(),
            ..Config::default()
        }
    }

    /// Search engine for this root with the given common docsets.
    pub fn engine(&self, common: &[&str]) -> SearchEngine {
        SearchEngine::new(self.config(common))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A root with a legacy "Redis" docset and a modern "Go" docset.
pub fn redis_and_go() -> TestEnv {
    let env = TestEnv::new();
    env.add_docset("Redis", Dialect::Legacy, &fixtures::redis_entries());
    env.add_docset("Go", Dialect::Modern, &fixtures::go_entries());
    env
}

/// Entries used to compare the two dialects; no anchors, so both dialects
/// store identical rows.
pub fn shared_entries() -> Vec<Entry> {
    vec![
        Entry::new("Function", "parse_int", "conv.html"),
        Entry::new("Function", "parse_float", "conv.html"),
        Entry::new("Function", "ParseBool", "conv.html"),
        Entry::new("Type", "Parser", "parser.html"),
        Entry::new("Type", "parse", "parser.html"),
        Entry::new("Method", "Parser.parse_all", "parser.html"),
        Entry::new("Constant", "MAX_INT", "limits.html"),
    ]
}

/// Asserts the within-docset ordering: shorter names first, then
/// case-insensitive name order.
pub fn assert_ranked(rows: &[&IndexRow]) {
    for pair in rows.windows(2) {
        let (a, b) = (&pair[0].name, &pair[1].name);
        let (la, lb) = (a.chars().count(), b.chars().count());
        assert!(
            la < lb || (la == lb && a.to_lowercase() <= b.to_lowercase()),
            "'{a}' must not precede '{b}'"
        );
    }
}

/// Asserts every term of `pattern` occurs in every row name, ignoring case.
pub fn assert_all_terms_match(rows: &[&IndexRow], pattern: &str) {
    for row in rows {
        let name = row.name.to_lowercase();
        for term in pattern.split_whitespace() {
            assert!(
                name.contains(&term.to_lowercase()),
                "'{}' does not contain term '{term}'",
                row.name
            );
        }
    }
}
