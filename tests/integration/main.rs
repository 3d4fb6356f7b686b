//! Integration tests for doccache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Command isolated from the user's config and data directories
    fn doccache(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("doccache");
        cmd.env_remove("DOCCACHE_CONFIG")
            .env_remove("DOCCACHE_DATA_DIR")
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .arg("--data-dir")
            .arg(temp.path().join("data"));
        cmd
    }

    fn add(temp: &TempDir, labels: &[&str], body: &str) -> String {
        let mut cmd = doccache(temp);
        cmd.arg("add");
        for label in labels {
            cmd.args(["-l", label]);
        }
        let output = cmd.write_stdin(body).assert().success().get_output().clone();
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Reference-counted cache of labelled"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("doccache"));
    }

    #[test]
    fn list_empty() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn list_table_shows_storage_usage() {
        let temp = TempDir::new().unwrap();
        add(&temp, &["type=x"], "abc");

        doccache(&temp)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("1 document(s)"))
            .stdout(predicate::str::contains("Storage: 1/512 files"));
    }

    #[test]
    fn add_then_cat() {
        let temp = TempDir::new().unwrap();
        let name = add(&temp, &["type=consensus", "flavor=ns"], "network-status-version 3\n");
        assert_eq!(name.len(), 32);

        doccache(&temp)
            .args(["cat", "flavor", "ns"])
            .assert()
            .success()
            .stdout("network-status-version 3\n");
    }

    #[test]
    fn add_from_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("doc.txt");
        fs::write(&file, "from a file").unwrap();

        doccache(&temp)
            .args(["add", "-l", "type=file"])
            .arg(&file)
            .assert()
            .success();

        doccache(&temp)
            .args(["cat", "type", "file"])
            .assert()
            .success()
            .stdout("from a file");
    }

    #[test]
    fn add_records_digest_label() {
        let temp = TempDir::new().unwrap();
        add(&temp, &["type=x"], "abc");

        // sha256("abc")
        doccache(&temp)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ));
    }

    #[test]
    fn find_first_and_all() {
        let temp = TempDir::new().unwrap();
        let first = add(&temp, &["type=consensus"], "one");
        let second = add(&temp, &["type=consensus"], "two");
        let other = add(&temp, &["type=diff"], "three");

        doccache(&temp)
            .args(["find", "type", "consensus", "--all", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains(first.as_str()))
            .stdout(predicate::str::contains(second.as_str()))
            .stdout(predicate::str::contains(other.as_str()).not());

        doccache(&temp)
            .args(["find", "type", "diff", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{}\n", other)));
    }

    #[test]
    fn cat_missing_document() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .args(["cat", "type", "nothing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No document labelled type=nothing"));
    }

    #[test]
    fn add_rejects_invalid_label() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .args(["add", "-l", "bad key=value"])
            .write_stdin("x")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid label"));
    }

    #[test]
    fn add_refuses_when_full() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[cache]\nmax_entries = 1\n",
        )
        .unwrap();

        add(&temp, &["n=1"], "first");
        doccache(&temp)
            .args(["add", "-l", "n=2"])
            .write_stdin("second")
            .assert()
            .failure()
            .stderr(predicate::str::contains("is full"));
    }

    #[test]
    fn subdirs_are_separate_caches() {
        let temp = TempDir::new().unwrap();
        add(&temp, &["type=x"], "default subdir");

        doccache(&temp)
            .args(["--subdir", "other", "list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let temp = TempDir::new().unwrap();
        doccache(&temp)
            .args(["config", "init"])
            .assert()
            .success();
        assert!(temp.path().join("config.toml").exists());

        doccache(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("max_entries = 512"));
    }
}

mod library_tests {
    use doccache::{filter, Cache, CacheError, Labels, StorageDir};
    use tempfile::TempDir;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs.iter().copied().collect()
    }

    #[test]
    fn roundtrip_through_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let mut cache = Cache::open_in(temp.path(), "consensus", 16).unwrap();
            cache.add(&labels(&[("type", "X")]), b"body B").unwrap();
        }

        let cache = Cache::open_in(temp.path(), "consensus", 16).unwrap();
        let entry = cache.find_first("type", "X").unwrap();
        assert_eq!(entry.get_value("type"), Some("X"));
        assert_eq!(entry.body().unwrap(), b"body B");
    }

    #[test]
    fn custom_store_via_with_store() {
        let temp = TempDir::new().unwrap();
        let store = StorageDir::open(temp.path().join("docs"), 4).unwrap();
        let mut cache = Cache::with_store(store).unwrap();

        cache.add(&labels(&[("a", "1")]), b"x").unwrap();
        cache.add(&labels(&[("a", "2")]), b"y").unwrap();

        let mut candidates = cache.entries().to_vec();
        filter(&mut candidates, "a", "2");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].body().unwrap(), b"y");
    }

    #[test]
    fn entry_outlives_cache() {
        let temp = TempDir::new().unwrap();
        let held = {
            let mut cache = Cache::open_in(temp.path(), "docs", 4).unwrap();
            cache.add(&labels(&[("type", "X")]), b"late").unwrap()
        };

        assert_eq!(held.ref_count(), 1);
        assert!(!held.has_owner());
        assert!(matches!(held.body(), Err(CacheError::Orphaned { .. })));
    }
}
