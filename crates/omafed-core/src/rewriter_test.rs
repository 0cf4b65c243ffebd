use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;

fn script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_basic_commands() {
    let dir = TempDir::new().unwrap();
    let path = script(
        dir.path(),
        "test-script.sh",
        "#!/bin/bash\nsudo apt update\nsudo apt install nginx\nsudo apt upgrade\nadd-apt-repository ppa:some/repo\nsudo apt autoremove",
    );

    let report = Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "#!/bin/bash\nsudo dnf update\nsudo dnf install nginx\nsudo dnf upgrade\nsudo dnf config-manager --add-repo ppa:some/repo\nsudo dnf autoremove"
    );
    assert_eq!(report.changed().count(), 1);
}

#[test]
fn test_complex_commands_with_options() {
    let dir = TempDir::new().unwrap();
    let path = script(
        dir.path(),
        "test-script.sh",
        "#!/bin/bash\nsudo apt-get update -y\nsudo apt install -y --no-install-recommends nginx\napt list --installed\nsudo apt-get install -y docker-ce docker-ce-cli",
    );

    Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "#!/bin/bash\nsudo dnf update -y\nsudo dnf install -y --no-install-recommends nginx\ndnf list --installed\nsudo dnf install -y docker-ce docker-ce-cli"
    );
}

#[test]
fn test_unmatched_file_is_untouched() {
    let dir = TempDir::new().unwrap();
    let content = "#!/bin/bash\necho \"Hello World\"\nls -la\nwget https://example.com/file";
    let path = script(dir.path(), "plain.sh", content);
    let modified_before = fs::metadata(&path).unwrap().modified().unwrap();

    let report = Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(fs::read(&path).unwrap(), content.as_bytes());
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified_before);
    assert_eq!(
        report.outcomes,
        vec![FileOutcome {
            path,
            changed: false,
            error: None,
        }]
    );
}

#[test]
fn test_rewrite_twice_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let path = script(
        dir.path(),
        "docker.sh",
        "sudo apt-get install -y docker-ce\nadd-apt-repository ppa:x\n# apt is great",
    );

    let first = Rewriter::default().rewrite(dir.path()).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();
    let second = Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(first.changed().count(), 1);
    assert_eq!(second.changed().count(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_hidden_scripts_are_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = script(dir.path(), ".hidden.sh", "sudo apt update");

    let report = Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "sudo dnf update");
    assert_eq!(report.changed().count(), 1);
}

#[test]
fn test_non_matching_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = script(dir.path(), "notes.txt", "sudo apt update");

    let report = Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "sudo apt update");
    assert!(report.is_empty());
}

#[test]
fn test_nested_files_are_rewritten_in_walk_order() {
    let dir = TempDir::new().unwrap();
    let first = script(dir.path(), "a/one.sh", "apt-get install git");
    let second = script(dir.path(), "b/two.sh", "echo ok");

    let report = Rewriter::default().rewrite(dir.path()).unwrap();

    let paths: Vec<&PathBuf> = report.outcomes.iter().map(|outcome| &outcome.path).collect();
    assert_eq!(paths, vec![&first, &second]);
    assert_eq!(report.unchanged().count(), 1);
}

#[test]
fn test_kept_files_are_excluded() {
    let dir = TempDir::new().unwrap();
    let kept = script(dir.path(), "chrome.sh", "sudo apt install chrome");
    let converted = script(dir.path(), "vlc.sh", "sudo apt install vlc");

    let report = Rewriter::default()
        .rewrite_excluding(dir.path(), &HashSet::from([kept.clone()]))
        .unwrap();

    assert_eq!(fs::read_to_string(&kept).unwrap(), "sudo apt install chrome");
    assert_eq!(fs::read_to_string(&converted).unwrap(), "sudo dnf install vlc");
    assert_eq!(report.outcomes.len(), 1);
}

#[test]
fn test_custom_suffix() {
    let dir = TempDir::new().unwrap();
    let bash = script(dir.path(), "setup.bash", "sudo apt update");
    let sh = script(dir.path(), "setup.sh", "sudo apt update");

    Rewriter::new(RuleSet::apt_to_dnf(), ScriptFilter::new(".bash"))
        .rewrite(dir.path())
        .unwrap();

    assert_eq!(fs::read_to_string(&bash).unwrap(), "sudo dnf update");
    assert_eq!(fs::read_to_string(&sh).unwrap(), "sudo apt update");
}

#[test]
fn test_missing_directory() {
    let err = Rewriter::default()
        .rewrite(Path::new("/nonexistent/directory"))
        .unwrap_err();

    assert!(matches!(err.source, ConvertError::DirectoryUnreadable { .. }));
    assert!(err.report.is_empty());
}

#[test]
fn test_non_utf8_script_is_rewritten() {
    let dir = TempDir::new().unwrap();
    let latin1 = dir.path().join("latin1.sh");
    fs::write(&latin1, b"sudo apt update # caf\xe9\n").unwrap();
    let after = script(dir.path(), "next.sh", "sudo apt update");

    let report = Rewriter::default().rewrite(dir.path()).unwrap();

    assert_eq!(report.changed().count(), 2);
    assert_eq!(fs::read(&latin1).unwrap(), b"sudo dnf update # caf\xe9\n".to_vec());
    assert_eq!(fs::read_to_string(&after).unwrap(), "sudo dnf update");
}

#[cfg(unix)]
#[test]
fn test_read_failure_aborts_the_pass() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let done = script(dir.path(), "a.sh", "sudo apt update");
    let locked = script(dir.path(), "b.sh", "sudo apt update");
    let pending = script(dir.path(), "c.sh", "sudo apt update");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores file permissions, nothing to observe there
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let err = Rewriter::default().rewrite(dir.path()).unwrap_err();

    assert!(matches!(err.source, ConvertError::FileReadFailure { .. }));
    assert_eq!(err.report.outcomes.len(), 2);
    assert!(err.report.outcomes[1].error.is_some());
    assert_eq!(fs::read_to_string(&done).unwrap(), "sudo dnf update");
    assert_eq!(fs::read_to_string(&pending).unwrap(), "sudo apt update");
}

#[cfg(unix)]
#[test]
fn test_write_failure_aborts_the_pass() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = script(dir.path(), "readonly.sh", "sudo apt update");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

    // root ignores file permissions, nothing to observe there
    if fs::OpenOptions::new().write(true).open(&path).is_ok() {
        return;
    }

    let err = Rewriter::default().rewrite(dir.path()).unwrap_err();

    assert!(matches!(err.source, ConvertError::FileWriteFailure { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "sudo apt update");
}
