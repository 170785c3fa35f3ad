// Tests for the lazy directory walker

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use sweep::cleaner::{default_predicates, Deleter, DirWalker, Predicate, SweepError, Trigger};

use super::common::{rel, tree};

fn walk_all(walker: DirWalker) -> Vec<PathBuf> {
    walker.collect::<Result<Vec<_>, SweepError>>().unwrap()
}

#[test]
fn test_single_project_yields_node_modules_once() {
    let dir = tree(&["package.json", "node_modules/", "src/a.js"]);
    let predicates = vec![Predicate::any_of("node_modules", ["package.json"])];
    let mut walker = DirWalker::new(dir.path(), predicates, [".git"]);

    assert_eq!(walker.next_candidate().unwrap(), Some(dir.path().join("node_modules")));
    assert_eq!(walker.next_candidate().unwrap(), None);
    assert!(walker.is_finished());
}

#[test]
fn test_finished_walker_stays_finished() {
    let dir = tree(&["README.md"]);
    let mut walker = DirWalker::new(dir.path(), default_predicates(), [".git"]);

    for _ in 0..3 {
        assert_eq!(walker.next_candidate().unwrap(), None);
    }
    assert!(walker.next().is_none());
}

#[test]
fn test_both_rules_in_one_directory_yield_in_rule_order() {
    let dir = tree(&[
        "package.json",
        "Cargo.toml",
        "node_modules/",
        "target/",
        "crates/core/Cargo.toml",
        "crates/core/target/",
    ]);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    assert_eq!(
        rel(dir.path(), &found),
        vec!["node_modules", "target", "crates/core/target"]
    );
}

#[test]
fn test_rule_order_beats_name_order() {
    let dir = tree(&["package.json", "Cargo.toml", "node_modules/", "target/"]);
    let predicates = vec![
        Predicate::any_of("target", ["Cargo.toml"]),
        Predicate::any_of("node_modules", ["package.json"]),
    ];

    let found = walk_all(DirWalker::new(dir.path(), predicates, [".git"]));

    assert_eq!(rel(dir.path(), &found), vec!["target", "node_modules"]);
}

#[test]
fn test_target_without_its_trigger_is_not_yielded() {
    let dir = tree(&[
        "package.json",
        "node_modules/",
        "target/Cargo.toml",
        "target/target/",
    ]);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    // target/ has no Cargo.toml next to it and is never descended into
    assert_eq!(rel(dir.path(), &found), vec!["node_modules"]);
}

#[test]
fn test_breadth_first_across_levels() {
    let dir = tree(&[
        "a/b/package.json",
        "a/b/node_modules/",
        "a/package.json",
        "a/node_modules/",
        "c/package.json",
        "c/node_modules/",
    ]);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    assert_eq!(
        rel(dir.path(), &found),
        vec!["a/node_modules", "c/node_modules", "a/b/node_modules"]
    );
}

#[test]
fn test_ignored_names_are_neither_yielded_nor_entered() {
    let dir = tree(&[
        "package.json",
        "node_modules/",
        "app/package.json",
        "app/node_modules/",
        ".git/Cargo.toml",
        ".git/target/",
        ".git/sub/package.json",
        ".git/sub/node_modules/",
    ]);

    let found = walk_all(DirWalker::new(
        dir.path(),
        default_predicates(),
        [".git", "node_modules"],
    ));

    assert!(found.is_empty(), "unexpected candidates: {found:?}");
}

#[test]
fn test_ignored_trigger_file_does_not_activate_rule() {
    let dir = tree(&["package.json", "node_modules/"]);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), ["package.json"]));

    assert!(found.is_empty());
}

#[test]
fn test_directory_with_only_ignored_entries_is_skipped() {
    let dir = tree(&[".git/HEAD", "empty/", "only-vcs/.git/"]);
    let mut walker = DirWalker::new(dir.path(), default_predicates(), [".git"]);

    assert_eq!(walker.next_candidate().unwrap(), None);
    assert_eq!(walker.pending_len(), 0);
}

#[test]
fn test_file_named_like_target_is_a_candidate() {
    let dir = tree(&["package.json", "node_modules"]);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    assert_eq!(found, vec![dir.path().join("node_modules")]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_target_is_a_candidate() {
    let dir = tree(&["package.json", "store/left-pad/index.js"]);
    std::os::unix::fs::symlink(dir.path().join("store"), dir.path().join("node_modules")).unwrap();

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    assert_eq!(found, vec![dir.path().join("node_modules")]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_descended() {
    let dir = tree(&["real/package.json", "real/node_modules/"]);
    std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    // reached once through real/, never through the link
    assert_eq!(rel(dir.path(), &found), vec!["real/node_modules"]);
}

#[test]
fn test_function_trigger() {
    let dir = tree(&["App.csproj", "bin/Debug/", "obj/", "lib/Lib.csproj", "lib/bin/"]);
    let predicates = vec![Predicate::new("bin", Trigger::Func(|name| name.ends_with(".csproj")))];

    let found = walk_all(DirWalker::new(dir.path(), predicates, [".git"]));

    assert_eq!(rel(dir.path(), &found), vec!["bin", "lib/bin"]);
}

#[test]
fn test_no_rules_yields_nothing() {
    let dir = tree(&["package.json", "node_modules/", "a/b/c/"]);

    let found = walk_all(DirWalker::new(dir.path(), Vec::new(), [".git"]));

    assert!(found.is_empty());
}

#[test]
fn test_deleting_candidate_between_calls() {
    let dir = tree(&[
        "package.json",
        "Cargo.toml",
        "node_modules/left-pad/index.js",
        "target/debug/app",
        "docs/index.md",
    ]);
    let mut walker = DirWalker::new(dir.path(), default_predicates(), [".git"]);
    let deleter = Deleter::new(false);

    let first = walker.next_candidate().unwrap().unwrap();
    deleter.delete(&first).unwrap();
    assert!(!first.exists());

    let second = walker.next_candidate().unwrap().unwrap();
    assert_eq!(second, dir.path().join("target"));
    deleter.delete(&second).unwrap();

    assert_eq!(walker.next_candidate().unwrap(), None);
    assert!(dir.path().join("docs/index.md").exists());
}

#[test]
fn test_candidates_are_unique_and_never_nested() {
    let mut layout = Vec::new();
    for i in 0..6 {
        for j in 0..4 {
            let project = format!("group{i}/project{j}");
            layout.push(format!("{project}/package.json"));
            layout.push(format!("{project}/node_modules/dep/package.json"));
            layout.push(format!("{project}/node_modules/dep/node_modules/"));
            if j % 2 == 0 {
                layout.push(format!("{project}/Cargo.toml"));
                layout.push(format!("{project}/target/release/"));
            }
            layout.push(format!("{project}/.git/package.json"));
            layout.push(format!("{project}/.git/node_modules/"));
            layout.push(format!("{project}/src/lib/util.js"));
        }
    }
    let layout: Vec<&str> = layout.iter().map(String::as_str).collect();
    let dir = tree(&layout);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    // 24 node_modules + 12 target
    assert_eq!(found.len(), 36);

    let unique: HashSet<_> = found.iter().collect();
    assert_eq!(unique.len(), found.len());

    for (i, a) in found.iter().enumerate() {
        assert!(!a.components().any(|c| c.as_os_str() == ".git"));
        for b in &found[i + 1..] {
            assert!(!b.starts_with(a), "{} is inside earlier candidate {}", b.display(), a.display());
            assert!(!a.starts_with(b));
        }
    }
}

#[test]
fn test_deep_tree() {
    let mut path = dir_chain(300);
    path.push_str("/package.json");
    let dir = tree(&[path.as_str()]);
    fs::create_dir(dir.path().join(path.trim_end_matches("package.json")).join("node_modules")).unwrap();

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("node_modules"));
    assert_eq!(found[0].components().count(), dir.path().components().count() + 301);
}

#[test]
fn test_wide_tree_of_empty_directories() {
    let names: Vec<String> = (0..2000).map(|i| format!("empty{i:04}/")).collect();
    let mut layout: Vec<&str> = names.iter().map(String::as_str).collect();
    layout.push("zz/Cargo.toml");
    layout.push("zz/target/");
    let dir = tree(&layout);

    let found = walk_all(DirWalker::new(dir.path(), default_predicates(), [".git"]));

    assert_eq!(rel(dir.path(), &found), vec!["zz/target"]);
}

fn dir_chain(depth: usize) -> String {
    vec!["d"; depth].join("/")
}
