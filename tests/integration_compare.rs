// tests/integration_compare.rs
//! End-to-end comparison runs over real folders on disk.
//!
//! VERIFICATION STRATEGY:
//! 1. Renamed copies across two submissions are matched up correctly.
//! 2. Folders without units silently drop out of pairing.
//! 3. Serial and parallel execution agree, and repeated runs are identical.
//! 4. Detection flags the renamed-copy pair end to end.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use cribsift_core::compare::Comparer;
use cribsift_core::detection::{AvgDetection, Detector};
use tempfile::TempDir;

const FOO_JAVA: &str = "\
public class Foo {
    private int count;

    public int increment(int amount) {
        int total = count + amount;
        count = total;
        return total;
    }
}
";

// Foo with every identifier renamed.
const FOO2_JAVA: &str = "\
public class Foo2 {
    private int tally;

    public int add(int step) {
        int next = tally + step;
        tally = next;
        return next;
    }
}
";

const BAR_JAVA: &str = "\
public class Bar {
    public String repeat(String text, int times) {
        StringBuilder builder = new StringBuilder();
        for (int i = 0; i < times; i++) {
            builder.append(text);
        }
        return builder.toString();
    }
}
";

// Bar with every identifier renamed.
const BAZ_JAVA: &str = "\
public class Baz {
    public String duplicate(String chunk, int n) {
        StringBuilder sb = new StringBuilder();
        for (int j = 0; j < n; j++) {
            sb.append(chunk);
        }
        return sb.toString();
    }
}
";

struct Fixture {
    _dir: TempDir,
    alice: PathBuf,
    bob: PathBuf,
    carol: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let alice = dir.path().join("alice");
    let bob = dir.path().join("bob");
    let carol = dir.path().join("carol");

    write(&alice, "Foo.java", FOO_JAVA);
    write(&alice, "Bar.java", BAR_JAVA);
    write(&bob, "Foo2.java", FOO2_JAVA);
    write(&bob, "Baz.java", BAZ_JAVA);
    // carol handed in no source at all
    write(&carol, "notes.txt", "I did not finish");

    Fixture {
        _dir: dir,
        alice,
        bob,
        carol,
    }
}

fn write(folder: &Path, name: &str, content: &str) {
    fs::create_dir_all(folder).unwrap();
    fs::write(folder.join(name), content).unwrap();
}

#[test]
fn renamed_copies_are_matched_up() {
    let fx = fixture();
    let comparer = Comparer::with_defaults(false);
    let folders = vec![fx.alice.clone(), fx.bob.clone()];

    let comparisons = comparer.compare(&folders, &HashSet::new()).unwrap();
    assert_eq!(comparisons.len(), 1);

    let fc = &comparisons[0];
    assert_eq!(fc.type_comparisons.len(), 2);

    let foo = fc.type_comparisons.iter().find(|tc| tc.type1 == "Foo").unwrap();
    assert_eq!(foo.type2, "Foo2");
    let bar = fc.type_comparisons.iter().find(|tc| tc.type1 == "Bar").unwrap();
    assert_eq!(bar.type2, "Baz");

    // Every vector has the full default metric set, in order.
    for tc in &fc.type_comparisons {
        assert_eq!(tc.metrics.len(), 7);
        assert_eq!(tc.metrics[0].name, "tree_diff");
        assert_eq!(tc.metrics[1].name, "tree_diff_renamed");
    }

    // A renamed copy is structurally identical after normalization.
    let renamed_diff = &foo.metrics[1];
    assert!(renamed_diff.value.abs() < 1e-12);
}

#[test]
fn empty_folder_pairs_are_skipped() {
    let fx = fixture();
    let comparer = Comparer::with_defaults(false);
    let folders = vec![fx.alice.clone(), fx.bob.clone(), fx.carol.clone()];

    let comparisons = comparer.compare(&folders, &HashSet::new()).unwrap();

    // carol produced no units, so only alice/bob remains.
    assert_eq!(comparisons.len(), 1);
    assert!(comparisons[0].folder1.ends_with("alice"));
    assert!(comparisons[0].folder2.ends_with("bob"));
}

#[test]
fn serial_and_parallel_runs_agree() {
    let fx = fixture();
    let folders = vec![fx.alice.clone(), fx.bob.clone(), fx.carol.clone()];

    let serial = Comparer::with_defaults(false)
        .compare(&folders, &HashSet::new())
        .unwrap();
    let parallel = Comparer::with_defaults(true)
        .compare(&folders, &HashSet::new())
        .unwrap();

    assert_eq!(
        serde_json::to_string(&serial).unwrap(),
        serde_json::to_string(&parallel).unwrap()
    );
}

#[test]
fn repeated_runs_are_identical() {
    let fx = fixture();
    let comparer = Comparer::with_defaults(false);
    let folders = vec![fx.alice.clone(), fx.bob.clone()];

    let first = comparer.compare(&folders, &HashSet::new()).unwrap();
    let second = comparer.compare(&folders, &HashSet::new()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn progress_fires_once_per_pair() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let fx = fixture();
    let comparer = Comparer::with_defaults(false);
    let folders = vec![fx.alice.clone(), fx.bob.clone(), fx.carol.clone()];

    let calls = AtomicUsize::new(0);
    let with_progress = comparer
        .compare_with_progress(&folders, &HashSet::new(), &|_, total| {
            assert_eq!(total, 3);
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    // 3 pairs completed (skipped pairs still count as completed work)...
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // ...and the callback never changed the results.
    let without = comparer.compare(&folders, &HashSet::new()).unwrap();
    assert_eq!(
        serde_json::to_string(&with_progress).unwrap(),
        serde_json::to_string(&without).unwrap()
    );
}

#[test]
fn excluded_types_never_participate() {
    let fx = fixture();
    let comparer = Comparer::with_defaults(false);
    let folders = vec![fx.alice.clone(), fx.bob.clone()];

    let excluded: HashSet<String> = ["Foo".to_string(), "Foo2".to_string()]
        .into_iter()
        .collect();
    let comparisons = comparer.compare(&folders, &excluded).unwrap();

    assert_eq!(comparisons.len(), 1);
    let fc = &comparisons[0];
    assert_eq!(fc.type_comparisons.len(), 1);
    assert_eq!(fc.type_comparisons[0].type1, "Bar");
}

#[test]
fn detection_flags_renamed_submissions() {
    let fx = fixture();
    let comparer = Comparer::with_defaults(false);
    let folders = vec![fx.alice.clone(), fx.bob.clone(), fx.carol.clone()];

    let comparisons = comparer.compare(&folders, &HashSet::new()).unwrap();
    let detector = Detector::new(Box::new(AvgDetection::new(0.5)));
    let detected = detector.detect(&comparisons).unwrap();

    assert_eq!(detected.len(), 1);
    assert!(detected[0].folder1.ends_with("alice"));
    assert_eq!(detected[0].type_comparisons.len(), 2);
}
