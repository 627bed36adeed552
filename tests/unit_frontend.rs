// tests/unit_frontend.rs
//! Front-end behavior: folder parsing, nested types, exclusion, and
//! identifier normalization.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cribsift_core::diff::structural_diff_size;
use cribsift_core::frontend::{parse_folder, ProgramUnit};
use tempfile::TempDir;

const COUNTER_JAVA: &str = "\
public class Foo {
    private int count;

    public int increment(int amount) {
        int total = count + amount;
        count = total;
        return total;
    }
}
";

// Same class with every identifier renamed, byte-for-byte layout otherwise.
const RENAMED_COUNTER_JAVA: &str = "\
public class Tally {
    private int value;

    public int bump(int delta) {
        int sum = value + delta;
        value = sum;
        return sum;
    }
}
";

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn parse(dir: &Path) -> Vec<ProgramUnit> {
    parse_folder(dir, &HashSet::new()).unwrap()
}

#[test]
fn parses_declared_types_with_counts() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Foo.java", COUNTER_JAVA);

    let units = parse(dir.path());
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name(), "Foo");
    assert!(units[0].element_count() > 10);
    assert!(units[0].original().text.contains("class Foo"));
}

#[test]
fn nested_types_get_qualified_names() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Outer.java",
        "public class Outer {\n    class Inner {\n        int x;\n    }\n}\n",
    );

    let units = parse(dir.path());
    let names: Vec<&str> = units.iter().map(ProgramUnit::name).collect();
    assert_eq!(names, vec!["Outer", "Outer.Inner"]);
    assert_eq!(units[1].simple_name(), "Inner");
}

#[test]
fn exclusion_matches_simple_and_qualified_names() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Outer.java",
        "public class Outer {\n    class Inner {\n        int x;\n    }\n}\n",
    );

    let by_simple: HashSet<String> = ["Inner".to_string()].into_iter().collect();
    let units = parse_folder(dir.path(), &by_simple).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name(), "Outer");

    let by_qualified: HashSet<String> = ["Outer.Inner".to_string()].into_iter().collect();
    let units = parse_folder(dir.path(), &by_qualified).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name(), "Outer");
}

#[test]
fn folder_without_sources_yields_no_units() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "notes.txt", "not code");

    assert!(parse(dir.path()).is_empty());
}

#[test]
fn normalization_erases_renaming() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Foo.java", COUNTER_JAVA);
    write_file(dir.path(), "Tally.java", RENAMED_COUNTER_JAVA);

    let units = parse(dir.path());
    assert_eq!(units.len(), 2);
    let foo = units.iter().find(|u| u.name() == "Foo").unwrap();
    let tally = units.iter().find(|u| u.name() == "Tally").unwrap();

    // The originals differ, the normalized renderings do not.
    assert_ne!(foo.original().text, tally.original().text);
    assert_eq!(foo.normalized().text, tally.normalized().text);

    assert!(structural_diff_size(foo.original(), tally.original()) > 0);
    assert_eq!(structural_diff_size(foo.normalized(), tally.normalized()), 0);

    // Renaming does not change structure size.
    assert_eq!(foo.element_count(), tally.element_count());
}

#[test]
fn normalized_form_never_aliases_the_original() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Foo.java", COUNTER_JAVA);

    let units = parse(dir.path());
    let foo = &units[0];
    assert_ne!(foo.original().text, foo.normalized().text);
    assert!(foo.normalized().text.contains("__t0__"));
    assert!(!foo.original().text.contains("__t0__"));
}

#[test]
fn comments_are_not_structure() {
    let with_comments = TempDir::new().unwrap();
    write_file(
        with_comments.path(),
        "Foo.java",
        "public class Foo {\n    // running total\n    private int count;\n}\n",
    );
    let plain = TempDir::new().unwrap();
    write_file(
        plain.path(),
        "Foo.java",
        "public class Foo {\n    private int count;\n}\n",
    );

    let a = parse(with_comments.path());
    let b = parse(plain.path());

    assert_eq!(a[0].element_count(), b[0].element_count());
    assert_eq!(structural_diff_size(a[0].normalized(), b[0].normalized()), 0);
    assert_eq!(structural_diff_size(a[0].original(), b[0].original()), 0);
}

#[test]
fn parses_python_classes_too() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "greeter.py",
        "class Greeter:\n    def greet(self, name):\n        message = \"hello \" + name\n        return message\n",
    );
    write_file(
        dir.path(),
        "welcomer.py",
        "class Welcomer:\n    def welcome(self, who):\n        text = \"hello \" + who\n        return text\n",
    );

    let units = parse(dir.path());
    assert_eq!(units.len(), 2);
    let greeter = units.iter().find(|u| u.name() == "Greeter").unwrap();
    let welcomer = units.iter().find(|u| u.name() == "Welcomer").unwrap();

    assert_eq!(greeter.normalized().text, welcomer.normalized().text);
    assert_eq!(
        structural_diff_size(greeter.normalized(), welcomer.normalized()),
        0
    );
}

#[test]
fn unit_enumeration_order_is_stable() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "B.java", "class Bravo { int b; }\n");
    write_file(dir.path(), "A.java", "class Alpha { int a; }\n");

    let first: Vec<String> = parse(dir.path()).iter().map(|u| u.name().to_string()).collect();
    let second: Vec<String> = parse(dir.path()).iter().map(|u| u.name().to_string()).collect();
    assert_eq!(first, second);
    // Sorted file walk: A.java before B.java.
    assert_eq!(first, vec!["Alpha", "Bravo"]);
}
