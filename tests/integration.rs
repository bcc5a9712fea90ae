use predicates::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_pkgdoc")))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Run pkgdoc on `<tmp>/src/<package>` writing to `<tmp>/out`; return stdout.
fn generate(tmp: &TempDir, package: &str, extra: &[&str]) -> String {
    let assert = cmd()
        .arg(tmp.path().join("src").join(package))
        .arg("-o")
        .arg(tmp.path().join("out"))
        .args(extra)
        .assert()
        .success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

fn read(tmp: &TempDir, rel: &str) -> String {
    fs::read_to_string(tmp.path().join("out").join(rel)).unwrap()
}

/// Every file under `dir` with its bytes, keyed by relative path.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn visit(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                visit(root, &path, files);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                files.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    let mut files = BTreeMap::new();
    visit(dir, dir, &mut files);
    files
}

// -- scenarios --

#[test]
fn class_function_and_private_symbol() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "src/pkg/__init__.py",
        "from .core import Bar\n\ndef foo():\n    pass\n\ndef _hidden():\n    pass\n",
    );
    write(tmp.path(), "src/pkg/core.py", "class Bar:\n    pass\n");

    let stdout = generate(&tmp, "pkg", &[]);
    assert_eq!(stdout, "pkg\n");

    assert_eq!(read(&tmp, "pkg/foo.rst"), "pkg.foo\n=======\n\n.. autofunction:: pkg.foo\n");
    assert_eq!(
        read(&tmp, "pkg/Bar.rst"),
        "pkg.Bar\n=======\n\n.. autoclass:: pkg.Bar\n    :members:\n    :undoc-members:\n    :inherited-members:\n"
    );

    let expected_index = "\
pkg
===

.. automodule:: pkg

Classes
-------

    - :doc:`pkg.Bar <pkg/Bar>`

Functions
---------

    - :doc:`pkg.foo <pkg/foo>`

Subpackages
-----------

";
    assert_eq!(read(&tmp, "pkg.rst"), expected_index);

    let files: Vec<_> = snapshot(&tmp.path().join("out")).into_keys().collect();
    assert_eq!(
        files,
        vec![
            PathBuf::from("pkg/Bar.rst"),
            PathBuf::from("pkg/foo.rst"),
            PathBuf::from("pkg.rst"),
        ]
    );
}

#[test]
fn child_without_marker_is_invisible() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/root/__init__.py", "");
    write(tmp.path(), "src/root/child/module.py", "def f(): pass\n");
    write(tmp.path(), "src/root/child/grand/__init__.py", "");

    let stdout = generate(&tmp, "root", &[]);
    assert_eq!(stdout, "root\n");

    let files = snapshot(&tmp.path().join("out"));
    assert!(files.keys().all(|p| !p.to_string_lossy().contains("child")));
    assert!(!read(&tmp, "root.rst").contains("child"));
}

#[test]
fn empty_package_has_empty_sections() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "VERSION = '1.0'\nimport os\n");

    generate(&tmp, "pkg", &[]);
    let index = read(&tmp, "pkg.rst");
    assert!(index.contains("Classes\n-------\n\nFunctions\n---------\n\nSubpackages\n-----------\n"));
    assert!(!index.contains(":doc:"));
    assert!(tmp.path().join("out/pkg").is_dir());
    assert_eq!(fs::read_dir(tmp.path().join("out/pkg")).unwrap().count(), 0);
}

#[test]
fn direct_subpackages_only() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "");
    write(tmp.path(), "src/pkg/A/__init__.py", "class Alpha: pass\n");
    write(tmp.path(), "src/pkg/B/__init__.py", "def beta(): pass\n");

    let stdout = generate(&tmp, "pkg", &[]);
    assert_eq!(stdout, "pkg\npkg.A\npkg.B\n");
    assert_eq!(stdout.matches("pkg\n").count(), 1);

    let index = read(&tmp, "pkg.rst");
    assert!(index.ends_with(
        "Subpackages\n-----------\n\n    - :doc:`pkg.A <pkg.A>`\n    - :doc:`pkg.B <pkg.B>`\n\n"
    ));
    assert!(read(&tmp, "pkg.A.rst").contains(":doc:`pkg.A.Alpha <pkg.A/Alpha>`"));
    assert!(tmp.path().join("out/pkg.B/beta.rst").is_file());
}

#[test]
fn nested_grandchild_reached_through_child() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "");
    write(tmp.path(), "src/pkg/a/__init__.py", "");
    write(tmp.path(), "src/pkg/a/deep/__init__.py", "");

    let stdout = generate(&tmp, "pkg", &[]);
    assert_eq!(stdout, "pkg\npkg.a\npkg.a.deep\n");
    assert!(!read(&tmp, "pkg.rst").contains("pkg.a.deep"));
    assert!(read(&tmp, "pkg.a.rst").contains(":doc:`pkg.a.deep <pkg.a.deep>`"));
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "src/pkg/__init__.py",
        "from .shapes import *\n\ndef area(shape):\n    return shape.area()\n",
    );
    write(
        tmp.path(),
        "src/pkg/shapes.py",
        "import abc\n\nclass Shape(metaclass=abc.ABCMeta):\n    pass\n\nclass Circle(Shape):\n    pass\n",
    );
    write(tmp.path(), "src/pkg/io/__init__.py", "def load(path): pass\n");

    let first_out = generate(&tmp, "pkg", &[]);
    let first = snapshot(&tmp.path().join("out"));
    let second_out = generate(&tmp, "pkg", &[]);
    let second = snapshot(&tmp.path().join("out"));

    assert_eq!(first_out, second_out);
    assert_eq!(first, second);
    assert!(first.contains_key(Path::new("pkg/Shape.rst")));
    assert!(first.contains_key(Path::new("pkg/Circle.rst")));
}

#[test]
fn root_without_marker_generates_nothing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/module.py", "def f(): pass\n");

    let stdout = generate(&tmp, "pkg", &[]);
    assert_eq!(stdout, "");
    assert!(!tmp.path().join("out").exists());
}

// -- failures --

#[test]
fn import_failure_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "from .missing import thing\n");

    cmd()
        .arg(tmp.path().join("src/pkg"))
        .arg("-o")
        .arg(tmp.path().join("out"))
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("cannot import"));
}

#[test]
fn missing_package_directory_is_fatal() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .arg(tmp.path().join("nowhere"))
        .arg("-o")
        .arg(tmp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read directory"));
}

// -- options --

#[test]
fn list_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "from .missing import thing\n");
    write(tmp.path(), "src/pkg/sub/__init__.py", "");

    let stdout = generate(&tmp, "pkg", &["--list"]);
    assert_eq!(stdout, "pkg\npkg.sub\n");
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn exclude_skips_subtree() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "");
    write(tmp.path(), "src/pkg/tests/__init__.py", "def test_x(): pass\n");
    write(tmp.path(), "src/pkg/tests/unit/__init__.py", "");
    write(tmp.path(), "src/pkg/io/__init__.py", "");

    let stdout = generate(&tmp, "pkg", &["--exclude", "*.tests"]);
    assert_eq!(stdout, "pkg\npkg.io\n");
    assert!(!read(&tmp, "pkg.rst").contains("pkg.tests"));
    assert!(!tmp.path().join("out/pkg.tests.rst").exists());
}

#[test]
fn explicit_name() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/checkout/__init__.py", "def f(): pass\n");

    let stdout = generate(&tmp, "checkout", &["--name", "biotite"]);
    assert_eq!(stdout, "biotite\n");
    assert_eq!(
        read(&tmp, "biotite/f.rst"),
        "biotite.f\n=========\n\n.. autofunction:: biotite.f\n"
    );
}

#[test]
fn manifest_replaces_sources() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "raise ImportError('needs compiled extension')\n");
    write(tmp.path(), "src/pkg/sub/__init__.py", "");
    write(
        tmp.path(),
        "exports.json",
        r#"{
            "packages": {
                "pkg": [
                    {"name": "Engine", "kind": "abc-meta"},
                    {"name": "run", "kind": "function"},
                    {"name": "_private", "kind": "function"},
                    {"name": "pi", "kind": "float"}
                ],
                "pkg.sub": [{"name": "Part", "kind": "type"}]
            }
        }"#,
    );
    let manifest = tmp.path().join("exports.json");

    let stdout = generate(&tmp, "pkg", &["--manifest", manifest.to_str().unwrap()]);
    assert_eq!(stdout, "pkg\npkg.sub\n");
    let index = read(&tmp, "pkg.rst");
    assert!(index.contains(":doc:`pkg.Engine <pkg/Engine>`"));
    assert!(index.contains(":doc:`pkg.run <pkg/run>`"));
    assert!(!index.contains("_private"));
    assert!(!index.contains("pkg.pi"));
    assert!(tmp.path().join("out/pkg.sub/Part.rst").is_file());
}

#[test]
fn manifest_missing_package_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "");
    write(tmp.path(), "src/pkg/sub/__init__.py", "");
    write(tmp.path(), "exports.json", r#"{"packages": {"pkg": []}}"#);

    cmd()
        .arg(tmp.path().join("src/pkg"))
        .arg("-o")
        .arg(tmp.path().join("out"))
        .arg("--manifest")
        .arg(tmp.path().join("exports.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not listed in manifest"));
}

#[test]
fn config_file_sets_options() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "class Bar: pass\ndef foo(): pass\n");
    write(tmp.path(), "src/pkg/vendored/__init__.py", "");
    write(
        tmp.path(),
        "pkgdoc.toml",
        "exclude = [\"pkg.vendored\"]\n\n[autodoc]\nclass-options = [\"members\"]\nfunction-options = [\"noindex\"]\n",
    );
    let config = tmp.path().join("pkgdoc.toml");

    let stdout = generate(&tmp, "pkg", &["-c", config.to_str().unwrap()]);
    assert_eq!(stdout, "pkg\n");
    assert_eq!(
        read(&tmp, "pkg/Bar.rst"),
        "pkg.Bar\n=======\n\n.. autoclass:: pkg.Bar\n    :members:\n"
    );
    assert_eq!(
        read(&tmp, "pkg/foo.rst"),
        "pkg.foo\n=======\n\n.. autofunction:: pkg.foo\n    :noindex:\n"
    );
}

#[test]
fn config_file_in_working_directory() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "class Bar: pass\n");
    write(
        tmp.path(),
        "pkgdoc.toml",
        "output = \"docs/api\"\n\n[autodoc]\nclass-options = [\"members\"]\n",
    );

    cmd()
        .current_dir(tmp.path())
        .arg("src/pkg")
        .assert()
        .success()
        .stdout("pkg\n");
    assert_eq!(
        fs::read_to_string(tmp.path().join("docs/api/pkg/Bar.rst")).unwrap(),
        "pkg.Bar\n=======\n\n.. autoclass:: pkg.Bar\n    :members:\n"
    );
    assert!(tmp.path().join("docs/api/pkg.rst").is_file());
    assert!(!tmp.path().join("apidoc").exists());
}

#[test]
fn invalid_config_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "");
    write(tmp.path(), "bad.toml", "unknown = 1\n");

    cmd()
        .arg(tmp.path().join("src/pkg"))
        .arg("-c")
        .arg(tmp.path().join("bad.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn custom_marker() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/PACKAGE", "");
    write(tmp.path(), "src/pkg/__init__.py", "def f(): pass\n");
    write(tmp.path(), "src/pkg/a/__init__.py", "");
    write(tmp.path(), "src/pkg/b/PACKAGE", "");

    let stdout = generate(&tmp, "pkg", &["--marker", "PACKAGE"]);
    assert_eq!(stdout, "pkg\npkg.b\n");
}

#[test]
fn subpackage_importing_from_parent() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "src/pkg/__init__.py",
        "def helper(): pass\nfrom .sub import Thing\n",
    );
    write(
        tmp.path(),
        "src/pkg/sub/__init__.py",
        "from .. import helper\nclass Thing: pass\n",
    );

    let stdout = generate(&tmp, "pkg", &[]);
    assert_eq!(stdout, "pkg\npkg.sub\n");
    let index = read(&tmp, "pkg.rst");
    assert!(index.contains(":doc:`pkg.Thing <pkg/Thing>`"), "{index}");
    assert!(index.contains(":doc:`pkg.helper <pkg/helper>`"), "{index}");
    assert!(tmp.path().join("out/pkg/Thing.rst").is_file());
    assert!(tmp.path().join("out/pkg.sub/helper.rst").is_file());
}

#[test]
fn star_import_of_concatenated_all() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/pkg/__init__.py", "from .api import *\n");
    write(
        tmp.path(),
        "src/pkg/api.py",
        "from . import core\nfrom .core import *\n__all__ = core.__all__ + ['extra']\ndef extra(): pass\n",
    );
    write(
        tmp.path(),
        "src/pkg/core.py",
        "__all__ = ['Engine']\nclass Engine: pass\n",
    );

    generate(&tmp, "pkg", &[]);
    assert!(tmp.path().join("out/pkg/Engine.rst").is_file());
    assert!(tmp.path().join("out/pkg/extra.rst").is_file());
}
