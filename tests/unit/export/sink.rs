use super::*;
use crate::export::format::ExportFormat;

fn artifact(name: &str, bytes: &[u8]) -> Artifact {
    Artifact {
        filename: name.to_owned(),
        format: ExportFormat::Png,
        bytes: bytes.to_vec(),
    }
}

fn leftovers(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".partial"))
        .collect()
}

#[test]
fn directory_sink_writes_and_cleans_staging() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(tmp.path().join("out"));
    let path = sink.write(&artifact("Deli-qr-code.png", b"abc")).unwrap();

    assert_eq!(path, tmp.path().join("out").join("Deli-qr-code.png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    assert!(leftovers(sink.dir()).is_empty());
}

#[test]
fn directory_sink_overwrite_policy() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(tmp.path());
    sink.write(&artifact("a.png", b"one")).unwrap();
    sink.write(&artifact("a.png", b"two")).unwrap();
    assert_eq!(std::fs::read(tmp.path().join("a.png")).unwrap(), b"two");

    let mut strict = DirectorySink::new(tmp.path()).no_overwrite();
    let err = strict.write(&artifact("a.png", b"three")).unwrap_err();
    assert!(matches!(err, MenuQrError::Validation(_)));
    assert_eq!(std::fs::read(tmp.path().join("a.png")).unwrap(), b"two");
    assert!(leftovers(tmp.path()).is_empty());
}

#[test]
fn empty_artifact_is_rejected_before_touching_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(tmp.path());
    let err = sink.write(&artifact("empty.png", b"")).unwrap_err();
    assert!(matches!(err, MenuQrError::NotReady(_)));
    assert!(!tmp.path().join("empty.png").exists());
}

#[test]
fn failed_persist_leaves_no_staging_file() {
    let tmp = tempfile::tempdir().unwrap();
    // A directory squatting on the target name makes the final rename fail.
    std::fs::create_dir(tmp.path().join("taken.png")).unwrap();
    std::fs::write(tmp.path().join("taken.png").join("keep"), b"x").unwrap();

    let mut sink = DirectorySink::new(tmp.path());
    assert!(sink.write(&artifact("taken.png", b"data")).is_err());
    assert!(leftovers(tmp.path()).is_empty());
}

#[test]
fn in_memory_sink_records_in_order() {
    let mut sink = InMemorySink::new();
    sink.write(&artifact("a.png", b"1")).unwrap();
    sink.write(&artifact("b.svg", b"2")).unwrap();
    let names: Vec<_> = sink.artifacts().iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(names, ["a.png", "b.svg"]);
}
