use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DICTIONARY: &str = "باب الكاف\n\
• ܟܬܒܐ /kθɑːβɑː/ اسم ج ܟܬܒܐ̈ كتاب. سفر / رسالة\n\
- ܟܬܘܒܐ (مثله)\n\
• ܟܠܒܐ (ح) كلب\n";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn converts_text_to_json_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "كاف.txt", DICTIONARY);

    let mut cmd = cargo_bin_cmd!("syriac-lexicon");
    cmd.arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Entries: 2").and(predicate::str::contains("Wrote JSON")));

    let json: serde_json::Value = serde_json::from_str(&read(&dir.path().join("كاف.json"))).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "كاف:0001");
    assert_eq!(entries[0]["lemma"], "ܟܬܒܐ");
    assert_eq!(entries[0]["pronunciation"], "kθɑːβɑː");
    assert_eq!(entries[0]["partOfSpeech"], "اسم");
    assert_eq!(entries[0]["subentries"][0]["id"], "كاف:0001-1");
    assert_eq!(
        entries[0]["subentries"][0]["metadata"]["inheritedFrom"],
        "كاف:0001"
    );
    assert_eq!(entries[1]["attributes"]["domain"][0], "animal");
}

#[test]
fn converts_text_to_xml_at_explicit_path() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "dict.txt", DICTIONARY);
    let output = dir.path().join("out.xml");

    let mut cmd = cargo_bin_cmd!("syriac-lexicon");
    cmd.arg(&input)
        .arg("--format")
        .arg("xml")
        .arg("--output")
        .arg(&output)
        .arg("--quiet");
    cmd.assert().success().stdout(predicate::str::is_empty());

    let xml = read(&output);
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<entry id=\"dict:0001\">"));
    assert!(xml.contains("<lemma lang=\"syc\">ܟܬܒܐ</lemma>"));
    assert!(xml.contains("<entry id=\"dict:0001-1\">"));
}

#[test]
fn two_phase_strategy_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "dict.txt", DICTIONARY);
    let sequential = dir.path().join("seq.json");
    let parallel = dir.path().join("par.json");

    cargo_bin_cmd!("syriac-lexicon")
        .arg(&input)
        .arg("-o")
        .arg(&sequential)
        .arg("-q")
        .assert()
        .success();
    cargo_bin_cmd!("syriac-lexicon")
        .arg(&input)
        .arg("-o")
        .arg(&parallel)
        .arg("-q")
        .arg("--strategy")
        .arg("two-phase")
        .arg("--threads")
        .arg("3")
        .assert()
        .success();

    assert_eq!(read(&sequential), read(&parallel));
}

#[test]
fn missing_input_exits_with_code_two() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("syriac-lexicon");
    cmd.arg(dir.path().join("absent.txt"));
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn unknown_extension_is_read_as_text() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "dict.doc", DICTIONARY);

    let mut cmd = cargo_bin_cmd!("syriac-lexicon");
    cmd.env_remove("RUST_LOG").arg(&input).arg("-q");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("input extension is not"));

    let json: serde_json::Value = serde_json::from_str(&read(&dir.path().join("dict.json"))).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn json_lines_with_config() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "dict.jsonl",
        "{\"text\": \"ܟܬܒܐ نعت كتاب\", \"isListItem\": true}\n",
    );
    let config = write_input(&dir, "config.yaml", "part_of_speech:\n  - نعت\n");

    let mut cmd = cargo_bin_cmd!("syriac-lexicon");
    cmd.arg(&input).arg("--config").arg(&config).arg("-q");
    cmd.assert().success();

    let json: serde_json::Value = serde_json::from_str(&read(&dir.path().join("dict.json"))).unwrap();
    assert_eq!(json[0]["partOfSpeech"], "نعت");
    assert_eq!(json[0]["flatGlosses"][0], "كتاب");
}
