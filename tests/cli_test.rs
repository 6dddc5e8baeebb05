use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const SAM: &str = "I am Sam. Sam I am. I do not like this Sam I am.\n";

// Write test data into the temporary directory and return the path.
fn put_file(temp_dir: &tempfile::TempDir,name: &str,dat: &[u8]) -> Result<PathBuf,Box<dyn std::error::Error>> {
    let path = temp_dir.path().join(name);
    match std::fs::write(&path,dat) {
        Ok(_) => Ok(path),
        Err(e) => Err(Box::new(e))
    }
}

fn sample_text() -> Vec<u8> {
    SAM.repeat(500).into_bytes()
}

#[test]
fn compress_file() -> STDRESULT {
    let mut cmd = Command::cargo_bin("slzw")?;
    let temp_dir = tempfile::tempdir()?;
    let in_path = put_file(&temp_dir,"sam.txt",&sample_text())?;
    let out_path = temp_dir.path().join("sam.lzw");
    cmd.arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("compressed 24500 into"));
    let expected = slzw::lzw::compress_slice(&sample_text(),&slzw::lzw::STD_OPTIONS)?;
    match std::fs::read(out_path) {
        Ok(v) => assert_eq!(v,expected),
        _ => panic!("unable to compare output with reference")
    }
    Ok(())
}

#[test]
fn expand_file() -> STDRESULT {
    let mut cmd = Command::cargo_bin("slzw")?;
    let temp_dir = tempfile::tempdir()?;
    let compressed = slzw::lzw::compress_slice(&sample_text(),&slzw::lzw::STD_OPTIONS)?;
    let in_path = put_file(&temp_dir,"sam.lzw",&compressed)?;
    let out_path = temp_dir.path().join("sam.txt");
    cmd.arg("expand")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    match std::fs::read(out_path) {
        Ok(v) => assert_eq!(v,sample_text()),
        _ => panic!("unable to compare output with reference")
    }
    Ok(())
}

#[test]
fn standard_streams() -> STDRESULT {
    let compressed = assert_cmd::Command::cargo_bin("slzw")?
        .arg("compress")
        .write_stdin("AAAA")
        .assert()
        .success()
        .stdout(vec![0x41u8,0x00,0x06,0xf9])
        .get_output()
        .stdout
        .clone();
    assert_cmd::Command::cargo_bin("slzw")?
        .arg("expand")
        .write_stdin(compressed)
        .assert()
        .success()
        .stdout("AAAA");
    Ok(())
}

#[test]
fn corrupt_stream() -> STDRESULT {
    assert_cmd::Command::cargo_bin("slzw")?
        .arg("expand")
        .write_stdin(vec![0x01u8,0x01])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("UNKNOWN CODEWORD (0x101)"));
    Ok(())
}

#[test]
fn missing_input() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    Command::cargo_bin("slzw")?
        .arg("compress")
        .arg("-i").arg(temp_dir.path().join("nothing.txt"))
        .arg("-o").arg(temp_dir.path().join("nothing.lzw"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("couldn't open file"));
    Ok(())
}

#[test]
fn bad_usage() -> STDRESULT {
    Command::cargo_bin("slzw")?
        .arg("shrink")
        .assert()
        .code(1);
    Ok(())
}
