use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for reckon
pub fn reckon() -> Command {
    let mut cmd = cargo_bin_cmd!("reckon");
    cmd.env_remove("RECKON_DB")
        .env_remove("RECKON_CONFIG")
        .env_remove("RECKON_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Items 1 and 2 move together, item 3 moves against both. User 3 rated only item 2.
pub const RATINGS_CSV: &str = "\
user,item,rating,timestamp
1,1,5.0,881250949
2,1,3.0,881250950
1,2,4.0,881250951
2,2,2.0,881250952
1,3,1.0,881250953
2,3,3.0,881250954
3,2,4.0,881250955
";

#[allow(dead_code)]
pub const TAGS_CSV: &str = "\
item,tag,weight
1,action,1.0
2,action,0.5
2,drama,0.5
3,drama,1.0
";

/// Write `content` to `name` under `dir`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

/// Write the standard ratings fixture and return its path
pub fn ratings_fixture(dir: &Path) -> PathBuf {
    write_file(dir, "ratings.csv", RATINGS_CSV)
}

/// Write the standard tag weights fixture and return its path
#[allow(dead_code)]
pub fn tags_fixture(dir: &Path) -> PathBuf {
    write_file(dir, "tags.csv", TAGS_CSV)
}

/// Parse stdout as JSON
#[allow(dead_code)]
pub fn stdout_json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout should be valid JSON")
}
