//! Text/binary classification by null-byte sniffing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes sampled from the head of a file when deciding text vs binary.
const SNIFF_LEN: u64 = 512;

/// `true` when the first 512 bytes contain no null byte.
///
/// Unreadable files classify as binary so they are skipped rather than
/// rewritten. Binary content past the sampled prefix is not detected; such
/// files are treated as text.
pub fn is_text_file(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut block = Vec::with_capacity(SNIFF_LEN as usize);
    match file.take(SNIFF_LEN).read_to_end(&mut block) {
        Ok(_) => !block.contains(&0),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_text_file;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plain_text_classifies_as_text() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("plain.txt");
        fs::write(&path, "hello world\n").expect("write");
        assert!(is_text_file(&path));
    }

    #[test]
    fn null_byte_in_prefix_classifies_as_binary() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("blob.bin");
        fs::write(&path, b"ab\x00cd").expect("write");
        assert!(!is_text_file(&path));
    }

    #[test]
    fn missing_file_classifies_as_binary() {
        let dir = TempDir::new().expect("temp dir");
        assert!(!is_text_file(&dir.path().join("absent")));
    }

    #[test]
    fn null_byte_after_sniff_window_still_classifies_as_text() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("tail.bin");
        let mut content = vec![b'a'; 600];
        content.push(0);
        fs::write(&path, content).expect("write");
        assert!(is_text_file(&path));
    }

    #[test]
    fn empty_file_classifies_as_text() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").expect("write");
        assert!(is_text_file(&path));
    }
}
