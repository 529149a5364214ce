use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// how the contents of a document with a given extension are read and written
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct FileEncoding {
    pub binary: bool,
    /// only present for text files
    pub encoding: Option<&'static str>,
}

const TEXT: FileEncoding = FileEncoding {
    binary: false,
    encoding: Some("utf8"),
};

const BINARY: FileEncoding = FileEncoding {
    binary: true,
    encoding: None,
};

static FILE_TYPES: Lazy<HashMap<&'static str, FileEncoding>> = Lazy::new(|| {
    HashMap::from([
        ("txt", TEXT),
        ("md", TEXT),
        ("json", TEXT),
        ("csv", TEXT),
        ("xml", TEXT),
        ("html", TEXT),
        ("css", TEXT),
        ("js", TEXT),
        ("ts", TEXT),
        // svg is xml under the hood
        ("svg", TEXT),
        ("pdf", BINARY),
        ("doc", BINARY),
        ("docx", BINARY),
        ("xls", BINARY),
        ("xlsx", BINARY),
        ("zip", BINARY),
        ("rar", BINARY),
        ("jpg", BINARY),
        ("jpeg", BINARY),
        ("png", BINARY),
        ("gif", BINARY),
        ("bmp", BINARY),
        ("mp3", BINARY),
        ("wav", BINARY),
        ("mp4", BINARY),
        ("avi", BINARY),
    ])
});

/// looks up the encoding for the passed extension (without the leading `.`).
/// Unknown extensions are treated as binary
pub fn file_encoding(extension: &str) -> FileEncoding {
    FILE_TYPES
        .get(extension.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(BINARY)
}

/// the flag the file tree exposes for each document: `1` for text, `0` for binary
pub fn encoding_flag(extension: &str) -> u8 {
    if file_encoding(extension).binary {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod file_encoding_tests {
    use super::*;

    #[test]
    fn text_extensions_are_not_binary() {
        assert_eq!(TEXT, file_encoding("md"));
        assert_eq!(TEXT, file_encoding("svg"));
        assert_eq!(TEXT, file_encoding("TXT"));
    }

    #[test]
    fn unknown_extensions_default_to_binary() {
        assert_eq!(BINARY, file_encoding("bin"));
        assert_eq!(BINARY, file_encoding(""));
    }

    #[test]
    fn encoding_flag_matches_binary_flag() {
        assert_eq!(1, encoding_flag("txt"));
        assert_eq!(0, encoding_flag("pdf"));
        assert_eq!(0, encoding_flag("bin"));
    }
}
