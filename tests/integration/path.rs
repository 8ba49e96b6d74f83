// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::sample_tree;
use memfs::{FsError, Path, PathBuf, PathError};

#[test]
fn test_path_validation() {
    assert!(Path::try_from("/a/b").is_ok());
    assert_eq!(Path::try_from(""), Err(PathError::Empty));
    assert_eq!(Path::try_from("/a\0b"), Err(PathError::ContainsNull));

    assert!(PathBuf::try_from("/a/b").is_ok());
    assert_eq!(PathBuf::try_from(""), Err(PathError::Empty));
}

#[test]
fn test_no_normalisation() {
    let mut fs = sample_tree();

    // `.` and `..` are ordinary names with no special meaning.
    assert_eq!(fs.read(Path::new("/docs/./readme")), Err(FsError::NotFound));
    fs.create_dir(Path::new("/docs/..")).unwrap();
    fs.create_file(Path::new("/docs/../up")).unwrap();
    assert_eq!(fs.read(Path::new("/docs/../up")).unwrap(), b"");

    // Repeated separators are literal empty segments, which never
    // resolve.
    assert_eq!(fs.read(Path::new("//docs/readme")), Err(FsError::NotFound));
    assert_eq!(fs.read(Path::new("/docs//readme")), Err(FsError::NotFound));
}

#[test]
fn test_rooted_and_unrooted() {
    let fs = sample_tree();

    // The leading separator only roots the path; its absence changes
    // nothing because resolution always starts at the root.
    assert_eq!(fs.read(Path::new("docs/readme")).unwrap(), b"hello");
    assert_eq!(fs.read(Path::new("/docs/readme")).unwrap(), b"hello");
}

#[test]
fn test_non_utf8_names() {
    let mut fs = sample_tree();

    // Names are opaque octet strings; invalid UTF-8 is fine.
    let path = Path::new(b"/tmp/\xc3\x28");
    fs.create_file(path).unwrap();
    fs.write(path, b"bytes").unwrap();
    assert_eq!(fs.read(path).unwrap(), b"bytes");

    let weird = memfs::NodeName::try_from(b"\xc3\x28".as_slice()).unwrap();
    let paths = fs.find(weird);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0], b"/tmp/\xc3\x28".as_slice());
}
