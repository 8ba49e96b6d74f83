// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod path;

use memfs::{Memfs, Path};

/// Build a namespace holding a small mixed tree:
///
/// ```text
/// /docs/        (dir)
/// /docs/readme  (file, "hello")
/// /docs/src/    (dir)
/// /docs/src/a   (file)
/// /tmp/         (dir)
/// ```
fn sample_tree() -> Memfs {
    let mut fs = Memfs::new();
    fs.create_dir(Path::new("/docs")).unwrap();
    fs.create_file(Path::new("/docs/readme")).unwrap();
    fs.write(Path::new("/docs/readme"), b"hello").unwrap();
    fs.create_dir(Path::new("/docs/src")).unwrap();
    fs.create_file(Path::new("/docs/src/a")).unwrap();
    fs.create_dir(Path::new("/tmp")).unwrap();
    fs
}
