// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use clap::Parser;
use memfs::{Command, CommandError, FsError, Memfs};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

type Error = Box<dyn std::error::Error>;

const RESULT_SUCCESS: &str = "ok";
const RESULT_READ_SUCCESS: &str = "contenuto";
const RESULT_FAILURE: &str = "no";

/// Drive an in-memory namespace with a line-oriented command stream.
///
/// Commands: create <path>, create_dir <path>, delete <path>,
/// delete_r <path>, read <path>, write <path> "<data>", find <name>,
/// exit. One response line per command.
#[derive(Parser)]
struct Opt {
    /// Script of commands to process; reads stdin when absent.
    script: Option<std::path::PathBuf>,

    /// Initial hash table size (grows on demand).
    #[arg(long)]
    table_size: Option<usize>,
}

/// Process the command stream until `exit` or end of input.
///
/// Each command's response is fully written and flushed before the next
/// line is read, so output order always matches input order.
fn run_session<R, W>(
    mut fs: Memfs,
    mut input: R,
    mut output: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            // End of input tears the namespace down like `exit`, minus
            // the explicit command.
            fs.shutdown();
            return Ok(());
        }

        match Command::parse(&line) {
            Ok(Command::CreateFile(path)) => {
                report_status(&mut output, fs.create_file(path))?;
            }
            Ok(Command::CreateDir(path)) => {
                report_status(&mut output, fs.create_dir(path))?;
            }
            Ok(Command::Delete(path)) => {
                report_status(&mut output, fs.remove(path))?;
            }
            Ok(Command::DeleteRecursive(path)) => {
                report_status(&mut output, fs.remove_all(path))?;
            }
            Ok(Command::Read(path)) => {
                match fs.read(path) {
                    Ok(data) => {
                        output.write_all(RESULT_READ_SUCCESS.as_bytes())?;
                        output.write_all(b" ")?;
                        output.write_all(data)?;
                        output.write_all(b"\n")?;
                    }
                    Err(_) => writeln!(output, "{RESULT_FAILURE}")?,
                }
                output.flush()?;
            }
            Ok(Command::Write { path, data }) => {
                match fs.write(path, data) {
                    Ok(len) => writeln!(output, "{RESULT_SUCCESS} {len}")?,
                    Err(_) => writeln!(output, "{RESULT_FAILURE}")?,
                }
                output.flush()?;
            }
            Ok(Command::Find(name)) => {
                let paths = fs.find(name);
                if paths.is_empty() {
                    writeln!(output, "{RESULT_FAILURE}")?;
                } else {
                    for path in paths {
                        output.write_all(RESULT_SUCCESS.as_bytes())?;
                        output.write_all(b" ")?;
                        output.write_all(path.as_bytes())?;
                        output.write_all(b"\n")?;
                    }
                }
                output.flush()?;
            }
            Ok(Command::Exit) => {
                fs.shutdown();
                return Ok(());
            }
            Err(CommandError::Empty) => {
                // Blank lines produce no response.
            }
            Err(_) => {
                writeln!(output, "{RESULT_FAILURE}")?;
                output.flush()?;
            }
        }
    }
}

fn report_status<W: Write>(
    output: &mut W,
    result: Result<(), FsError>,
) -> io::Result<()> {
    match result {
        Ok(()) => writeln!(output, "{RESULT_SUCCESS}")?,
        Err(_) => writeln!(output, "{RESULT_FAILURE}")?,
    }
    output.flush()
}

fn main() -> Result<(), Error> {
    let opt = Opt::parse();

    let fs = match opt.table_size {
        Some(size) => Memfs::with_table_size(size),
        None => Memfs::new(),
    };

    let stdout = io::stdout();
    match &opt.script {
        Some(script) => {
            let input = BufReader::new(File::open(script)?);
            run_session(fs, input, stdout.lock())?;
        }
        None => {
            run_session(fs, io::stdin().lock(), stdout.lock())?;
        }
    }

    Ok(())
}
