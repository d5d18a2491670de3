// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

/// Line by line reader that keeps track of line numbers for error context
#[derive(Debug)]
pub(crate) struct Lines<R> {
    inner: std::io::Lines<R>,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            number: 0,
        }
    }

    /// 1-based number of the last line read
    pub fn number(&self) -> usize {
        self.number
    }

    /// Next line, or `None` at the end of the file
    pub fn next_line(&mut self) -> Result<Option<String>> {
        match self.inner.next() {
            Some(line) => {
                self.number += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    /// Next line, which must exist as record `found` of `expected`
    pub fn required(&mut self, what: &'static str, expected: usize, found: usize) -> Result<String> {
        self.next_line()?.ok_or(Error::MissingRecords {
            what,
            expected,
            found,
        })
    }
}

/// Initialise a buffered reader from anything that can be turned into a path
pub(crate) fn init_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Initialise a buffered writer from anything that can be turned into a path
pub(crate) fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
