//! Text loader for flow-shop instances with due dates.
//!
//! The format is whitespace separated:
//!
//! ```text
//! N M
//! <for each job, M pairs>   machine_index processing_time
//! Reldue
//! <for each job>            -1 due_date -1 priority
//! ```
//!
//! Machine indices are informational and ignored; the pairs are read in
//! machine order. Any malformed token is rejected here so the search code
//! can assume well-formed data.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use super::model::Instance;
use crate::error::{PfspError, Result};

/// Upper bound on buffer pre-allocation taken from the header; larger
/// instances grow as tokens are actually read.
const PREALLOCATION_LIMIT: usize = 4096;

/// Sequential token reader with descriptive parse errors.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            consumed: 0,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        let token = self.inner.next().ok_or_else(|| {
            PfspError::Parse(format!(
                "unexpected end of input after {} tokens while reading {what}",
                self.consumed
            ))
        })?;
        self.consumed += 1;
        Ok(token)
    }

    fn next_parsed<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| {
            PfspError::Parse(format!(
                "could not parse '{token}' as {what} (token {})",
                self.consumed
            ))
        })
    }
}

impl FromStr for Instance {
    type Err = PfspError;

    fn from_str(text: &str) -> Result<Self> {
        let mut tokens = Tokens::new(text);

        let jobs: usize = tokens.next_parsed("number of jobs")?;
        let machines: usize = tokens.next_parsed("number of machines")?;
        if jobs == 0 || machines == 0 {
            return Err(PfspError::InvalidInstance(format!(
                "dimensions must be positive, got {jobs} jobs and {machines} machines"
            )));
        }

        let mut processing_times = Vec::with_capacity(jobs.min(PREALLOCATION_LIMIT));
        for _ in 0..jobs {
            let mut row = Vec::with_capacity(machines.min(PREALLOCATION_LIMIT));
            for _ in 0..machines {
                let _machine: i64 = tokens.next_parsed("machine index")?;
                row.push(tokens.next_parsed::<i64>("processing time")?);
            }
            processing_times.push(row);
        }

        // section header, conventionally "Reldue"
        tokens.next_token("due date section header")?;

        let mut due_dates = Vec::with_capacity(jobs.min(PREALLOCATION_LIMIT));
        let mut priorities = Vec::with_capacity(jobs.min(PREALLOCATION_LIMIT));
        for _ in 0..jobs {
            let _: i64 = tokens.next_parsed("due date marker")?;
            due_dates.push(tokens.next_parsed::<i64>("due date")?);
            let _: i64 = tokens.next_parsed("priority marker")?;
            priorities.push(tokens.next_parsed::<i64>("priority")?);
        }

        Instance::new(processing_times, due_dates, priorities)
    }
}

impl Instance {
    /// Reads an instance from any byte stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// Reads an instance from a file; the file name becomes the instance name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let instance = Self::from_reader(BufReader::new(File::open(path)?))?;
        Ok(match path.file_name() {
            Some(name) => instance.with_name(name.to_string_lossy()),
            None => instance,
        })
    }
}
