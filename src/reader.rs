//! Loading of prevalence data files and wild-type sequence files.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::record::RawRecord;
use crate::WildType;

/// The extension of a gzipped file.
const GZIP_EXTENSION: &str = "gz";

/// An error related to reading input files.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),
    /// The prevalence data was not a JSON array of rows.
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Opens a file for buffered reading, transparently decompressing it if its
/// name ends in `.gz`.
pub fn open(path: impl AsRef<Path>) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let gzipped = path
        .extension()
        .map(|extension| extension == GZIP_EXTENSION)
        .unwrap_or(false);

    if gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads a JSON array of raw prevalence rows.
///
/// # Examples
///
/// ```
/// let data = br#"[{"gene": "CA", "position": 1, "aa": "P", "percent": 0.9}]"#;
/// let rows = prevalence::reader::read_records(&data[..])?;
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].aa.as_deref(), Some("P"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, Error> {
    serde_json::from_reader(reader).map_err(Error::Json)
}

/// Reads a wild-type sequence.
pub fn read_wild_type<R: Read>(mut reader: R) -> Result<WildType, Error> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).map_err(Error::Io)?;

    // SAFETY: parsing a wild-type sequence is infallible.
    Ok(buffer.parse::<WildType>().unwrap())
}
