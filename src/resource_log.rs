use crate::metric::ResourceSample;
use log::debug;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("resource log {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("error opening resource log: {0}")]
    FileError(#[from] io::Error),
    #[error("{0}")]
    RowParseError(#[from] csv::Error),
}

pub struct ResourceLogDecoder<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ResourceLogDecoder<R> {
    pub fn new(readable: R) -> Self {
        Self {
            reader: csv::ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_reader(readable),
        }
    }

    // Decodes every row after the header. The first row that isn't
    // (integer, float, float) fails the whole log.
    pub fn decode_samples(&mut self) -> Result<Vec<ResourceSample>, csv::Error> {
        let mut samples = Vec::new();
        for record in self.reader.records() {
            let record = record?;
            // Headers are ignored, fields are matched by position.
            samples.push(record.deserialize::<ResourceSample>(None)?);
        }
        Ok(samples)
    }
}

pub fn open(path: &Path) -> Result<Vec<ResourceSample>, Error> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let samples = ResourceLogDecoder::new(file).decode_samples()?;
    debug!("loaded {} resource samples from {}", samples.len(), path.display());
    Ok(samples)
}

#[cfg(test)]
pub mod tests {
    use std::{fs, io};

    use crate::metric::ResourceSample;

    use super::{open, Error, ResourceLogDecoder};

    #[test]
    fn test_decode() {
        let log = "time,cpu,ram\n0,12.5,2048\n1, 40.0 ,2050.25\n";
        let mut decoder = ResourceLogDecoder::new(log.as_bytes());
        let samples = decoder.decode_samples().unwrap();
        assert_eq!(
            samples,
            vec![
                ResourceSample {
                    elapsed_secs: 0,
                    cpu_percent: 12.5,
                    ram_mb: 2048.0,
                },
                ResourceSample {
                    elapsed_secs: 1,
                    cpu_percent: 40.0,
                    ram_mb: 2050.25,
                },
            ]
        );
    }

    #[test]
    fn test_decode_keeps_file_order() {
        let log = "t,c,r\n5,1,1\n2,2,2\n2,3,3\n";
        let mut decoder = ResourceLogDecoder::new(log.as_bytes());
        let seconds: Vec<u64> = decoder
            .decode_samples()
            .unwrap()
            .iter()
            .map(|s| s.elapsed_secs)
            .collect();
        assert_eq!(seconds, vec![5, 2, 2]);
    }

    #[test]
    fn test_decode_header_only() {
        let mut decoder = ResourceLogDecoder::new("time,cpu,ram\n".as_bytes());
        assert!(decoder.decode_samples().unwrap().is_empty());
    }

    #[test]
    fn test_decode_non_numeric_cpu() {
        let log = "time,cpu,ram\n0,10.0,100\n1,busy,100\n";
        let mut decoder = ResourceLogDecoder::new(log.as_bytes());
        let err = decoder.decode_samples().unwrap_err();
        assert!(err.to_string().contains("field 1"), "{}", err);
    }

    #[test]
    fn test_decode_fractional_seconds() {
        let log = "time,cpu,ram\n0.5,10.0,100\n";
        let mut decoder = ResourceLogDecoder::new(log.as_bytes());
        assert!(decoder.decode_samples().is_err());
    }

    #[test]
    fn test_decode_missing_field() {
        let log = "time,cpu,ram\n0,10.0\n";
        let mut decoder = ResourceLogDecoder::new(log.as_bytes());
        assert!(decoder.decode_samples().is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resource_log.csv");
        match open(&path) {
            Err(Error::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_file_error_keeps_cause() {
        let err = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        assert_eq!(err.to_string(), "error opening resource log: permission denied");
    }

    #[test]
    fn test_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resource_log.csv");
        fs::write(&path, "time,cpu,ram\n0,1.0,2.0\n").unwrap();
        assert_eq!(open(&path).unwrap().len(), 1);
    }
}
