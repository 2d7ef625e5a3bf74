use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// A log line that could not be turned into a record.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    /// An environment variable held a value that is not understood.
    #[error("invalid value \"{value}\" for {key}")]
    Config { key: &'static str, value: String },
    /// The log directory had no record that could be plotted.
    #[error("no usable measurements in \"{}\"", .0.display())]
    NoMeasurements(PathBuf),
    #[error("failed to draw plot: {0}")]
    Plot(String),
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn messages_name_the_failing_input() {
        let err = Error::Parse {
            path: PathBuf::from("logs/eth-240p.csv"),
            line: 4,
            reason: "bad median".to_owned(),
        };
        assert_eq!(err.to_string(), "logs/eth-240p.csv:4: bad median");
        let err = Error::Config {
            key: "PLOT_MODE",
            value: "pie".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid value \"pie\" for PLOT_MODE");
        let err = Error::NoMeasurements(PathBuf::from("logs"));
        assert_eq!(err.to_string(), "no usable measurements in \"logs\"");
    }

    #[test]
    fn io_errors_convert_and_keep_their_source() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.source().map(|e| e.to_string()), Some("gone".to_owned()));
    }
}
