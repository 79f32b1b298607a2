/// Output sinks for generated events
///
/// `CsvSink` renders one comma-separated record per event, no header. The
/// file handle lives inside the sink and is released when the sink drops,
/// whichever way the run ends; `finish` flushes so buffered write errors
/// surface instead of being lost in `Drop`.

use crate::config::GeneratorConfig;
use crate::event::Event;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Anything that accepts the ordered event stream
pub trait EventSink {
    fn emit(&mut self, event: &Event) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &Event) -> io::Result<()> {
        (**self).emit(event)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// Collects events in memory
impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) -> io::Result<()> {
        self.push(*event);
        Ok(())
    }
}

pub struct CsvSink<W: Write> {
    out: W,
    records: u64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        CsvSink { out, records: 0 }
    }

    pub fn records_written(&self) -> u64 {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CsvSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(CsvSink::new(BufWriter::new(File::create(path)?)))
    }
}

impl CsvSink<Box<dyn Write>> {
    /// Open the configured output: a file, or stdout when it is "-"
    pub fn for_config(config: &GeneratorConfig) -> io::Result<Self> {
        let out: Box<dyn Write> = if config.writes_to_stdout() {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            Box::new(BufWriter::new(File::create(&config.output)?))
        };
        Ok(CsvSink::new(out))
    }
}

impl<W: Write> EventSink for CsvSink<W> {
    fn emit(&mut self, event: &Event) -> io::Result<()> {
        writeln!(self.out, "{}", event)?;
        self.records += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Side;

    #[test]
    fn test_csv_lines() {
        let mut sink = CsvSink::new(Vec::new());
        sink.emit(&Event::Add {
            side: Side::Buy,
            order_id: 1,
            price: 9_998,
            quantity: 12,
        })
        .unwrap();
        sink.emit(&Event::Cancel { order_id: 1 }).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.records_written(), 2);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "A,B,1,9998,12\nC,B,1,0,0\n");
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut events: Vec<Event> = Vec::new();
        for id in 1..=3 {
            events.emit(&Event::Cancel { order_id: id }).unwrap();
        }
        let ids: Vec<u64> = events.iter().map(|e| e.order_id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_surfaces() {
        let mut sink = CsvSink::new(FailingWriter);
        let err = sink.emit(&Event::Cancel { order_id: 1 }).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(sink.records_written(), 0);
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        assert!(CsvSink::create("/nonexistent/dir/out.csv").is_err());
    }

    #[test]
    fn test_for_config_writes_configured_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = GeneratorConfig {
            output: dir.path().join("out.csv"),
            ..GeneratorConfig::default()
        };
        assert!(!config.writes_to_stdout());

        let mut sink = CsvSink::for_config(&config).unwrap();
        sink.emit(&Event::Cancel { order_id: 9 }).unwrap();
        sink.finish().unwrap();
        drop(sink);

        let text = std::fs::read_to_string(&config.output).unwrap();
        assert_eq!(text, "C,B,9,0,0\n");
    }

    #[test]
    fn test_for_config_missing_directory_fails() {
        let config = GeneratorConfig {
            output: "/nonexistent/dir/out.csv".into(),
            ..GeneratorConfig::default()
        };
        assert!(CsvSink::for_config(&config).is_err());
    }
}
