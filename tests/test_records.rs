/// Record file tests: write a run to disk and read it back

use market_data_gen::{
    generate, CsvSink, Event, EventGenerator, GeneratorConfig, GeneratorError, RecordReader,
};
use std::fs::File;
use std::io::BufReader;
use tempfile::TempDir;

fn config(output: std::path::PathBuf, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        preseed_count: 500,
        total_events: 5_000,
        output,
        seed: Some(seed),
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_file_has_five_fields_per_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("flow.csv");
    let stats = generate(config(path.clone(), 42)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len() as u64, stats.total_events());
    assert_eq!(lines.len(), 5_500);
    assert!(text.ends_with('\n'));

    for line in &lines {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5, "line {line:?}");
        match fields[0] {
            "A" => {
                assert!(fields[1] == "B" || fields[1] == "S");
                let qty: u32 = fields[4].parse().unwrap();
                assert!((1..=100).contains(&qty));
            }
            "C" => {
                assert_eq!(fields[1], "B");
                assert_eq!(fields[3], "0");
                assert_eq!(fields[4], "0");
            }
            other => panic!("unexpected action {other}"),
        }
    }

    // No header row: the first line is the first pre-seed add
    assert!(lines[0].starts_with("A,"));
    assert_eq!(lines[0].split(',').nth(2), Some("1"));
}

#[test]
fn test_read_back_matches_generated() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("flow.csv");
    generate(config(path.clone(), 7)).unwrap();

    let mut in_memory = Vec::new();
    EventGenerator::from_config(config(path.clone(), 7))
        .unwrap()
        .run(&mut in_memory)
        .unwrap();

    let reader = BufReader::new(File::open(&path).unwrap());
    let from_file = RecordReader::read_all(reader).unwrap();
    assert_eq!(from_file, in_memory);
}

#[test]
fn test_csv_sink_counts_records() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("counted.csv");

    let mut sink = CsvSink::create(&path).unwrap();
    let mut generator = EventGenerator::from_config(config(path.clone(), 3)).unwrap();
    let stats = generator.run(&mut sink).unwrap();
    assert_eq!(sink.records_written(), stats.total_events());
    drop(sink);

    let reader = BufReader::new(File::open(&path).unwrap());
    let mut cancels = 0u64;
    let count = RecordReader::parse_stream(reader, |event| {
        if let Event::Cancel { .. } = event {
            cancels += 1;
        }
        true
    })
    .unwrap();
    assert_eq!(count as u64, stats.total_events());
    assert_eq!(cancels, stats.cancels());
}

#[test]
fn test_unwritable_output_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing").join("flow.csv");
    let result = generate(config(path, 1));
    assert!(matches!(result, Err(GeneratorError::Io(_))));
}

#[test]
fn test_config_file_drives_run() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("from_config.csv");
    let cfg_path = tmp.path().join("generator.json");
    let json = format!(
        r#"{{ "preseed_count": 10, "total_events": 20, "add_ratio": 1.0, "seed": 5, "output": {:?} }}"#,
        out.display().to_string()
    );
    std::fs::write(&cfg_path, json).unwrap();

    let cfg = GeneratorConfig::from_file(&cfg_path).unwrap();
    assert_eq!(cfg.output, out);
    let stats = generate(cfg).unwrap();
    assert_eq!(stats.total_adds(), 30);
    assert_eq!(stats.cancels(), 0);

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 30);
}
