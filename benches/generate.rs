/// Event generation throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use market_data_gen::{CsvSink, Event, EventGenerator, GeneratorConfig};
use std::io;

fn config(total: u64) -> GeneratorConfig {
    GeneratorConfig {
        preseed_count: 50_000,
        total_events: total,
        seed: Some(42),
        progress_steps: 0,
        ..GeneratorConfig::default()
    }
}

fn bench_generate_in_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_in_memory");

    for total in [10_000u64, 100_000].iter() {
        group.throughput(Throughput::Elements(50_000 + total));
        group.bench_with_input(BenchmarkId::from_parameter(total), total, |b, &total| {
            b.iter(|| {
                let mut generator = EventGenerator::from_config(config(total)).unwrap();
                let mut events: Vec<Event> = Vec::with_capacity((50_000 + total) as usize);
                black_box(generator.run(&mut events).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_generate_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_csv");
    group.throughput(Throughput::Elements(150_000));

    group.bench_function("sink", |b| {
        b.iter(|| {
            let mut generator = EventGenerator::from_config(config(100_000)).unwrap();
            let mut sink = CsvSink::new(io::sink());
            black_box(generator.run(&mut sink).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_generate_in_memory, bench_generate_csv);
criterion_main!(benches);
