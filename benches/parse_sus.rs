//! Benchmark for `SUS` file parsing.

use criterion::{Criterion, Throughput};
use sus_rs::parse_sus;

struct SusFile {
    name: String,
    source: String,
}

fn scan_sus_files() -> Vec<SusFile> {
    let dir = "tests/files";

    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "sus"))
        .filter_map(|path| {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)?;

            let source = std::fs::read_to_string(&path).expect("Failed to load test file");

            Some(SusFile { name, source })
        })
        .collect()
}

/// Repeats the lane events of a chart over many measures, to measure a chart of real length.
fn long_chart() -> SusFile {
    let mut source = String::from("#BPM01:150\n#BPM02:180\n#00008:01\n#06408:02\n");
    for measure in 0..512 {
        source.push_str(&format!("#{measure:03}10:1200130014001500\n"));
        source.push_str(&format!("#{measure:03}315:1300000023000000\n"));
    }
    SusFile {
        name: "long_chart".to_string(),
        source,
    }
}

fn bench_parse_sus(c: &mut Criterion) {
    let mut files = scan_sus_files();
    files.push(long_chart());
    let mut group = c.benchmark_group("parse_sus");

    for file in &files {
        group.throughput(Throughput::Bytes(file.source.len() as u64));
        group.bench_function(&file.name, |b| {
            b.iter(|| parse_sus(std::hint::black_box(&file.source)));
        });
    }

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default();
    bench_parse_sus(&mut criterion);
}
