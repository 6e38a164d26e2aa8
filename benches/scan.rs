use std::hint::black_box;
use std::io::Cursor;
use std::path::PathBuf;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use interaction_filter::observability::{RunContext, TracingObserver};
use interaction_filter::pipeline::PipelineConfig;
use interaction_filter::run::filter_reader;

fn synthetic_npinter(rows: usize) -> String {
    let mut s = String::from("ncName\tncID\ttarName\ttarID\ttag\tclass\tlevel\n");
    for i in 0..rows {
        let class = if i % 10 == 0 { "binding" } else { "expression" };
        s.push_str(&format!(
            "nc{i}\tNONHSAG{i:06}\ttar{i}\tENSG{i:011}\tRNA-Protein\t{class}\tRNA-Protein\n"
        ));
    }
    s
}

fn bench_scan(c: &mut Criterion) {
    let config = PipelineConfig::npinter5();
    let input = synthetic_npinter(50_000);

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("npinter5_50k_rows", |b| {
        b.iter(|| {
            let ctx = RunContext {
                pipeline: config.name.clone(),
                input: PathBuf::from("bench"),
            };
            let (rs, _) =
                filter_reader(Cursor::new(input.as_bytes()), &config, ctx, &TracingObserver)
                    .unwrap();
            black_box(rs.len())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
