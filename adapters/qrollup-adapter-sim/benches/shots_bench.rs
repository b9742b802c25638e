//! Benchmarks for multi-shot simulation.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qrollup_adapter_sim::SimulatorBackend;
use qrollup_hal::Backend;
use qrollup_ir::Circuit;

fn bench_ghz_shots(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let backend = SimulatorBackend::with_seed(0);

    let mut group = c.benchmark_group("ghz_1024_shots");
    for n in [3u32, 5, 8] {
        let circuit = Circuit::ghz(n).expect("ghz");
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            b.iter(|| {
                runtime.block_on(async {
                    let job = backend.submit(black_box(circuit), 1024).await.unwrap();
                    backend.result(&job).await.unwrap()
                })
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ghz_shots);
criterion_main!(benches);
