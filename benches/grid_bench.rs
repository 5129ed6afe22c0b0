use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use planar_mesh::structured::curves::SineBump;
use planar_mesh::structured::{GridConfig, generate_grid};

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured_grid");
    group.sample_size(20);

    let south = SineBump::reference_south();
    let north = SineBump::reference_north();
    for &(i_max, j_max) in &[(26usize, 6usize), (51, 11)] {
        let config = GridConfig {
            max_iterations: 200,
            ..GridConfig::reference(i_max, j_max)
        };
        group.bench_with_input(
            BenchmarkId::new("sweeps_200", format!("{i_max}x{j_max}")),
            &config,
            |b, config| {
                b.iter(|| {
                    let grid = generate_grid(config, &south, &north).unwrap();
                    black_box(grid);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
