use criterion::{criterion_group, criterion_main, Criterion};
use shapematch::lowlevel::{Kernel, ScanParams, SearchImage, TemplatePlan, ZnccBinaryScalar};
use shapematch::{
    match_cost, normalize_mask, BinaryMask, BoundingBox, Candidate, GreedyAssigner,
    NormalizeConfig, Point, QueryShape, RotationMode, TemplateSearchConfig, TemplateSearcher,
};
use std::hint::black_box;

fn ring(size: usize, thickness: f32) -> BinaryMask {
    let c = (size as f32 - 1.0) / 2.0;
    let r_out = size as f32 / 2.0 - 1.0;
    BinaryMask::from_fn(size, size, |x, y| {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
        d <= r_out && d >= r_out - thickness
    })
    .unwrap()
}

fn wedge(size: usize) -> BinaryMask {
    BinaryMask::from_fn(size, size, |x, y| x <= y && y - x < size / 3).unwrap()
}

fn bench_cost(c: &mut Criterion) {
    let cfg = NormalizeConfig::default();
    let a = normalize_mask(&ring(30, 4.0), cfg).unwrap();
    let b = normalize_mask(&wedge(30), cfg).unwrap();
    c.bench_function("match_cost_rotation_on", |bench| {
        bench.iter(|| black_box(match_cost(a.mask(), b.mask(), RotationMode::Enabled).unwrap()));
    });
}

fn bench_greedy(c: &mut Criterion) {
    let cfg = NormalizeConfig::default();
    let candidates: Vec<Candidate> = (0..12)
        .map(|i| {
            let mask = if i % 2 == 0 { ring(24 + i, 4.0) } else { wedge(24 + i) };
            let bbox = BoundingBox {
                x: 30 * i,
                y: 0,
                width: mask.width(),
                height: mask.height(),
            };
            Candidate::from_mask(Point::new(30 * i, 0), bbox, &mask, cfg).unwrap()
        })
        .collect();
    let queries: Vec<QueryShape> = [ring(20, 3.0), wedge(20), ring(18, 3.0)]
        .into_iter()
        .map(|m| QueryShape::new(m, cfg).unwrap())
        .collect();
    c.bench_function("greedy_3x12", |bench| {
        bench.iter(|| {
            black_box(
                GreedyAssigner::new(&candidates, Point::default())
                    .assign_all(&queries)
                    .unwrap(),
            )
        });
    });
}

fn bench_template(c: &mut Criterion) {
    let mut region = BinaryMask::zeros(288, 136).unwrap();
    region.paste(&ring(40, 6.0), 60, 40);
    region.paste(&wedge(36), 180, 70);

    let tpl = wedge(36).crop_to_foreground().unwrap();
    let plan = TemplatePlan::from_mask(&tpl).unwrap();
    let search = SearchImage::new(region.view());
    c.bench_function("zncc_binary_scan", |bench| {
        bench.iter(|| {
            black_box(ZnccBinaryScalar::scan_best(&search, &plan, ScanParams::default()).unwrap())
        });
    });

    let searcher = TemplateSearcher::new(region.view(), TemplateSearchConfig::default()).unwrap();
    let query = wedge(18);
    let mut group = c.benchmark_group("template_search");
    group.sample_size(10);
    group.bench_function("default_grid", |bench| {
        bench.iter(|| black_box(searcher.locate(&query).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_cost, bench_greedy, bench_template);
criterion_main!(benches);
