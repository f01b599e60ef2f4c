#[macro_use]
extern crate criterion;

use criterion::Criterion;
use escapetime::{EscapeTimeEngine, Viewport};

fn standard_view(c: &mut Criterion) {
    let vp = Viewport::new(-2.0, 1.0, -1.5, 1.5, 200, 200, 100).unwrap();
    c.bench_function("standard view 200x200", move |b| {
        b.iter(|| EscapeTimeEngine::new().compute(&vp).unwrap())
    });
}

fn threaded_zoom(c: &mut Criterion) {
    let vp = Viewport::from_center((-0.743, 0.131), 50.0, 200, 200, 500).unwrap();
    let threads = num_cpus::get();
    c.bench_function("seahorse valley 200x200, all cores", move |b| {
        b.iter(|| EscapeTimeEngine::with_threads(threads).compute(&vp).unwrap())
    });
}

criterion_group!(benches, standard_view, threaded_zoom);
criterion_main!(benches);
