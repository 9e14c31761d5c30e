use bitmapper::frame::animated_output_names;
use bitmapper::template::render_template;
use bitmapper::{AnimatedCursor, Config, RenderPlan};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_template(c: &mut Criterion) {
    let markup = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="256" height="256">{}</svg>"#,
        r#"<path d="M0 0L10 10L20 0Z"/>"#.repeat(200)
    );
    c.bench_function("render_template_200_paths", |b| {
        b.iter(|| render_template(black_box(&markup)))
    });
}

fn bench_naming(c: &mut Criterion) {
    c.bench_function("animated_output_names_120", |b| {
        b.iter(|| animated_output_names(black_box("progress.svg"), black_box(120)))
    });
}

fn bench_plan(c: &mut Criterion) {
    let mut config = Config::default();
    config.static_cursors = (0..40).map(|i| format!("static_{}.svg", i)).collect();
    for i in 0..10 {
        config
            .animated_cursors
            .insert(format!("anim_{}.svg", i), AnimatedCursor { frames: 60 });
    }
    c.bench_function("plan_40_static_10_animated", |b| {
        b.iter(|| RenderPlan::from_config(black_box(&config)).unwrap())
    });
}

criterion_group!(benches, bench_template, bench_naming, bench_plan);
criterion_main!(benches);
