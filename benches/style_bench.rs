use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;
use stylefx::animation::{FixedStepClock, FrameClock, Rotate, Translate, Width};
use stylefx::css::{get_computed_style_map, rgba, strip_vendor_prefix, ComputedStyleMap};
use stylefx::{query_sequence, Animator, CssStyleDeclaration, Document, EasingFunction, Stat, StatConfig};
use tokio::runtime::Runtime;

fn bench_color_conversion(c: &mut Criterion) {
    c.bench_function("rgba_conversion", |b| {
        b.iter(|| {
            for hex in ["#fff", "#1e90ff", "c0ffee", "#ABC"] {
                black_box(rgba(black_box(hex), 50).unwrap());
            }
        });
    });
}

fn bench_vendor_stripping(c: &mut Criterion) {
    let names = [
        "-webkit-transform",
        "-moz-box-sizing",
        "WebkitTransition",
        "msFlexAlign",
        "width",
    ];

    c.bench_function("strip_vendor_prefix", |b| {
        b.iter(|| {
            for name in names {
                black_box(strip_vendor_prefix(black_box(name)));
            }
        });
    });
}

fn bench_style_map(c: &mut Criterion) {
    let doc = Document::new();
    let element = doc.create_element("div");
    element.set_style(
        CssStyleDeclaration::parse(
            "width: 100px; height: 50px; -webkit-transform: rotate(10deg) scale(2, 2); \
             color: #fff !important; opacity: 0.5; -moz-box-sizing: border-box",
        )
        .unwrap(),
    );

    c.bench_function("computed_style_map", |b| {
        b.iter(|| black_box(get_computed_style_map(&doc, &element, "").unwrap()));
    });

    c.bench_function("add_more_transform", |b| {
        b.iter(|| {
            let mut map = ComputedStyleMap::new();
            map.add("transform", "none", false);
            for step in 0..20 {
                map.add_more("transform", &format!("rotate({}deg)", step), false);
                map.add_more("transform", &format!("translate({}px, 0px)", step), false);
            }
            black_box(map.get("transform").unwrap().css_value())
        });
    });
}

fn bench_easing(c: &mut Criterion) {
    let curves: Vec<EasingFunction> = ["ease", "ease-in-out-back", "steps(4, start)", "bounce"]
        .iter()
        .map(|name| EasingFunction::from_name(name).unwrap())
        .collect();

    c.bench_function("easing_apply", |b| {
        b.iter(|| {
            for curve in &curves {
                for i in 0..=100 {
                    black_box(curve.apply(i as f32 / 100.0));
                }
            }
        });
    });
}

fn bench_animation_run(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let doc = Document::new();
    for _ in 0..10 {
        doc.create_element("div").add_class("box");
    }

    let animator = Animator::with_clock(Arc::new(doc.clone()), || -> Box<dyn FrameClock> {
        Box::new(FixedStepClock::new(Duration::from_millis(16)))
    });

    c.bench_function("animate_ten_elements", |b| {
        b.iter(|| {
            rt.block_on(async {
                let stat = Stat::new(StatConfig {
                    duration: 500,
                    easing: "ease-out".to_string(),
                    ..Default::default()
                })
                .unwrap();
                let mut animation = query_sequence(
                    &doc,
                    ".box",
                    stat,
                    vec![
                        Box::new(Width::new(300.0)),
                        Box::new(Rotate { degrees: 180.0 }),
                        Box::new(Translate { x: 20.0, y: 10.0 }),
                    ],
                )
                .unwrap();
                black_box(animator.animate(&mut animation).await.unwrap());
            });
        });
    });
}

criterion_group!(
    benches,
    bench_color_conversion,
    bench_vendor_stripping,
    bench_style_map,
    bench_easing,
    bench_animation_run
);
criterion_main!(benches);
