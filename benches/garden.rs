use criterion::{black_box, criterion_group, criterion_main, Criterion};

use moodgarden::flower::{gpu, synthesize, Species};
use moodgarden::garden::{Garden, GardenConfig, GardenStyle, GardenTheme};
use moodgarden::generation::{generate, DailyRng, LayoutConfig, SimpleRng};

const DAY: &str = "2024-05-01";

fn bench_layouts(c: &mut Criterion) {
    let theme = GardenTheme::initial();
    let config = LayoutConfig::default();

    for style in GardenStyle::ALL {
        c.bench_function(&format!("layout_{}", style), |b| {
            b.iter(|| {
                let mut rng = DailyRng::for_day(DAY, style);
                generate(black_box(style), &theme, &config, &mut rng)
            });
        });
    }
}

fn bench_synthesize(c: &mut Criterion) {
    c.bench_function("synthesize_all_species", |b| {
        b.iter(|| {
            for species in Species::ALL {
                black_box(synthesize(species));
            }
        });
    });
}

fn garden(style: GardenStyle) -> Garden {
    let mut config = GardenConfig::default();
    config.settings.garden_style = style;
    Garden::new(config, DAY, SimpleRng::new(1))
}

fn bench_frame(c: &mut Criterion) {
    // Ordered is the densest layout (81 flowers)
    let garden = garden(GardenStyle::Ordered);
    let mut t = 0.0f32;

    c.bench_function("frame_ordered", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            garden.frame(black_box(t))
        });
    });
}

fn bench_flatten(c: &mut Criterion) {
    let garden = garden(GardenStyle::Ordered);
    let frame = garden.frame(1.0);
    let mut out = Vec::new();

    c.bench_function("flatten_ordered", |b| {
        b.iter(|| {
            out.clear();
            for flower in &frame.flowers {
                gpu::flatten(black_box(&flower.frame), &mut out);
            }
            out.len()
        });
    });
}

criterion_group!(benches, bench_layouts, bench_synthesize, bench_frame, bench_flatten);
criterion_main!(benches);
