use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use smupdate::keyvalues::{self, KeyValues};
use smupdate::manifest::{ManifestBuilder, Root};
use smupdate::walker::{TreeWalker, WalkOrder};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// Build a SourceMod-like tree with `plugins` compiled plugins, their
/// sources and a config file each.
fn create_test_tree(plugins: usize) -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();

    for sub in ["plugins", "scripting/include", "configs", "translations"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }

    for i in 0..plugins {
        fs::write(root.join(format!("plugins/plugin_{i}.smx")), b"smx").unwrap();
        fs::write(root.join(format!("scripting/plugin_{i}.sp")), b"sp").unwrap();
        fs::write(
            root.join(format!("scripting/include/plugin_{i}.inc")),
            b"inc",
        )
        .unwrap();
        fs::write(root.join(format!("configs/plugin_{i}.cfg")), b"cfg").unwrap();
    }

    dir
}

fn count_files(root: &Path, order: WalkOrder) -> usize {
    TreeWalker::new(root)
        .order(order)
        .files()
        .unwrap()
        .filter_map(Result::ok)
        .count()
}

fn benchmark_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for size in [10, 100, 1000] {
        let tree = create_test_tree(size);
        for order in [WalkOrder::TopDown, WalkOrder::BottomUp] {
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), size),
                tree.path(),
                |b, root| b.iter(|| count_files(black_box(root), order)),
            );
        }
    }

    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_manifest");

    for size in [10, 100, 1000] {
        let tree = create_test_tree(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), tree.path(), |b, root| {
            b.iter(|| {
                let doc = ManifestBuilder::new("1.0.0")
                    .note("bench")
                    .root(Root::sourcemod(root))
                    .build()
                    .unwrap();
                black_box(doc.render())
            });
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let mut files = KeyValues::new();
    for i in 0..5000 {
        files.append("Plugin", format!("Path_SM/plugins/plugin_{i}.smx"));
        files.append("Source", format!("Path_SM/scripting/plugin_{i}.sp"));
    }
    let mut updater = KeyValues::new();
    updater.append_section("Files", files);

    c.bench_function("render_10k_entries", |b| {
        b.iter(|| keyvalues::to_string(black_box(&updater)));
    });
}

criterion_group!(benches, benchmark_walk, benchmark_build, benchmark_render);
criterion_main!(benches);
