use divan::{black_box, Bencher};
use textdiffer::{DiffKind, Differ};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const KINDS: [DiffKind; 3] = [DiffKind::Line, DiffKind::Word, DiffKind::Char];

pub(crate) fn load_fixture(name: &str) -> String {
    let path = format!("fixtures/code/{}", name);
    std::fs::read_to_string(path).unwrap()
}

/// A document of roughly `lines` lines, and a copy with its second half
/// reversed line by line.
fn reversed_half(lines: usize) -> (String, String) {
    let original: String = (0..lines)
        .map(|i| format!("    let value_{i} = compute({i}, \"text\");\n"))
        .collect();
    let split: Vec<&str> = original.split_inclusive('\n').collect();
    let (first, second) = split.split_at(split.len() / 2);
    let modified = first.iter().chain(second.iter().rev()).copied().collect();
    (original, modified)
}

#[divan::bench(args = KINDS)]
fn fixture_pair(bencher: Bencher, kind: DiffKind) {
    let original = load_fixture("complex_before.rs");
    let modified = load_fixture("complex_after.rs");

    bencher
        .with_inputs(|| (original.clone(), modified.clone()))
        .bench_refs(|(original, modified)| {
            let differ = Differ::new(black_box(original), black_box(modified))
                .kind(kind)
                .verify(false);
            black_box(differ.get_minimal_changes().unwrap())
        });
}

#[divan::bench(args = [1_000, 10_000])]
fn line_reversed_half(bencher: Bencher, lines: usize) {
    let (original, modified) = reversed_half(lines);

    bencher.bench(|| {
        let differ = Differ::new(black_box(&original), black_box(&modified))
            .kind(DiffKind::Line)
            .verify(false);
        black_box(differ.get_minimal_changes().unwrap())
    });
}

#[divan::bench(args = [16 * 1024, 1024])]
fn char_single_keystroke(bencher: Bencher, window: usize) {
    let original = load_fixture("complex_before.rs").repeat(100);
    let mut modified = original.clone();
    modified.insert(original.len() / 2, 'x');

    bencher.bench(|| {
        let differ = Differ::new(black_box(&original), black_box(&modified))
            .kind(DiffKind::Char)
            .window_size(window)
            .verify(false);
        black_box(differ.get_minimal_changes().unwrap())
    });
}
