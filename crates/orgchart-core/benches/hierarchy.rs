use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use orgchart_core::hierarchy::{MemberIndex, build_hierarchy_tree, get_subordinate_ids};
use orgchart_core::model::{Member, MemberId};

const SIZES: [u64; 3] = [100, 1_000, 10_000];

/// Every member reports to `(id - 1) / span`, giving a complete `span`-ary
/// tree rooted at 0.
fn wide(n: u64, span: u64) -> Vec<Member> {
    (0..n)
        .map(|id| {
            let m = Member::new(id, id + 1_000_000);
            if id == 0 { m } else { m.reporting_to((id - 1) / span) }
        })
        .collect()
}

/// A single reporting line 0 → 1 → … → n-1.
fn deep(n: u64) -> Vec<Member> {
    (0..n)
        .map(|id| {
            let m = Member::new(id, id + 1_000_000);
            if id == 0 { m } else { m.reporting_to(id - 1) }
        })
        .collect()
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    for n in SIZES {
        let wide = wide(n, 8);
        let deep = deep(n);
        group.throughput(Throughput::Elements(n));

        group.bench_with_input(BenchmarkId::new("build_tree.wide", n), &wide, |b, members| {
            b.iter(|| black_box(build_hierarchy_tree(members)));
        });
        group.bench_with_input(BenchmarkId::new("build_tree.deep", n), &deep, |b, members| {
            b.iter(|| black_box(build_hierarchy_tree(members)));
        });
        group.bench_with_input(BenchmarkId::new("subordinates.wide", n), &wide, |b, members| {
            b.iter(|| black_box(get_subordinate_ids(members, MemberId(0))));
        });
        group.bench_with_input(BenchmarkId::new("eligible.deep", n), &deep, |b, members| {
            let index = MemberIndex::new(members);
            b.iter(|| black_box(index.eligible_managers(MemberId(n / 2))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hierarchy);
criterion_main!(benches);
