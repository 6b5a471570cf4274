// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use oifits::filter::{FilterSpec, VisIter};
use oifits::{Dataset, Header, Target, TargetTable, VisTable};

fn build_dataset(n_tables: usize, n_records: usize, nwave: usize) -> Dataset {
    let mut target = TargetTable::new(2);
    target.targets.push(Target::new_default(1));
    let mut ds = Dataset::new(Header::new_default(), target);
    for _ in 0..n_tables {
        let mut t = VisTable::new(2, "VLTI", "GRAVITY", nwave, n_records);
        for r in t.records.iter_mut() {
            r.target_id = 1;
        }
        ds.vis.push(t);
    }
    ds
}

fn bench_vis_iter(c: &mut Criterion) {
    let dataset = build_dataset(4, 256, 32);
    let spec = FilterSpec::default();

    c.bench_function("vis_iter_full_scan", |b| {
        b.iter(|| {
            let mut iter = VisIter::new(black_box(&dataset), black_box(&spec)).unwrap();
            let mut count = 0usize;
            while iter.advance().is_some() {
                count += 1;
            }
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_vis_iter);
criterion_main!(benches);
