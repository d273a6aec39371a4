// SPDX-License-Identifier: Apache-2.0
// Copyright 2024 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use srd::{Route, Sheet, SrdDocument, Workbook};

const ROUTE: [&str; 8] = [
    "EGLL", "SID1", "350", "370", "DCT BPK Q295 BRAIN", "STAR1", "EGKK", "Notes: 123-456-7",
];

fn bench_row(c: &mut Criterion) {
    let row: Vec<String> = ROUTE.map(String::from).to_vec();

    c.bench_function("route row", |b| {
        b.iter(|| Route::try_from(black_box(row.as_slice())))
    });
}

/// Benchmark reading a workbook of 10000 routes and 1000 notes
fn bench_document(c: &mut Criterion) {
    let routes = std::iter::once(vec!["ADEP"]).chain((0..10_000).map(|_| ROUTE.to_vec()));
    let notes = (0..1_000).flat_map(|i| {
        [
            vec![format!("Note {i}")],
            vec!["Not available H24.".to_string()],
            vec!["Only for jets.".to_string()],
            vec![String::new()],
        ]
    });

    let workbook = Workbook::new()
        .with_sheet(Sheet::Routes, routes)
        .with_sheet(Sheet::Notes, notes);
    let document = SrdDocument::new(workbook).expect("sheets should exist");

    let mut group = c.benchmark_group("SRD");
    group.throughput(Throughput::Elements(11_000));

    group.bench_function("parse", |b| b.iter(|| black_box(document.parse())));

    group.finish();
}

criterion_group!(benches, bench_row, bench_document);
criterion_main!(benches);
