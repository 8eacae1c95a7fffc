use std::{fs, hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};
use csvcore::{parse_reader, Config, PerRowError, RowInfo, Value};
use memchr::memchr_iter;

fn prepare(rows: usize) -> Vec<u8> {
    let data = fs::read(std::env::var("INPUT").unwrap()).unwrap();
    let mut lf_iter = memchr_iter(b'\n', &data);
    let second_lf = lf_iter.nth(1).unwrap();
    let ending_lf = lf_iter.nth(rows).unwrap();
    data[(second_lf + 1)..ending_lf].to_vec()
}

pub fn csvcore_streaming(b: &mut Bencher, slice: &[u8]) {
    b.iter(|| {
        let mut sink = |cells: &[Value<'_>], _: RowInfo| -> Result<(), PerRowError> {
            for cell in cells {
                black_box(cell.as_bytes());
            }
            Ok(())
        };
        parse_reader(Cursor::new(slice), Config::default(), &mut sink).unwrap();
    })
}

pub fn csvcore_unquote_disabled(b: &mut Bencher, slice: &[u8]) {
    b.iter(|| {
        let mut sink = |cells: &[Value<'_>], _: RowInfo| -> Result<(), PerRowError> {
            for cell in cells {
                black_box(cell.as_bytes());
            }
            Ok(())
        };
        let config = Config::builder().unquote_values(false).build();
        parse_reader(Cursor::new(slice), config, &mut sink).unwrap();
    })
}

pub fn csv(b: &mut Bencher, slice: &[u8]) {
    b.iter(|| {
        let cursor = Cursor::new(slice);
        for row in csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(cursor)
            .into_records()
        {
            for cell in row.unwrap().into_iter() {
                black_box(cell);
            }
        }
    })
}

fn bench_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parsers");
    for i in [1_000, 10_000, 50_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("csvcore", i), &i, |b, i| {
            csvcore_streaming(b, &prepare(*i))
        });
        group.bench_with_input(BenchmarkId::new("csvcore (raw)", i), &i, |b, i| {
            csvcore_unquote_disabled(b, &prepare(*i))
        });
        group.bench_with_input(BenchmarkId::new("csv", i), &i, |b, i| csv(b, &prepare(*i)));
    }
    group.finish();
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
