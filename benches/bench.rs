use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uri_parts::encoding::{decode, encode, PCHAR};
use uri_parts::{punycode, resolve, Host, Path, Uri};

criterion_group!(
    benches,
    bench_enc,
    bench_dec,
    bench_parse,
    bench_parse_idn_host,
    bench_punycode_encode,
    bench_remove_dot_segments,
    bench_resolve,
);
criterion_main!(benches);

const ENC_CASE: &str = "te😃a 测1`~!@试#$%st^&+=";
const DEC_CASE: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

fn bench_enc(c: &mut Criterion) {
    c.bench_function("enc", |b| b.iter(|| encode(black_box(ENC_CASE), PCHAR)));
}

fn bench_dec(c: &mut Criterion) {
    c.bench_function("dec", |b| b.iter(|| decode(black_box(DEC_CASE))));
}

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_parse_idn_host(c: &mut Criterion) {
    c.bench_function("parse_idn_host", |b| {
        b.iter(|| Host::parse(black_box("стадион.президент.рф")))
    });
}

fn bench_punycode_encode(c: &mut Criterion) {
    c.bench_function("punycode_encode", |b| {
        b.iter(|| punycode::encode_label(black_box("스타벅스코리아")))
    });
}

fn bench_remove_dot_segments(c: &mut Criterion) {
    let path = Path::parse("/a/b/c/./../../g/h/i/../j").unwrap();
    c.bench_function("remove_dot_segments", |b| {
        b.iter(|| black_box(&path).remove_dot_segments())
    });
}

fn bench_resolve(c: &mut Criterion) {
    let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    let reference = Uri::parse("../../g/./h").unwrap();
    c.bench_function("resolve", |b| {
        b.iter(|| resolve(black_box(&base), black_box(&reference)))
    });
}
