//! Benchmarks for the hot matching path.
//!
//! Measures `matches_tag` across name-only, attribute conjunction,
//! multi-valued class, and regex workloads, in hit and miss variants.

use regex::Regex;
use strainer::{Element, Strainer, ValueFilter};

fn main() {
    divan::main();
}

fn link_tag() -> Element {
    Element::new("a")
        .with_attr("class", ["sister", "external"])
        .with_attr("href", "http://example.com/elsie")
        .with_attr("id", "link1")
}

#[divan::bench]
fn name_only_hit(bencher: divan::Bencher) {
    let strainer: Strainer<Element> = Strainer::builder().name("a").build().unwrap();
    let tag = link_tag();
    bencher.bench_local(|| strainer.matches_tag(divan::black_box(&tag)));
}

#[divan::bench]
fn name_only_miss(bencher: divan::Bencher) {
    let strainer: Strainer<Element> = Strainer::builder().name("table").build().unwrap();
    let tag = link_tag();
    bencher.bench_local(|| strainer.matches_tag(divan::black_box(&tag)));
}

#[divan::bench]
fn attribute_conjunction_hit(bencher: divan::Bencher) {
    let strainer: Strainer<Element> = Strainer::builder()
        .name("a")
        .attr("id", "link1")
        .attr("href", Regex::new("example").unwrap())
        .build()
        .unwrap();
    let tag = link_tag();
    bencher.bench_local(|| strainer.matches_tag(divan::black_box(&tag)));
}

#[divan::bench]
fn multi_valued_class_joined(bencher: divan::Bencher) {
    // Forces the element-wise pass to fail and the joined retry to run.
    let strainer: Strainer<Element> = Strainer::builder()
        .attrs("sister external")
        .build()
        .unwrap();
    let tag = link_tag();
    bencher.bench_local(|| strainer.matches_tag(divan::black_box(&tag)));
}

#[divan::bench]
fn regex_name_rules(bencher: divan::Bencher) {
    let strainer: Strainer<Element> = Strainer::builder()
        .name(vec![
            Regex::new("^h[1-6]$").unwrap(),
            Regex::new("^[ab]$").unwrap(),
        ])
        .build()
        .unwrap();
    let tag = link_tag();
    bencher.bench_local(|| strainer.matches_tag(divan::black_box(&tag)));
}

#[divan::bench]
fn string_clause(bencher: divan::Bencher) {
    let strainer: Strainer<Element> = Strainer::builder()
        .name("a")
        .string(ValueFilter::func(|s| s.len() < 10))
        .build()
        .unwrap();
    let tag = link_tag().with_text("Elsie");
    bencher.bench_local(|| strainer.matches_tag(divan::black_box(&tag)));
}
