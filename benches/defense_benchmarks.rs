use criterion::{Criterion, criterion_group, criterion_main};
use serde::Deserialize;
use std::hint::black_box;
use xss_defender::*;

const PLAIN: &str = "Just a regular comment without any markup at all.";
const BASIC_HTML: &str = "<p>Some <strong>bold</strong> and <em>italic</em> text with a \
                          <a href=\"https://example.com\">link</a>.</p>";
const ATTACK: &str = "<p>hello</p><script>alert(document.cookie)</script>\
                      <img src=x onerror=alert(1)><a href=\"javascript:alert(1)\">click</a>";

#[derive(Debug, Deserialize)]
struct BenchComment {
    #[allow(dead_code)]
    author: String,
    #[allow(dead_code)]
    text: String,
}

fn bench_defend(c: &mut Criterion) {
    let mut group = c.benchmark_group("defend");

    let inputs = [("plain", PLAIN), ("basic_html", BASIC_HTML), ("attack", ATTACK)];

    for strategy in DefenseStrategy::ALL {
        let config = DefenseConfig::new(strategy);

        for (name, input) in inputs {
            group.bench_function(format!("{}_{}", strategy, name), |b| {
                b.iter(|| {
                    let _ = defend(black_box(Some(input)), &config);
                })
            });
        }
    }

    let trim_escape = DefenseConfig::new(DefenseStrategy::Trim).with_escape_after_trim(true);
    group.bench_function("trim_escape_attack", |b| {
        b.iter(|| defend(black_box(Some(ATTACK)), &trim_escape).unwrap())
    });

    group.finish();
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("clean", |b| b.iter(|| clean(black_box(ATTACK))));
    group.bench_function("escape", |b| b.iter(|| escape(black_box(ATTACK))));
    group.bench_function("is_clean", |b| b.iter(|| is_clean(black_box(BASIC_HTML))));
    group.bench_function("detect_attack_type", |b| {
        b.iter(|| XssValidator::detect_attack_type(black_box(ATTACK)))
    });

    group.finish();
}

fn bench_request_bodies(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_bodies");

    let scope = DefenseScope::enabled(XssDefender::new(DefenseConfig::new(DefenseStrategy::Trim)));
    let json = format!(r#"{{"author":"ann","text":"{}"}}"#, ATTACK.replace('"', "\\\""));
    let form = b"author=ann&text=%3Cb%3Ehi%3C%2Fb%3E%3Cscript%3Ex%3C%2Fscript%3E";

    group.bench_function("parse_json", |b| {
        b.iter(|| scope.parse_json::<BenchComment>(black_box(json.as_bytes())).unwrap())
    });
    group.bench_function("parse_form", |b| {
        b.iter(|| scope.parse_form::<BenchComment>(black_box(form)).unwrap())
    });

    group.finish();
}

criterion_group!(defense_benches, bench_defend, bench_primitives, bench_request_bodies);

criterion_main!(defense_benches);
