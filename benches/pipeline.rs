use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use statcard::collect::commits::last_page;
use statcard::collect::contributions::parse_contribution_count;
use statcard::outcome::Outcome;
use statcard::render::{card, fallback};
use statcard::types::{ActivityStats, CommitTotals, MonthlyActivity, RepoCommits, Tally};

const LINK: &str = "<https://api.github.com/repositories/1/commits?author=alice&per_page=1&page=2>; rel=\"next\", \
                    <https://api.github.com/repositories/1/commits?author=alice&per_page=1&page=1234>; rel=\"last\"";

fn sample_profile_html() -> String {
    let filler = "<div class=\"js-yearly-contributions\"><span>graph</span></div>\n".repeat(2_000);
    format!("{filler}<h2 class=\"f4 text-normal mb-2\">\n  2,345 contributions\n  in the last year\n</h2>{filler}")
}

fn sample_tally(n: usize) -> Tally {
    let names: Vec<String> = (0..n).map(|i| format!("Lang{i}")).collect();
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), ((i * 7919) % 10_007) as u64))
        .collect()
}

fn sample_stats() -> ActivityStats {
    let mut stats = ActivityStats::empty("alice");
    stats.repo_count = 120;
    stats.stars = 4_321;
    stats.commits = CommitTotals {
        official: 5_210,
        expanded: 6_004,
    };
    stats.contributions = Outcome::Success(2_345);
    stats.languages = sample_tally(20);
    stats.primary_languages = sample_tally(8);
    stats.top_repos = (0..5)
        .map(|i| RepoCommits {
            repo: format!("repository-{i}"),
            commits: 1_000 - i * 100,
        })
        .collect();
    stats.monthly = Some(MonthlyActivity {
        year: 2024,
        months: [12, 40, 33, 8, 0, 51, 77, 19, 23, 64, 5, 30],
        active_repos: 14,
    });
    stats
}

fn bench_parsing(c: &mut Criterion) {
    let html = sample_profile_html();
    c.bench_function("parse_contribution_count", |b| {
        b.iter(|| parse_contribution_count(black_box(&html)))
    });
    c.bench_function("last_page", |b| b.iter(|| last_page(black_box(LINK))));
}

fn bench_tally(c: &mut Criterion) {
    let tally = sample_tally(500);
    c.bench_function("tally_top_6_of_500", |b| b.iter(|| black_box(&tally).top(6)));
}

fn bench_render(c: &mut Criterion) {
    let stats = sample_stats();
    c.bench_function("card_render", |b| {
        b.iter(|| card::render(black_box(&stats), 6, "2024-06-01 12:00 UTC"))
    });
    c.bench_function("fallback_render", |b| {
        b.iter(|| fallback::render(black_box(&stats)))
    });
}

criterion_group!(benches, bench_parsing, bench_tally, bench_render);
criterion_main!(benches);
