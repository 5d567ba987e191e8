use std::fmt::Write;

use super::format::escape_xml;
use super::metrics;
use crate::types::ActivityStats;

const ACCENTS: [&str; 3] = ["#7DD3FC", "#A78BFA", "#60A5FA"];

/// Minimal vector card: the three headline numbers and the repository count.
pub fn render(stats: &ActivityStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="980" height="240" font-family="sans-serif">
  <rect width="100%" height="100%" fill="#071025"/>
  <text x="24" y="36" fill="#D7E6FF" font-size="20" font-weight="700">{} · GitHub Activity</text>"##,
        escape_xml(&stats.username)
    );

    for (i, (metric, accent)) in metrics(stats).iter().zip(ACCENTS).enumerate() {
        let x = 24 + i * 316;
        let _ = writeln!(
            out,
            r##"  <g transform="translate({x},64)">
    <rect width="280" height="72" rx="8" fill="#0f1724" stroke="#233044"/>
    <text x="16" y="24" fill="#cfe8ff" font-size="12" font-weight="600">{}</text>
    <text x="16" y="52" fill="{accent}" font-size="24" font-weight="700">{}</text>
  </g>"##,
            escape_xml(metric.label),
            escape_xml(&metric.value)
        );
    }

    let _ = writeln!(
        out,
        r##"  <text x="24" y="220" fill="#6b7c8f" font-size="10">{} repositories analysed</text>
</svg>"##,
        stats.repo_count
    );
    out
}
