//! Terminal front-end: connects to every configured provider and redraws a plain
//! text board on a fixed cadence until SIGINT/SIGTERM.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tickerboard::{
    BackoffPolicy, Config, Dashboard, LogWriter, ProviderConfig, ProviderView, ReconnectPolicy,
    Subscribe, age, format_age,
};

#[derive(Parser, Debug)]
#[command(name = "tickerboard", about = "Live market dashboard")]
struct Args {
    /// Provider list, `Name=wss://endpoint;Other=wss://...`.
    #[arg(long, env = "TICKERBOARD_PROVIDERS", default_value = "")]
    providers: String,
    /// Reject malformed provider entries instead of skipping them.
    #[arg(long)]
    strict: bool,
    /// Consecutive closes before a provider is given up on.
    #[arg(long, default_value_t = 1000)]
    max_attempts: u32,
    /// Delay between reconnect attempts.
    #[arg(long, default_value_t = 10_000)]
    reconnect_interval_ms: u64,
    /// Lifetime of a notification.
    #[arg(long, default_value_t = 2_000)]
    notification_ttl_ms: u64,
    /// Board redraw interval.
    #[arg(long, default_value_t = 1_000)]
    refresh_ms: u64,
    /// Shutdown grace period.
    #[arg(long, default_value_t = 5_000)]
    grace_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging();

    let providers = if args.providers.trim().is_empty() {
        Vec::new()
    } else if args.strict {
        ProviderConfig::parse_strict(&args.providers)?
    } else {
        ProviderConfig::parse_lenient(&args.providers)
    };
    if providers.is_empty() {
        tracing::warn!("no providers configured");
    }

    let cfg = Config {
        grace: Duration::from_millis(args.grace_ms),
        reconnect: ReconnectPolicy {
            max_attempts: args.max_attempts,
            backoff: BackoffPolicy::fixed(Duration::from_millis(args.reconnect_interval_ms)),
        },
        notification_ttl: Duration::from_millis(args.notification_ttl_ms),
        ..Config::default()
    };

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::default())];
    let dashboard = Dashboard::builder(cfg).with_subscribers(subs).build();

    let refresh = Duration::from_millis(args.refresh_ms.max(1));
    let board = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(refresh);
            loop {
                tick.tick().await;
                print!("{}", render(&dashboard).await);
            }
        })
    };

    let res = dashboard.run(providers).await;
    board.abort();
    res?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn render(dashboard: &Dashboard) -> String {
    let now = Utc::now();
    let mut out = String::from("\x1b[2J\x1b[H");

    for view in dashboard.views().await {
        render_provider(&mut out, &view, now);
    }

    let notes = dashboard.notifications().await;
    if !notes.is_empty() {
        out.push('\n');
        for note in notes {
            let _ = writeln!(out, "[{}] {}", note.level, note.text);
        }
    }
    out
}

fn render_provider(out: &mut String, view: &ProviderView, now: chrono::DateTime<Utc>) {
    let _ = writeln!(
        out,
        "== {} [{}] {} ({} failed attempts)",
        view.name,
        view.severity,
        view.state.as_label(),
        view.attempts
    );
    for rec in &view.records {
        let _ = writeln!(
            out,
            "  {:<8} {:<24} buy {:>10.2} sell {:>10.2} {:<4} {}",
            rec.ticker,
            rec.name,
            rec.cost.high,
            rec.cost.low,
            rec.cost.currency,
            format_age(age(now, rec.observed_at)),
        );
    }
}
