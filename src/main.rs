/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description: 추세 분석 서버 / CLI 진입점
**/

use std::fs::File;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;

use trendscope::analysis::{analyze, analyze_candles, export_csv};
use trendscope::api::{create_routes, AppState};
use trendscope::config::Config;
use trendscope::market_data::{load_price_file, MarketDataService};
use trendscope::models::{closes, Market};
use trendscope::utils::{format_timestamp, logging};

const USAGE: &str = "usage:
  trendscope [serve]
  trendscope analyze <crypto|stock|psx> <symbol> [interval]
  trendscope analyze-csv <path> [--export <out.csv>]";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("추세 분석 서비스 시작 (v{})", trendscope::VERSION);

    // 명령줄 인수 확인
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve") => run_server(config).await?,
        Some("analyze") => {
            let market = args.get(2).context(USAGE)?;
            let symbol = args.get(3).context(USAGE)?;
            run_market_analysis(&config, market, symbol, args.get(4).map(String::as_str)).await?;
        }
        Some("analyze-csv") => {
            let path = args.get(2).context(USAGE)?;
            let export = match args.get(3).map(String::as_str) {
                Some("--export") => Some(args.get(4).context(USAGE)?.as_str()),
                Some(_) => anyhow::bail!(USAGE),
                None => None,
            };
            run_csv_analysis(&config, Path::new(path), export)?;
        }
        Some(other) => {
            eprintln!("unknown command: {}\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<(), anyhow::Error> {
    let market_data = MarketDataService::from_config(&config.data_sources)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("잘못된 서버 주소: {}:{}", config.server.host, config.server.port))?;

    let routes = create_routes(AppState::new(config, market_data));

    log::info!("API 서버 시작: http://{}", addr);
    warp::serve(routes).run(addr).await;

    Ok(())
}

async fn run_market_analysis(
    config: &Config,
    market: &str,
    symbol: &str,
    interval: Option<&str>,
) -> Result<(), anyhow::Error> {
    let market: Market = market.parse()?;
    let market_data = MarketDataService::from_config(&config.data_sources)?;

    let fetched = market_data.fetch(market, symbol, interval).await?;
    let analysis = analyze_candles(&fetched.symbol, &fetched.candles, &config.analysis)?;
    logging::log_analysis_summary(&fetched.symbol, &analysis.report);

    println!("{} ({}, {})", fetched.symbol, market, fetched.interval.code(market));
    if let (Some(first), Some(last)) = (fetched.candles.first(), fetched.candles.last()) {
        println!(
            "Period: {} ~ {}",
            format_timestamp(first.timestamp, "%Y-%m-%d %H:%M"),
            format_timestamp(last.timestamp, "%Y-%m-%d %H:%M")
        );
    }
    println!("{}", analysis.report.summary());
    Ok(())
}

fn run_csv_analysis(config: &Config, path: &Path, export: Option<&str>) -> Result<(), anyhow::Error> {
    let (asset, candles) = load_price_file(path)?;
    let prices = closes(&candles);

    let report = analyze(&prices, &config.analysis)?;
    logging::log_analysis_summary(&asset, &report);

    println!("{}", asset);
    println!("{}", report.summary());

    if let Some(out) = export {
        let file = File::create(out).with_context(|| format!("파일 생성 실패: {}", out))?;
        export_csv(file, &prices, &report.short_ma, &report.long_ma)?;
        log::info!("분석 결과 저장: {}", out);
    }

    Ok(())
}
