/**
* filename : routes
* author : HAMA
* date: 2025. 5. 13.
* description: 
**/

use warp::Filter;

use crate::api::handlers::{self, AnalyzeQuery, AppState};

/// 요청 본문 최대 크기 (1 MiB)
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// 분석 서비스의 API 라우트 생성
pub fn create_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // 헬스체크 라우트
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // 상태 필터 생성
    let state_filter = warp::any().map(move || state.clone());

    // 심볼 목록 라우트
    let symbols = warp::path("symbols")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handlers::list_symbols);

    // 시장 데이터 분석 라우트: GET /analyze/{market}/{symbol}
    let analyze_market = warp::path!("analyze" / String / String)
        .and(warp::get())
        .and(warp::query::<AnalyzeQuery>())
        .and(state_filter.clone())
        .and_then(handlers::analyze_market);

    // 가격 배열 분석 라우트: POST /analyze
    let analyze_prices = warp::path("analyze")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(handlers::analyze_prices);

    // 모든 라우트 결합
    health
        .or(symbols)
        .or(analyze_market)
        .or(analyze_prices)
        .with(warp::log("trendscope::api"))
}
