// src/routes.rs
use log::info;
use std::convert::Infallible;
use std::sync::Arc;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::collar::{calculate_collar, get_defaults, get_expirations};
use crate::handlers::error::ApiError;
use crate::services::provider::OptionChainProvider;

// Form submissions are a handful of numbers.
const MAX_FORM_BYTES: u64 = 16 * 1024;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let kind;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        kind = "not_found";
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        kind = api_error.kind;
        message = api_error.message.clone();
    } else if let Some(body_error) = err.find::<BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        kind = "invalid_input";
        message = format!("Something went wrong: {}", body_error);
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        kind = "method_not_allowed";
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        kind = "internal";
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
            "kind": kind,
        })),
        code,
    ))
}

pub fn routes<P>(provider: Arc<P>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone
where
    P: OptionChainProvider + Send + Sync + 'static,
{
    info!("Configuring routes...");

    let provider_filter = warp::any().map(move || provider.clone());

    let collar_route = warp::path!("api" / "v1" / "collar")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::json())
        .and(provider_filter.clone())
        .and_then(calculate_collar::<P>);

    let expirations_route = warp::path!("api" / "v1" / "expirations" / String)
        .and(warp::get())
        .and(provider_filter.clone())
        .and_then(get_expirations::<P>);

    let defaults_route = warp::path!("api" / "v1" / "defaults")
        .and(warp::get())
        .and_then(get_defaults);

    info!("All routes configured successfully.");

    collar_route
        .or(expirations_route)
        .or(defaults_route)
        .recover(handle_rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::error::CollarError;
    use crate::services::provider::stub::{aapl_chain, StubProvider};
    use serde_json::{json, Value};

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn post_collar_returns_summary_and_chart() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/collar")
            .json(&json!({
                "ticker": "AAPL",
                "entry_price": 160.0,
                "shares": 100,
                "put_strike": 150.0,
                "call_strike": 175.0,
                "expiration": "2025-12-20"
            }))
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["result"]["max_loss"], json!(-1100.0));
        assert_eq!(body["result"]["max_gain"], json!(1400.0));
        assert_eq!(body["summary"]["max_loss"], "Max Loss: $-1,100.00");
        assert_eq!(body["chart"]["x_label"], "Stock Price at Expiration");
        assert_eq!(body["result"]["payoff_curve"].as_array().unwrap().len(), 100);
    }

    #[tokio::test]
    async fn missing_strike_is_a_404_with_message() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/collar")
            .json(&json!({ "call_strike": 190.0 }))
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res.body());
        assert_eq!(body["kind"], "lookup_not_found");
        assert_eq!(body["error"], "Something went wrong: no call listed at strike 190");
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn provider_failure_is_a_502() {
        let provider = StubProvider::failing(CollarError::DataProvider("connection refused".into()));
        let api = routes(Arc::new(provider));
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/collar")
            .json(&json!({}))
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(res.body())["error"], "Something went wrong: connection refused");
    }

    #[tokio::test]
    async fn malformed_body_is_a_400() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/collar")
            .header("content-type", "application/json")
            .body(r#"{"shares": "lots"}"#)
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res.body())["kind"], "invalid_input");
    }

    #[tokio::test]
    async fn invalid_form_is_a_400() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request()
            .method("POST")
            .path("/api/v1/collar")
            .json(&json!({ "expiration": "next friday" }))
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res.body())["kind"], "invalid_input");
    }

    #[tokio::test]
    async fn expirations_are_listed() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request()
            .method("GET")
            .path("/api/v1/expirations/AAPL")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res.body()), json!(["2025-12-20"]));
    }

    #[tokio::test]
    async fn defaults_mirror_the_form() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request()
            .method("GET")
            .path("/api/v1/defaults")
            .reply(&api)
            .await;

        let body = body_json(res.body());
        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["shares"], 100);
        assert_eq!(body["expiration"], "2025-12-20");
    }

    #[tokio::test]
    async fn unknown_path_is_a_404() {
        let api = routes(Arc::new(StubProvider::with_chain(aapl_chain())));
        let res = warp::test::request().path("/api/v1/nope").reply(&api).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
