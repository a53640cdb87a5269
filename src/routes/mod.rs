//! HTTP routing

pub mod dashboard;

use axum::{routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    trace::TraceLayer,
};

use crate::error::panic_response;
use crate::AppState;

/// Full application router with middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(dashboard::health))
        .route("/api/dashboard", get(dashboard::dashboard))
        .merge(crate::auth::router())
        .merge(crate::pricing::router())
        .merge(crate::booking::router())
        .merge(crate::inventory::routes::router())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::inventory::{seed::demo_inventory, InventoryStore};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Config::default();
        let inventory =
            demo_inventory(&config.tax_defaults(), Utc::now().date_naive()).unwrap();
        AppState::new(config, InventoryStore::new(inventory))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(app: &Router, username: &str) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/api/auth/login",
                None,
                json!({ "username": username, "password": username }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(test_state());
        let (status, body) = send(&app, get("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unit_cost_endpoint() {
        let app = app(test_state());
        let (status, body) = send(
            &app,
            post_json(
                "/api/pricing/unit-cost",
                None,
                json!({
                    "size": "1200",
                    "price_per_sq_ft": 5000,
                    "municipal_tax": "50000",
                    "electricity_tax": "10000",
                    "paid_amount": "6000000"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["base_cost"]["amount"], "6000000");
        assert_eq!(body["total_cost"]["amount"], "6060000");
        assert_eq!(body["pending_amount"]["amount"], "60000");
        assert_eq!(body["pending_amount"]["currency"], "INR");
    }

    #[tokio::test]
    async fn test_unit_cost_with_garbage_input_and_default_taxes() {
        let app = app(test_state());
        let (status, body) = send(
            &app,
            post_json(
                "/api/pricing/unit-cost",
                None,
                json!({ "size": "abc", "price_per_sq_ft": null, "paid_amount": "-50" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["base_cost"]["amount"], "0");
        assert_eq!(body["total_cost"]["amount"], "60000");
        assert_eq!(body["paid_amount"]["amount"], "0");
    }

    #[tokio::test]
    async fn test_protected_routes_need_a_session() {
        let app = app(test_state());
        let (status, body) = send(&app, get("/api/units", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_type"], "unauthorized");

        let (status, _) = send(&app, get("/api/units", Some("not-a-token"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_login_is_rejected() {
        let app = app(test_state());
        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                None,
                json!({ "username": "admin", "password": "wrong" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_type"], "invalid_credentials");
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let app = app(test_state());
        let token = login(&app, "seller").await;

        let (status, _) = send(&app, post_json("/api/auth/logout", Some(&token), json!({}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, get("/api/navigation", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_navigation_and_sellers_are_role_gated() {
        let app = app(test_state());
        let seller = login(&app, "seller").await;
        let admin = login(&app, "admin").await;

        let (_, body) = send(&app, get("/api/navigation", Some(&seller))).await;
        let names: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Dashboard", "Buildings", "Units"]);

        let (status, body) = send(&app, get("/api/sellers", Some(&seller))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_type"], "forbidden");

        let (status, body) = send(&app, get("/api/sellers?status=active", Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sellers"].as_array().unwrap().len(), 3);
        assert_eq!(body["stats"]["total"], 4);
    }

    #[tokio::test]
    async fn test_dashboard_cards_follow_role() {
        let app = app(test_state());
        let seller = login(&app, "seller").await;
        let admin = login(&app, "admin").await;

        let (_, body) = send(&app, get("/api/dashboard", Some(&seller))).await;
        assert_eq!(body["cards"].as_array().unwrap().len(), 3);

        let (_, body) = send(&app, get("/api/dashboard", Some(&admin))).await;
        assert_eq!(body["cards"].as_array().unwrap().len(), 6);
        assert_eq!(body["role"], "SUPER");
    }

    #[tokio::test]
    async fn test_unit_filters() {
        let app = app(test_state());
        let token = login(&app, "seller").await;

        let (status, body) = send(&app, get("/api/units?status=booked&type=all", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let units = body["units"].as_array().unwrap();
        assert_eq!(units.len(), 113);
        assert!(units.iter().all(|u| u["status"] == "booked"));
        assert_eq!(body["stats"]["total"], 184);

        let (_, body) = send(&app, get("/api/units?search=jane%20SMITH", Some(&token))).await;
        let units = body["units"].as_array().unwrap();
        assert!(!units.is_empty());
        assert!(units.iter().all(|u| u["booking"]["buyer_name"] == "Jane Smith"));

        let (status, body) = send(&app, get("/api/units?status=sold", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "invalid_request");
        assert!(body["message"].as_str().unwrap().contains("sold"));
    }

    #[tokio::test]
    async fn test_malformed_requests_use_error_body() {
        let app = app(test_state());
        let token = login(&app, "admin").await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/pricing/unit-cost")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "invalid_request");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/pricing/unit-cost")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error_type"], "invalid_request");

        let (status, body) = send(&app, get("/api/units/not-a-uuid", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "invalid_request");
    }

    #[tokio::test]
    async fn test_null_buyer_fields_report_buyer_info() {
        let app = app(test_state());
        let token = login(&app, "seller").await;

        let (_, body) = send(&app, get("/api/units?status=available", Some(&token))).await;
        let unit_id = body["units"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_json(
                &format!("/api/units/{}/booking", unit_id),
                Some(&token),
                json!({
                    "unit_type": "2BHK",
                    "size": "1200",
                    "price_per_sq_ft": "5000",
                    "buyer_name": null,
                    "buyer_email": null,
                    "buyer_phone": "+1234567890",
                    "paid_amount": "100000"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "booking_validation_error");
        assert_eq!(body["details"][0]["category"], "buyer_info");
        assert_eq!(body["details"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_plot() {
        let app = app(test_state());
        let admin = login(&app, "admin").await;
        let seller = login(&app, "seller").await;
        let plot = json!({
            "plot_number": "P007",
            "area": "1500",
            "price": "3000000",
            "facing": "South-East",
            "status": "booked",
            "owner_name": "Kavya Rao",
            "dimensions": "30x50"
        });

        let (status, _) = send(&app, post_json("/api/plots", Some(&seller), plot.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, post_json("/api/plots", Some(&admin), plot.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["plot_number"], "P007");
        assert_eq!(body["price_per_sq_ft"], "2000");

        let (status, body) = send(&app, post_json("/api/plots", Some(&admin), plot)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error_type"], "conflict");

        let (status, body) = send(
            &app,
            post_json(
                "/api/plots",
                Some(&admin),
                json!({ "plot_number": "P008", "area": "0", "price": "100", "facing": "North" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "validation_error");

        let (_, body) = send(&app, get("/api/plots", Some(&admin))).await;
        assert_eq!(body["plots"].as_array().unwrap().len(), 7);
        assert_eq!(body["stats"]["booked"], 3);
    }

    #[tokio::test]
    async fn test_add_and_delete_seller() {
        let app = app(test_state());
        let admin = login(&app, "admin").await;
        let seller = login(&app, "seller").await;
        let account = json!({
            "full_name": "Priya Nair",
            "email": "priya.nair@company.com",
            "phone": "+1234567894",
            "username": "pnair"
        });

        let (status, _) = send(&app, post_json("/api/sellers", Some(&seller), account.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, post_json("/api/sellers", Some(&admin), account.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "SELLER");
        assert_eq!(body["status"], "active");
        let seller_id = body["id"].as_str().unwrap().to_string();

        let (status, _) = send(&app, post_json("/api/sellers", Some(&admin), account)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let delete = |token: &str| {
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/sellers/{}", seller_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap()
        };
        let (status, _) = send(&app, delete(seller.as_str())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, delete(admin.as_str())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, delete(admin.as_str())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_type"], "not_found");

        let (_, body) = send(&app, get("/api/sellers", Some(&admin))).await;
        assert_eq!(body["stats"]["total"], 4);
    }

    #[tokio::test]
    async fn test_plot_filter_by_facing() {
        let app = app(test_state());
        let token = login(&app, "admin").await;

        let (status, body) =
            send(&app, get("/api/plots?facing=North-East&status=all", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let plots = body["plots"].as_array().unwrap();
        assert_eq!(plots.len(), 1);
        assert_eq!(plots[0]["plot_number"], "P005");
        assert_eq!(plots[0]["price_per_sq_ft"], "2000");
    }

    #[tokio::test]
    async fn test_building_lifecycle_and_booking() {
        let app = app(test_state());
        let token = login(&app, "admin").await;

        let (status, building) = send(
            &app,
            post_json(
                "/api/buildings",
                Some(&token),
                json!({ "name": "Lake View", "wings": 1, "floors": 2, "units_per_floor": 2 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(building["total_units"], 4);
        let building_id = building["id"].as_str().unwrap().to_string();

        let (_, body) = send(
            &app,
            get(&format!("/api/units?building_id={}", building_id), Some(&token)),
        )
        .await;
        let units = body["units"].as_array().unwrap();
        assert_eq!(units.len(), 4);
        let unit_id = units[0]["id"].as_str().unwrap().to_string();

        let booking_uri = format!("/api/units/{}/booking", unit_id);

        // fresh unit without details: every failing category is reported
        let (status, body) = send(
            &app,
            post_json(&booking_uri, Some(&token), json!({ "buyer_name": "John Doe", "paid_amount": "0" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let categories: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|issue| issue["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["buyer_info", "paid_amount", "unit_details"]);

        let form = json!({
            "unit_type": "2BHK",
            "size": "1200",
            "price_per_sq_ft": "5000",
            "buyer_name": "John Doe",
            "buyer_email": "john.doe@example.com",
            "buyer_phone": "123-456-7890",
            "payment_type": "bank-transfer",
            "paid_amount": "6000000"
        });
        let (status, body) = send(&app, post_json(&booking_uri, Some(&token), form.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["unit"]["status"], "booked");
        assert_eq!(
            body["unit"]["booking"]["booking_date"],
            Utc::now().date_naive().format("%Y-%m-%d").to_string()
        );
        assert_eq!(body["cost"]["total_cost"]["amount"], "6060000");
        assert_eq!(body["cost"]["pending_amount"]["amount"], "60000");

        let (status, body) = send(&app, post_json(&booking_uri, Some(&token), form)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error_type"], "conflict");

        let (_, building) =
            send(&app, get(&format!("/api/buildings/{}", building_id), Some(&token))).await;
        assert_eq!(building["booked_units"], 1);
        assert_eq!(building["available_units"], 3);
        let occupancy: Decimal = building["occupancy_rate"].as_str().unwrap().parse().unwrap();
        assert_eq!(occupancy, dec!(25));

        let floor_key = format!("{}:A:1", building_id);
        let wing_key = format!("{}:A", building_id);
        let (status, layout) = send(
            &app,
            get(
                &format!("/api/buildings/{}/layout?expand={},{}", building_id, wing_key, floor_key),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(layout["wings"][0]["floors"][0]["units"].as_array().unwrap().len(), 2);
        assert_eq!(layout["wings"][0]["floors"][1]["units"].as_array().unwrap().len(), 0);

        let delete = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/buildings/{}", building_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, get(&format!("/api/units/{}", unit_id), Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_building_is_unprocessable() {
        let app = app(test_state());
        let token = login(&app, "admin").await;

        let (status, body) = send(
            &app,
            post_json(
                "/api/buildings",
                Some(&token),
                json!({ "name": "Empty", "wings": 0, "floors": 2, "units_per_floor": 2 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error_type"], "validation_error");
    }

    #[tokio::test]
    async fn test_unit_detail_includes_cost() {
        let app = app(test_state());
        let token = login(&app, "seller").await;

        let (_, body) = send(&app, get("/api/units?status=booked", Some(&token))).await;
        let unit_id = body["units"][0]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, get(&format!("/api/units/{}", unit_id), Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["building_name"].as_str().is_some());
        assert_eq!(body["cost"]["municipal_tax"]["amount"], "50000");
    }
}
