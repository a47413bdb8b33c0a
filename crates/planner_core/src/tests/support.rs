use axum::Router;
use serde_json::{json, Value};
use shared::protocol::{MealPlanResponse, RequestPayload};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

use crate::{normalizer::normalize, preferences::PreferenceModel};

/// Serves `app` on an ephemeral local port and returns its base URL.
pub(crate) async fn spawn_service(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Serves one connection: reads the whole request, writes `raw` verbatim and
/// closes. Lets tests send responses axum would refuse to produce.
pub(crate) async fn spawn_raw_service(raw: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.expect("read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
            if request_complete(&request) {
                break;
            }
        }
        socket.write_all(raw).await.expect("write response");
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

fn request_complete(request: &[u8]) -> bool {
    let Some(end) = request.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&request[..end]).to_ascii_lowercase();
    let body_len = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= end + 4 + body_len
}

/// Base URL of a port that nothing listens on.
pub(crate) async fn closed_service_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn default_payload() -> RequestPayload {
    normalize(&PreferenceModel::default()).expect("default preferences normalize")
}

pub(crate) fn recipe_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "ingredients": [],
        "steps": ["Cook"],
        "cooking_time_min": 25,
        "difficulty_level": "beginner",
        "cuisine_type": "mediterranean",
        "dietary_restrictions": ["vegetarian"],
        "allergens": [],
        "total_calories": 420.0,
        "total_protein_g": 18.0,
        "total_carbs_g": 55.0,
        "total_fat_g": 12.0,
        "total_cost": 3.25
    })
}

pub(crate) fn sample_plan_json() -> Value {
    json!({
        "week_start_date": "2025-01-06",
        "daily_meals": [
            {
                "date": "2025-01-06",
                "meals": [
                    {"day": "Monday", "meal_type": "breakfast", "recipe": recipe_json("r1", "Spinach Omelette")},
                    {"day": "Monday", "meal_type": "dinner", "recipe": recipe_json("r2", "Chickpea Curry")}
                ]
            },
            {
                "date": "2025-01-07",
                "meals": [
                    {"day": "Tuesday", "meal_type": "lunch", "recipe": null}
                ]
            }
        ],
        "total_cost": 42.5,
        "nutritional_summary": {
            "total_protein_g": 512.26,
            "total_carbs_g": 1400.0,
            "total_fat_g": 300.04,
            "total_calories": 11250.0
        },
        "grocery_list": {
            "single_store_mode": true,
            "selected_store": {"id": "store_2", "name": "ValueGrocer", "location": "Uptown"},
            "stores_used": [{"id": "store_2", "name": "ValueGrocer", "location": "Uptown"}],
            "total_cost": 42.5,
            "items_by_store": {},
            "items_by_section": {
                "produce": [
                    {"name": "Spinach", "quantity": 2.0, "unit": "bunch", "section": "produce"},
                    {"name": "Broccoli", "quantity": 350.0, "unit": "g", "section": "produce"}
                ],
                "meat": [
                    {"name": "Chicken Breast", "quantity": 1200.456, "unit": "g", "section": "meat"}
                ],
                "pantry": [
                    {"name": "Rice", "quantity": 0.26, "unit": "kg", "section": "pantry"}
                ]
            },
            "substitutions": [
                {
                    "original_item": "Broccoli",
                    "alternative_store": "FreshMart",
                    "original_price": 0.012,
                    "alternative_price": 0.009,
                    "savings_per_unit": 0.003,
                    "estimated_savings": 1.05
                }
            ],
            "cost_savings": 0
        }
    })
}

pub(crate) fn sample_plan() -> MealPlanResponse {
    serde_json::from_value(sample_plan_json()).expect("sample plan parses")
}
