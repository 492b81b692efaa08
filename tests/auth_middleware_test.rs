use actix_web::{test, web, App, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serial_test::serial;

use travelai_api::middleware::auth::{AuthMiddleware, Claims};

const TEST_SECRET: &str = "integration_test_secret";

async fn whoami(claims: web::ReqData<Claims>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "email": claims.sub,
        "user_id": claims.user_id
    }))
}

fn make_token(secret: &str, expired: bool) -> String {
    let now = Utc::now();
    let exp = if expired {
        now - Duration::hours(1)
    } else {
        now + Duration::hours(24)
    };

    let claims = Claims {
        sub: "traveler@example.com".to_string(),
        iat: (now - Duration::hours(2)).timestamp() as usize,
        exp: exp.timestamp() as usize,
        user_id: "507f1f77bcf86cd799439011".to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .expect("token encoding should succeed")
}

#[actix_rt::test]
#[serial]
async fn test_missing_header_is_rejected() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_garbage_token_is_rejected() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_wrong_secret_is_rejected() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let token = make_token("some_other_secret", false);

    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_expired_token_is_rejected() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let token = make_token(TEST_SECRET, true);

    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_valid_token_injects_claims() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let token = make_token(TEST_SECRET, false);

    let app = test::init_service(
        App::new().service(
            web::scope("")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "traveler@example.com");
    assert_eq!(body["user_id"], "507f1f77bcf86cd799439011");
}
