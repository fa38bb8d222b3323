use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use drinks_engine::{
    db_types::{Drink, Ingredient},
    DrinkApi,
};

use super::mocks::{MockDrinkStore, MockVerifier};
use crate::{
    auth::Claims,
    errors::AuthError,
    routes::{not_found, CreateDrinkRoute, DeleteDrinkRoute, DrinksDetailRoute, DrinksRoute, UpdateDrinkRoute},
    server::{json_config, path_config},
};

/// Wires the real routes, guard middleware and error handlers around mock collaborators, exactly
/// as `create_server_instance` does for the production types.
pub fn configure_app(store: MockDrinkStore, verifier: MockVerifier) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(DrinkApi::new(store)))
            .app_data(web::Data::new(verifier))
            .app_data(json_config())
            .app_data(path_config())
            .service(DrinksRoute::<MockDrinkStore>::new())
            .service(DrinksDetailRoute::<MockDrinkStore, MockVerifier>::new())
            .service(CreateDrinkRoute::<MockDrinkStore, MockVerifier>::new())
            .service(UpdateDrinkRoute::<MockDrinkStore, MockVerifier>::new())
            .service(DeleteDrinkRoute::<MockDrinkStore, MockVerifier>::new())
            .default_service(web::route().to(not_found));
    }
}

pub async fn send(store: MockDrinkStore, verifier: MockVerifier, req: TestRequest) -> (StatusCode, String) {
    let _ = env_logger::try_init();
    let app = App::new().configure(configure_app(store, verifier));
    let app = test::init_service(app).await;
    // Errors returned by the guard middleware are rendered into responses by the HTTP layer in
    // production; `try_call_service` lets us apply the same `ResponseError` conversion here.
    let (status, bytes) = match test::try_call_service(&app, req.to_request()).await {
        Ok(res) => {
            let (_, res) = res.into_parts();
            (res.status(), res.into_body().try_into_bytes().unwrap())
        },
        Err(err) => {
            let res = err.error_response();
            (res.status(), res.into_body().try_into_bytes().unwrap())
        },
    };
    let body = String::from_utf8_lossy(&bytes).into_owned();
    (status, body)
}

pub fn claims_with(permissions: &[&str]) -> Claims {
    Claims {
        sub: "auth0|tester".to_string(),
        permissions: Some(permissions.iter().map(|s| s.to_string()).collect()),
        exp: 4_102_444_800,
    }
}

/// A verifier that accepts any token and grants exactly the given permissions.
pub fn verifier_granting(permissions: &'static [&'static str]) -> MockVerifier {
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().returning(move |_| Ok(claims_with(permissions)));
    verifier
}

/// A verifier that rejects every token with the given error.
pub fn verifier_rejecting(err: AuthError) -> MockVerifier {
    let mut verifier = MockVerifier::new();
    verifier.expect_verify().returning(move |_| Err(err.clone()));
    verifier
}

pub fn latte() -> Drink {
    Drink {
        id: 1,
        title: "Latte".to_string(),
        recipe: vec![
            Ingredient { name: "milk".to_string(), color: "white".to_string(), parts: 3 },
            Ingredient { name: "espresso".to_string(), color: "brown".to_string(), parts: 1 },
        ],
    }
}

pub fn matcha() -> Drink {
    Drink {
        id: 2,
        title: "Matcha".to_string(),
        recipe: vec![Ingredient { name: "matcha".to_string(), color: "green".to_string(), parts: 1 }],
    }
}
