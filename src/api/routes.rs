//! Route tables

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, categories, clients, products, sales, users};
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/:uuid",
            get(categories::get)
                .put(categories::update)
                .patch(categories::update)
                .delete(categories::remove),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:uuid",
            get(products::get)
                .put(products::update)
                .patch(products::update)
                .delete(products::remove),
        )
        .route("/clients", get(clients::list).post(clients::create))
        .route(
            "/clients/:uuid",
            get(clients::get)
                .put(clients::update)
                .patch(clients::update)
                .delete(clients::remove),
        )
        .route("/sales", get(sales::list).post(sales::create))
        .route(
            "/sales/:uuid",
            get(sales::get)
                .put(sales::update)
                .patch(sales::update)
                .delete(sales::remove),
        )
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:uuid",
            get(users::get)
                .put(users::update)
                .patch(users::update)
                .delete(users::remove),
        )
}
