//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_create_transaction_page,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{AppState, Storage, build_router, endpoints};

    fn get_test_server() -> (TestServer, AppState) {
        let state = AppState::new(Storage::in_memory(), "Etc/UTC");
        let server = TestServer::try_new(build_router(state.clone())).expect("Could not start server");

        (server, state)
    }

    #[tokio::test]
    async fn root_redirects_to_transactions() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location"),
            endpoints::TRANSACTIONS_VIEW,
            "want redirect to the transactions page"
        );
    }

    #[tokio::test]
    async fn unknown_routes_render_the_404_page() {
        let (server, _) = get_test_server();

        let response = server.get("/does/not/exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_view_delete_flow() {
        let (server, state) = get_test_server();

        let create_response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[
                ("description", "Groceries"),
                ("amount", "40"),
                ("type", "expense"),
                ("date", "2024-01-10"),
            ])
            .await;
        create_response.assert_status(StatusCode::SEE_OTHER);

        let page = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_query_param("type", "all")
            .add_query_param("month", "2024-01")
            .await;
        page.assert_status_ok();
        let text = page.text();
        assert!(text.contains("Groceries"), "the new transaction should be listed");
        assert!(text.contains("-$40.00"), "the amount should be formatted and signed");

        let transaction_id = state.store.lock().unwrap().all()[0].id;
        let delete_response = server
            .delete(&endpoints::format_endpoint(
                endpoints::DELETE_TRANSACTION,
                transaction_id,
            ))
            .await;
        delete_response.assert_status_ok();

        assert!(state.store.lock().unwrap().all().is_empty());
    }
}
