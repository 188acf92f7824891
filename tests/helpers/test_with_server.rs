#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident, $backend:ident| $body:block) => {
        #[tokio::test(flavor = "multi_thread")]
        #[allow(unused_variables)]
        async fn $name() {
            use axum_test::{TestServer, TestServerConfig};
            use blog_portal::config::AppConfig;
            use blog_portal::middleware::mw_ctx::create_ctx_state;

            let ($backend, backend_url) = $crate::helpers::mock_backend::spawn_mock_backend().await;

            let config = AppConfig {
                backend_url,
                backend_timeout_secs: 5,
                jwt_secret: "secret".to_string(),
                jwt_duration_days: 1,
                port: 0,
                is_development: true,
            };
            let $ctx_state = create_ctx_state(&config).expect("ctx state");
            let routes_all = blog_portal::init::main_router(&$ctx_state);

            let $server = TestServer::new_with_config(
                routes_all,
                TestServerConfig {
                    transport: None,
                    save_cookies: true,
                    expect_success_by_default: false,
                    restrict_requests_with_http_schema: false,
                    default_content_type: None,
                    default_scheme: None,
                },
            )
            .expect("Failed to create test server");

            $body
        }
    };
}
