// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger antes de qualquer coisa.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (qualquer usuário autenticado)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Painel da agência: clientes, status, geração e exportações
    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{client_id}",
            get(handlers::clients::get_client)
                .patch(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route(
            "/{client_id}/status",
            get(handlers::clients::get_status).patch(handlers::clients::update_status),
        )
        .route(
            "/{client_id}/generate-scripts",
            post(handlers::clients::generate_scripts),
        )
        .route(
            "/{client_id}/users",
            get(handlers::clients::list_portal_users).post(handlers::clients::link_portal_user),
        )
        .route("/{client_id}/assets", post(handlers::clients::register_asset))
        .route("/{client_id}/export-text", get(handlers::exports::export_text))
        .route("/{client_id}/export-json", get(handlers::exports::export_json))
        .route("/{client_id}/export-pdf", get(handlers::exports::export_pdf))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Roteiros (admin). O bulk-update vem antes da rota com parâmetro.
    let script_routes = Router::new()
        .route("/bulk-update", patch(handlers::scripts::bulk_update))
        .route(
            "/{script_id}",
            get(handlers::scripts::get_script)
                .patch(handlers::scripts::update_script)
                .delete(handlers::scripts::delete_script),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Portal do cliente (usuário autenticado; posse verificada por consulta)
    let portal_routes = Router::new()
        .route("/dashboard", get(handlers::portal::dashboard))
        .route("/scripts", get(handlers::portal::list_scripts))
        .route(
            "/scripts/{script_id}",
            get(handlers::portal::get_script).patch(handlers::portal::review_script),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // E-mails transacionais (admin)
    let email_routes = Router::new()
        .route("/test", post(handlers::email::send_test_email))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/voices", get(handlers::voice::list_voices))
        .route("/api/voice-preview", post(handlers::voice::voice_preview))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/scripts", script_routes)
        .nest("/api/portal", portal_routes)
        .nest("/api/email", email_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
