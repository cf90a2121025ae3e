use actix::Actor;
use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, init_tracing, run_migrations},
    modules::{
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        membership::{repository_pg::VisitRepositoryPg, service::MembershipService},
        message::{repository_pg::MessageRepositoryPg, service::MessageService},
        post::{repository_pg::PostRepositoryPg, service::PostService},
        suggestion::service::SuggestionService,
        user::{repository_pg::UserRepositoryPg, service::UserService},
        websocket::{channel::ChannelPublisher, handler::websocket_handler, server::WebSocketServer},
    },
};

mod api;
mod configs;
mod constants;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    tracing::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    run_migrations(&db_pool).await.map_err(|e| std::io::Error::other(e.to_string()))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));
    let visit_repo = Arc::new(VisitRepositoryPg::new(db_pool.clone()));
    let post_repo = Arc::new(PostRepositoryPg::new(db_pool.clone()));

    let ws_server = WebSocketServer::new().start();
    let channel: Arc<dyn ChannelPublisher> = Arc::new(ws_server.clone());

    let user_service = UserService::with_dependencies(user_repo.clone());
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo.clone());
    let message_service = MessageService::with_dependencies(message_repo, user_repo.clone(), channel);
    let suggestion_service = SuggestionService::with_dependencies(user_repo.clone());
    let post_service = PostService::with_dependencies(post_repo, user_repo.clone());
    let membership_service = MembershipService::with_dependencies(visit_repo, user_repo);

    tracing::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(suggestion_service.clone()))
            .app_data(web::Data::new(membership_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(ws_server.clone()))
            .service(health_check)
            .route("/ws", web::get().to(websocket_handler))
            .service(
                web::scope("/api")
                    .configure(modules::user::route::configure)
                    .configure(modules::friend::route::configure)
                    .configure(modules::suggestion::route::configure)
                    .configure(modules::message::route::configure)
                    .configure(modules::membership::route::configure)
                    .configure(modules::post::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
