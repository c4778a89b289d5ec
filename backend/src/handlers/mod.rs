use actix_web::web;

pub mod auth;
pub mod chores;
pub mod friends;
pub mod households;
pub mod invites;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(auth::configure)
            .configure(friends::configure)
            .configure(households::configure)
            .configure(invites::configure),
    );
}
