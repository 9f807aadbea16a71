use actix_web::web;

pub mod health;
pub mod realtime;
pub mod rooms;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(rooms::configure_routes)
        .configure(realtime::configure_routes);
}
