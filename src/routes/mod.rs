use actix_web::web;

pub mod backend_health;
pub mod workouts;
pub mod sessions;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(workouts::list_workouts)
        .service(workouts::get_workout)
        .service(sessions::list_sessions)
        .service(sessions::create_session);
}
