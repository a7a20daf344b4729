pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            // The literal segments must be registered before "/{id}".
            .service(tasks::delete_completed)
            .service(tasks::delete_all)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
