pub mod applications;
pub mod auth;
pub mod catalog;
pub mod disputes;
pub mod files;
pub mod matching;
pub mod milestones;
pub mod preferences;
pub mod profiles;
pub mod projects;
pub mod reviews;
pub mod saved_projects;
pub mod subscriptions;
pub mod time_tracking;

use actix_web::web;

use crate::services::files::MAX_FILE_SIZE;

// Raw upload bodies carry the file itself; leave headroom over the file cap
// so oversized files reach the service and get a readable 400.
const UPLOAD_PAYLOAD_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (sign-up / sign-in are public; the rest need a bearer token) ──
    cfg.service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(auth::sign_up))
            .route("/sign-in", web::post().to(auth::sign_in))
            .route("/sign-out", web::post().to(auth::sign_out))
            .route("/session", web::get().to(auth::session))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Profile routes ──
    cfg.service(
        web::scope("/profiles")
            .route("/{id}", web::get().to(profiles::get_profile))
            .route("/{id}", web::put().to(profiles::update_profile))
            .route("/{id}", web::delete().to(profiles::delete_profile))
            .route("/{id}/freelancer", web::get().to(profiles::get_freelancer_profile))
            .route("/{id}/freelancer", web::put().to(profiles::update_freelancer_profile))
            .route("/{id}/client", web::get().to(profiles::get_client_profile))
            .route("/{id}/client", web::put().to(profiles::update_client_profile)),
    );

    // ── Project routes, including everything nested under a project ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project))
            .route("/{id}/status", web::put().to(projects::update_status))
            .route("/{id}/milestones", web::get().to(milestones::get_milestones))
            .route("/{id}/milestones", web::post().to(milestones::create_milestone))
            .route("/{id}/time-entries", web::get().to(time_tracking::get_time_entries))
            .route("/{id}/time-entries/start", web::post().to(time_tracking::start_timer))
            .route("/{id}/disputes", web::get().to(disputes::get_disputes))
            .route("/{id}/disputes", web::post().to(disputes::create_dispute))
            .service(
                web::resource("/{id}/files")
                    .app_data(web::PayloadConfig::new(UPLOAD_PAYLOAD_LIMIT))
                    .route(web::get().to(files::get_files))
                    .route(web::post().to(files::upload_file)),
            ),
    );

    // ── Application routes ──
    cfg.service(
        web::scope("/applications")
            .route("", web::get().to(applications::get_applications))
            .route("", web::post().to(applications::create_application))
            .route("/{id}", web::get().to(applications::get_application))
            .route("/{id}", web::put().to(applications::update_application))
            .route("/{id}", web::delete().to(applications::delete_application))
            .route("/{id}/accept", web::post().to(applications::accept_application))
            .route("/{id}/reject", web::post().to(applications::reject_application)),
    );

    cfg.service(
        web::resource("/milestones/{id}").route(web::put().to(milestones::update_milestone)),
    );
    cfg.service(
        web::resource("/time-entries/{id}/stop").route(web::post().to(time_tracking::stop_timer)),
    );
    cfg.service(
        web::resource("/disputes/{id}/status")
            .route(web::put().to(disputes::update_dispute_status)),
    );

    // ── Review routes ──
    cfg.service(web::resource("/reviews").route(web::post().to(reviews::create_review)));
    cfg.service(
        web::resource("/users/{id}/reviews").route(web::get().to(reviews::get_user_reviews)),
    );

    // ── Per-user routes ──
    cfg.service(
        web::scope("/saved-projects")
            .route("", web::get().to(saved_projects::get_saved_projects))
            .route("", web::post().to(saved_projects::save_project))
            .route("/{project_id}", web::delete().to(saved_projects::unsave_project)),
    );
    cfg.service(
        web::resource("/preferences")
            .route(web::get().to(preferences::get_preferences))
            .route(web::put().to(preferences::update_preferences)),
    );
    cfg.service(
        web::resource("/matching/projects").route(web::get().to(matching::get_matched_projects)),
    );

    // ── Catalog routes (public) ──
    cfg.service(
        web::scope("/skills")
            .route("", web::get().to(catalog::get_skills))
            .route("/categories", web::get().to(catalog::get_skill_categories)),
    );
    cfg.service(
        web::resource("/project-categories").route(web::get().to(catalog::get_project_categories)),
    );

    // ── Subscription routes ──
    cfg.service(
        web::scope("/subscriptions")
            .route("", web::post().to(subscriptions::subscribe))
            .route("/plans", web::get().to(subscriptions::get_plans))
            .route("/me", web::get().to(subscriptions::get_my_subscription))
            .route("/cancel", web::post().to(subscriptions::cancel_subscription)),
    );
}
