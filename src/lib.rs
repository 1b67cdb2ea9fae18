pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;

pub use routes::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

/// Build the application router
///
/// Health and static assets sit outside the session middleware; every
/// page route goes through it so handlers always see a `Session`.
pub fn create_app(state: AppState) -> Router {
    use routes::{
        admin_routes, fallback, get_about, get_diet_plan, get_favorites, get_home, get_login,
        get_profile, get_recipe_detail, get_recipes, get_register, health, post_favorite_remove,
        post_favorite_toggle, post_login, post_logout, post_plan_add, post_plan_clear,
        post_plan_remove, post_profile, post_register, AssetsService,
    };
    use session::{require_auth, session_middleware};

    // Routes that need a signed-in user
    let protected_routes = Router::new()
        .route("/diet-plan", get(get_diet_plan))
        .route("/diet-plan/add", post(post_plan_add))
        .route("/diet-plan/remove", post(post_plan_remove))
        .route("/diet-plan/clear", post(post_plan_clear))
        .route("/favorites", get(get_favorites))
        .route("/favorites/toggle", post(post_favorite_toggle))
        .route("/favorites/remove", post(post_favorite_remove))
        .route("/profile", get(get_profile).post(post_profile))
        .route_layer(axum_middleware::from_fn(require_auth));

    let pages = Router::new()
        .route("/", get(get_home))
        .route("/about", get(get_about))
        .route("/recipes", get(get_recipes))
        .route("/recipes/{id}", get(get_recipe_detail))
        .route("/login", get(get_login).post(post_login))
        .route("/register", get(get_register).post(post_register))
        // Logout stays public: an expired session still gets its cookie cleared
        .route("/logout", post(post_logout))
        .merge(protected_routes)
        .merge(admin_routes())
        .fallback(fallback)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest_service("/static", AssetsService::new())
        .merge(pages)
        // Cache control (no-store for pages, long-lived for static files)
        .layer(axum_middleware::from_fn(
            middleware::cache_control_middleware,
        ))
}
