//! Home page

use askama::Template;
use axum::response::Response;
use bitewise_api::User;

use super::render_template;
use crate::session::Session;

#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomePageTemplate {
    user: Option<User>,
}

/// GET / - Landing page
pub async fn get_home(session: Session) -> Response {
    render_template(HomePageTemplate { user: session.user })
}
