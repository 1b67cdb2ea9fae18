//! About page

use askama::Template;
use axum::response::Response;
use bitewise_api::User;

use super::render_template;
use crate::session::Session;

#[derive(Template)]
#[template(path = "pages/about.html")]
struct AboutPageTemplate {
    user: Option<User>,
}

/// GET /about - About page
pub async fn get_about(session: Session) -> Response {
    render_template(AboutPageTemplate { user: session.user })
}
