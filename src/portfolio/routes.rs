// src/portfolio/routes.rs

use axum::{
    routing::{get, put, MethodRouter},
    Router,
};

use super::handlers::{about, blogs, certifications, experiences, projects, resume, technical_skills};

/// Registers a collection route with and without the trailing slash
fn collection(router: Router, path: &str, method_router: MethodRouter) -> Router {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

pub fn portfolio_routes() -> Router {
    let router = Router::new();

    // Projects
    let router = collection(
        router,
        "/api/projects",
        get(projects::get_projects).post(projects::create_project),
    )
    .route("/api/projects/admin", get(projects::get_all_projects))
    .route(
        "/api/projects/:id",
        get(projects::get_project)
            .put(projects::update_project)
            .delete(projects::delete_project),
    );

    // Blogs
    let router = collection(
        router,
        "/api/blogs",
        get(blogs::get_blogs).post(blogs::create_blog),
    )
    .route("/api/blogs/admin", get(blogs::get_all_blogs))
    .route(
        "/api/blogs/:id",
        get(blogs::get_blog)
            .put(blogs::update_blog)
            .delete(blogs::delete_blog),
    );

    // Certifications
    let router = collection(
        router,
        "/api/certifications",
        get(certifications::get_certifications).post(certifications::create_certification),
    )
    .route(
        "/api/certifications/:id",
        put(certifications::update_certification)
            .delete(certifications::delete_certification),
    );

    // About (singleton)
    let router = collection(
        router,
        "/api/about",
        get(about::get_about)
            .post(about::create_about)
            .put(about::update_about)
            .delete(about::delete_about),
    );

    // Experiences
    let router = collection(
        router,
        "/api/experiences",
        get(experiences::get_experiences).post(experiences::create_experience),
    )
    .route(
        "/api/experiences/:id",
        get(experiences::get_experience)
            .put(experiences::update_experience)
            .delete(experiences::delete_experience),
    );

    // Technical skills
    let router = collection(
        router,
        "/api/technical-skills",
        get(technical_skills::get_technical_skills).post(technical_skills::create_technical_skill),
    )
    .route(
        "/api/technical-skills/:id",
        put(technical_skills::update_technical_skill)
            .delete(technical_skills::delete_technical_skill),
    );

    // Resume download
    collection(router, "/api/resume", get(resume::download_resume))
}
