use actix_web::{HttpResponse, Result};
use rust_embed::Embed;
use tracing::trace;

// Static assets embedded at compile time
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

pub struct FrontendService;

impl FrontendService {
    /// Serve the index page
    pub async fn handle_index() -> Result<HttpResponse> {
        trace!("Serving index page");

        match StaticAssets::get("index.html") {
            Some(content) => Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(content.data.into_owned())),
            None => Ok(HttpResponse::NotFound().body("File not found")),
        }
    }

    /// The not-found page unknown keys redirect to
    pub async fn handle_not_found() -> HttpResponse {
        HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("not found")
    }

    pub async fn handle_favicon() -> HttpResponse {
        trace!("Serving favicon");

        match StaticAssets::get("favicon.ico") {
            Some(favicon_data) => HttpResponse::Ok()
                .content_type("image/x-icon")
                .body(favicon_data.data.into_owned()),
            None => HttpResponse::Ok().content_type("image/x-icon").body(vec![]),
        }
    }
}
