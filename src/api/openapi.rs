use crate::api::handlers::{announcements, health};
use utoipa::openapi::{InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Reuse the same router wiring and only return the generated OpenAPI document.
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Build the router that also drives the `OpenAPI` document.
///
/// Routes added outside (like `OPTIONS /health`) are not documented.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(announcements::create_announcement))
        .routes(routes!(
            announcements::get_announcement,
            announcements::patch_announcement,
            announcements::delete_announcement
        ));

    let mut announcements_tag = Tag::new("announcements");
    announcements_tag.description = Some("Announcement records".to_string());
    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service and database status".to_string());
    router.get_openapi_mut().tags = Some(vec![announcements_tag, health_tag]);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.license = optional_str(env!("CARGO_PKG_LICENSE")).map(|identifier| {
        let mut license = License::new(identifier);
        license.identifier = Some(identifier.to_string());
        license
    });

    OpenApiBuilder::new().info(info).build()
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_announcement_route() {
        let doc = openapi();
        let paths = &doc.paths.paths;

        let collection = paths
            .get("/announcements/")
            .unwrap_or_else(|| panic!("missing /announcements/"));
        assert!(collection.post.is_some());

        let item = paths
            .get("/announcements/{id}")
            .unwrap_or_else(|| panic!("missing /announcements/{{id}}"));
        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());

        assert!(paths.contains_key("/health"));
    }

    #[test]
    fn openapi_info_comes_from_cargo() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
    }
}
