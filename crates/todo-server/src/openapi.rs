use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo List Api with Jwt Authentication",
        version = "V1",
        description = "Todo List Api with Jwt Authentication",
        contact(
            name = "Ömer Faruk",
            email = "email@email.com",
            url = "https://localhost:7053"
        ),
        license(name = "Free License")
    ),
    paths(
        crate::routes::list_items,
        crate::routes::create_item,
        crate::routes::get_item,
        crate::routes::update_item,
        crate::routes::delete_item,
        crate::routes::login,
        crate::routes::root,
    ),
    components(schemas(
        crate::dto::ItemDto,
        crate::dto::LoginRequest,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "items", description = "Todo item management"),
        (name = "accounts", description = "Token issuance"),
        (name = "system", description = "Service greeting"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the JWT bearer security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Authentication for Minimal API"))
                        .build(),
                ),
            );
        }
    }
}
