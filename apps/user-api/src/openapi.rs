use utoipa::OpenApi;

/// User management API documentation
#[derive(OpenApi)]
#[openapi(
    components(schemas(
        domain_users::CreateUserRequest,
        domain_users::UpdateUserRequest,
        domain_users::UserResponse,
    )),
    tags((name = "users", description = "User management operations"))
)]
pub struct ApiDoc;
