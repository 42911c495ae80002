use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::accounts::{
    AuthResponseDto, LoginDto, LoginFormDto, RegisterDto, UserDto,
};
use crate::presentation::handlers::authors::{AuthorDetailDto, AuthorDto, AuthorProfileDto};
use crate::presentation::handlers::comments::{
    CommentDto, CommentFormDto, CommentInputDto, FormFieldDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, PageDto, PostDetailDto, PostDto, PostListDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::authors::list_authors,
        crate::presentation::handlers::authors::get_author,
        crate::presentation::handlers::authors::create_author_profile,
        crate::presentation::handlers::authors::update_author_profile,
        crate::presentation::handlers::authors::delete_author_profile,
        crate::presentation::handlers::comments::comment_form,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::update_comment,
        crate::presentation::handlers::comments::delete_comment,
        crate::presentation::handlers::accounts::login_form,
        crate::presentation::handlers::accounts::login,
        crate::presentation::handlers::accounts::register,
        crate::presentation::handlers::accounts::me,
        crate::presentation::handlers::accounts::delete_me
    ),
    components(
        schemas(
            PostDto,
            PageDto,
            PostListDto,
            PostDetailDto,
            CreatePostDto,
            UpdatePostDto,
            AuthorDto,
            AuthorDetailDto,
            AuthorProfileDto,
            CommentDto,
            CommentInputDto,
            CommentFormDto,
            FormFieldDto,
            RegisterDto,
            LoginDto,
            LoginFormDto,
            AuthResponseDto,
            UserDto
        )
    ),
    tags(
        (name = "posts", description = "Post list, detail and authoring"),
        (name = "authors", description = "Author profiles"),
        (name = "comments", description = "Comments on posts"),
        (name = "accounts", description = "Login, registration and account removal")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
