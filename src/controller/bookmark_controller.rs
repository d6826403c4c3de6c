use actix_web::{web, HttpResponse};
use actix_web::web::Data;
use log::debug;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use crate::error::bookmark_error::BookmarkError;
use crate::model::bookmark::{sort_for_display, Bookmark};
use crate::model::tab::TabId;
use crate::service::bookmark_service::BookmarkService;

#[derive(Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page URL; query string and fragment are ignored when matching
    pub url: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    pub url: String,
    pub name: Option<String>,
    pub scroll_position: f64,
    pub tab_id: Option<TabId>,
}

#[utoipa::path(
    post,
    path = "/scrollmark-0/bookmarks",
    request_body(
        content = BookmarkRequest
    ),
    responses(
        (status = CREATED, description = "Bookmark created successfully", body = Bookmark),
        (status = BAD_REQUEST, description = "Bookmark body was invalid"),
        (status = SERVICE_UNAVAILABLE, description = "Bookmark could not be stored")
    ),
)]
pub async fn post_bookmark(
    bookmark_service: Data<BookmarkService>,
    bookmark_request: web::Json<BookmarkRequest>,
) -> Result<HttpResponse, BookmarkError> {
    let bookmark_request = bookmark_request.into_inner();
    debug!("Creating new bookmark for [{}]", bookmark_request.url);
    Ok(HttpResponse::Created().json(
        bookmark_service.save(&bookmark_request.url, bookmark_request.name, bookmark_request.scroll_position, bookmark_request.tab_id).await?
    ))
}

#[utoipa::path(
    get,
    path = "/scrollmark-0/bookmarks",
    params(PageQuery),
    responses(
        (status = OK, description = "Bookmarks for the page, ordered by scroll position", body = [Bookmark]),
    )
)]
pub async fn get_bookmarks(
    bookmark_service: Data<BookmarkService>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    debug!("Getting bookmarks for [{}]", query.url);
    let mut bookmarks = bookmark_service.list(Some(&query.url)).await;
    sort_for_display(&mut bookmarks);
    HttpResponse::Ok().json(bookmarks)
}

#[utoipa::path(
    delete,
    path = "/scrollmark-0/bookmarks/{id}",
    params(
        ("id" = String, Path, description = "Bookmark id"),
        PageQuery,
    ),
    responses(
        (status = NO_CONTENT, description = "Bookmark deleted, or was already absent"),
        (status = BAD_REQUEST, description = "Page URL was invalid")
    )
)]
pub async fn delete_bookmark(
    path: web::Path<String>,
    bookmark_service: Data<BookmarkService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, BookmarkError> {
    let bookmark_id = path.into_inner();

    debug!("Deleting bookmark [{}] for [{}]", bookmark_id, query.url);
    bookmark_service.delete(&query.url, &bookmark_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
