use actix_web::{web, HttpResponse};
use actix_web::web::Data;
use log::debug;
use crate::error::router_error::RouterError;
use crate::model::command::{Command, CommandResponse};
use crate::service::command_router::CommandRouter;
use crate::service::session_context::SessionContext;

#[utoipa::path(
    post,
    path = "/scrollmark-0/command",
    request_body(
        content = Command
    ),
    responses(
        (status = OK, description = "Command handled", body = CommandResponse),
        (status = NO_CONTENT, description = "Fire-and-forget command accepted"),
        (status = BAD_REQUEST, description = "Command had no url or tab to act on"),
        (status = NOT_IMPLEMENTED, description = "Command needs a resident page agent")
    ),
)]
pub async fn post_command(
    command_router: Data<CommandRouter>,
    command: web::Json<Command>,
) -> Result<HttpResponse, RouterError> {
    let command = command.into_inner();
    debug!("Handling command [{}]", command.kind());
    let context = SessionContext::detached();
    match command_router.dispatch(&context, command).await? {
        Some(response) => Ok(HttpResponse::Ok().json(response)),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}
