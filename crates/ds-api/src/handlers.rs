//! # ds-api Handlers
//!
//! Coordinates the flow between HTTP requests and the `BoardRepo` port.
//! Board and thread references are resolved explicitly in each handler and
//! passed onward as values; nothing is stashed in ambient request state.

use actix_web::{web, HttpResponse, Responder};
use askama::Template;

use ds_core::error::AppError;
use ds_core::models::{NewComment, NewThread};
use ds_core::paging;
use ds_core::traits::BoardRepo;
use ds_ui::{BoardTemplate, HomeTemplate, SubmitTemplate, ThreadTemplate};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn BoardRepo>,
}

fn render<T: Template>(template: T) -> HttpResponse {
    match template.render() {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(err) => {
            log::error!("template rendering failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Maps the domain error taxonomy onto HTTP statuses.
fn error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::NotFound(entity, _) => HttpResponse::NotFound()
            .body(format!("The specified {entity} could not be found")),
        AppError::InvalidSubmission(reason) => {
            HttpResponse::UnprocessableEntity().body(format!("Invalid submission: {reason}"))
        }
        AppError::Internal(err) => {
            log::error!("storage failure: {err:#}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// The board directory at `/`.
pub async fn home(data: web::Data<AppState>) -> impl Responder {
    match data.repo.list_boards().await {
        Ok(boards) => render(HomeTemplate { boards: &boards }),
        Err(err) => error_response(err),
    }
}

async fn render_board(data: &AppState, name: &str, page: usize) -> HttpResponse {
    let board = match data.repo.find_board(name).await {
        Ok(board) => board,
        Err(err) => return error_response(err),
    };
    match data.repo.list_threads(&board.name, page).await {
        Ok(listing) => render(BoardTemplate {
            board: &board,
            threads: &listing.threads,
            page: listing.page,
        }),
        Err(err) => error_response(err),
    }
}

/// First page of a board (e.g., `/abc`).
pub async fn board_index(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    render_board(&data, &name, 1).await
}

/// Explicit page of a board (e.g., `/abc/2`). Garbage page numbers fall back
/// to page 1; pages past the end render an empty listing.
pub async fn board_page(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (name, page) = path.into_inner();
    render_board(&data, &name, paging::parse_page(Some(page.as_str()))).await
}

/// The new-thread form.
pub async fn submit_form(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    match data.repo.find_board(&name).await {
        Ok(board) => render(SubmitTemplate { board: &board }),
        Err(err) => error_response(err),
    }
}

/// Accepts a new-thread submission and redirects to the created thread.
pub async fn submit_thread(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<NewThread>,
) -> impl Responder {
    let name = path.into_inner();
    // Resolve the board first so an unknown board is a 404 even when the
    // form is also invalid.
    let board = match data.repo.find_board(&name).await {
        Ok(board) => board,
        Err(err) => return error_response(err),
    };
    match data.repo.create_thread(&board.name, form.into_inner()).await {
        Ok(thread) => see_other(format!("/{}/thread/{}", board.name, thread.id)),
        Err(err) => error_response(err),
    }
}

/// A thread with its comments.
pub async fn view_thread(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (name, raw_id) = path.into_inner();
    let board = match data.repo.find_board(&name).await {
        Ok(board) => board,
        Err(err) => return error_response(err),
    };
    let Ok(id) = raw_id.parse::<i64>() else {
        return error_response(AppError::NotFound("thread".into(), raw_id));
    };
    match data.repo.get_thread(&board.name, id).await {
        Ok(thread) => render(ThreadTemplate {
            board: &board,
            thread: &thread,
        }),
        Err(err) => error_response(err),
    }
}

/// Accepts a new comment and redirects to its anchor within the thread.
pub async fn post_comment(
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
    form: web::Form<NewComment>,
) -> impl Responder {
    let (name, raw_id) = path.into_inner();
    let board = match data.repo.find_board(&name).await {
        Ok(board) => board,
        Err(err) => return error_response(err),
    };
    let Ok(id) = raw_id.parse::<i64>() else {
        return error_response(AppError::NotFound("thread".into(), raw_id));
    };
    match data
        .repo
        .create_comment(&board.name, id, form.into_inner())
        .await
    {
        Ok(comment) => see_other(format!("/{}/thread/{}#c{}", board.name, id, comment.id)),
        Err(err) => error_response(err),
    }
}
