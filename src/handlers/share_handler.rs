use actix_web::{get, post, put, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::ShareQuizRequestDto,
};

#[post("/api/quiz/share")]
async fn share_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<ShareQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    log::info!(
        "[{}] Share of quiz {} requested by {}",
        get_request_id(&req).unwrap_or_default(),
        request.quiz_id,
        request.sender_id
    );

    let share = state.share_service.share_quiz(request).await?;
    Ok(HttpResponse::Created().json(share))
}

#[put("/api/shares/{id}/accept")]
async fn accept_share(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let share = state.share_service.accept_share(&id).await?;
    Ok(HttpResponse::Ok().json(share))
}

#[put("/api/shares/{id}/deny")]
async fn deny_share(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let share = state.share_service.deny_share(&id).await?;
    Ok(HttpResponse::Ok().json(share))
}

#[get("/api/users/{receiver_id}/shares")]
async fn pending_shares(
    state: web::Data<AppState>,
    receiver_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let shares = state.share_service.pending_shares(&receiver_id).await?;
    Ok(HttpResponse::Ok().json(shares))
}

#[get("/api/users/{receiver_id}/shared-quizzes")]
async fn shared_quizzes(
    state: web::Data<AppState>,
    receiver_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.share_service.shared_quizzes(&receiver_id).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}
