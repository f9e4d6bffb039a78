use actix_web::{web, HttpResponse, Responder};

use crate::core::report::render_sort_report;
use crate::models::{SortMatchRequest, SortMatchResponse};
use crate::routes::AppState;

/// Configure parcel sorting endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sort/match", web::post().to(match_items))
        .route("/sort/report", web::post().to(sort_report));
}

/// Pair scanned boxes with scanned invoices
///
/// POST /api/v1/sort/match
///
/// Items with missing recognized fields are fine — an absent field simply
/// cannot satisfy its criterion. Empty collections are a valid no-op.
async fn match_items(
    state: web::Data<AppState>,
    req: web::Json<SortMatchRequest>,
) -> impl Responder {
    let request = req.into_inner();
    let total_items = request.boxes.len() + request.invoices.len();

    tracing::info!(
        "Sorting {} boxes against {} invoices",
        request.boxes.len(),
        request.invoices.len()
    );

    let outcome = state.sorter.pair(request.boxes, request.invoices);

    tracing::debug!(
        "{} pairs, {} boxes left, {} invoices left",
        outcome.pairs.len(),
        outcome.unmatched_boxes.len(),
        outcome.unmatched_invoices.len()
    );

    HttpResponse::Ok().json(SortMatchResponse {
        pairs: outcome.pairs,
        unmatched_boxes: outcome.unmatched_boxes,
        unmatched_invoices: outcome.unmatched_invoices,
        total_items,
    })
}

/// Render a sort session as plain text for manual handoff
///
/// POST /api/v1/sort/report
async fn sort_report(
    state: web::Data<AppState>,
    req: web::Json<SortMatchRequest>,
) -> impl Responder {
    let request = req.into_inner();
    let outcome = state.sorter.pair(request.boxes, request.invoices);
    let report = render_sort_report(&outcome);

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(report)
}
