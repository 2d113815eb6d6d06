use crate::envelope::Envelope;
use crate::i18n::FILTER_VALUES_FAILED;
use crate::report_builder::{FilterValue, FilterValueQuery, ReportBuilderError};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Deserialize)]
pub struct FilterValuesParams {
    pub search: Option<String>,
}

pub async fn filter_values_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
    params: Result<Query<FilterValuesParams>, QueryRejection>,
    headers: HeaderMap,
) -> Envelope<Vec<FilterValue>> {
    // Malformed requests still answer with an envelope
    let Path((data_source, field)) = match path {
        Ok(p) => p,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected filter values path");
            return Envelope::failure(rejection.body_text(), StatusCode::BAD_REQUEST);
        }
    };
    let Query(params) = match params {
        Ok(q) => q,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected filter values query");
            return Envelope::failure(rejection.body_text(), StatusCode::BAD_REQUEST);
        }
    };

    // `?search=` means "no filter", not "match the empty string"
    let search = params.search.filter(|s| !s.is_empty());
    let query = FilterValueQuery {
        data_source,
        field,
        search,
    };
    debug!(?query, "Received filter values request");

    match state.report_builder.filter_values(&query).await {
        Ok(values) => {
            debug!("Returning {} filter value(s)", values.len());
            Envelope::success(values)
        }
        Err(ReportBuilderError::Validation { message }) => {
            warn!(
                data_source = %query.data_source,
                field = %query.field,
                %message,
                "Filter values request rejected"
            );
            Envelope::failure(message, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(ReportBuilderError::Unexpected(cause)) => {
            error!(
                data_source = %query.data_source,
                field = %query.field,
                "Failed to resolve filter values: {:#}",
                cause
            );
            let locale = state.translator.negotiate(&headers);
            Envelope::failure(
                state.translator.translate(locale, FILTER_VALUES_FAILED),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}
