use crate::clock::FixedClock;
use crate::i18n::{Translator, FILTER_VALUES_FAILED};
use crate::report_builder::{FilterValue, FilterValueQuery, ReportBuilder, ReportBuilderError};
use crate::state::AppState;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Responder = fn(&FilterValueQuery) -> Result<Vec<FilterValue>, ReportBuilderError>;

pub struct MockReportBuilder {
    responder: Responder,
    pub received: Mutex<Vec<FilterValueQuery>>,
}

impl MockReportBuilder {
    pub fn new(responder: Responder) -> Arc<Self> {
        Arc::new(MockReportBuilder {
            responder,
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<FilterValueQuery> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportBuilder for MockReportBuilder {
    async fn filter_values(
        &self,
        query: &FilterValueQuery,
    ) -> Result<Vec<FilterValue>, ReportBuilderError> {
        self.received.lock().unwrap().push(query.clone());
        (self.responder)(query)
    }
}

pub fn state_with(report_builder: Arc<MockReportBuilder>) -> Arc<AppState> {
    let mut messages = HashMap::new();
    messages.insert(
        "de".to_string(),
        HashMap::from([(
            FILTER_VALUES_FAILED.to_string(),
            "Filterwerte konnten nicht geladen werden.".to_string(),
        )]),
    );
    Arc::new(AppState {
        service_name: "backend".to_string(),
        clock: Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
        )),
        translator: Translator::new("en", &messages),
        report_builder,
    })
}
