// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AppConfig, Notice, NoticeLevel, Session};
use shiftboard_api::{ApiError, InMemoryApi, ScheduleApi};
use shiftboard_domain::{Engineer, Pattern, Period, Schedule, Shift, Workplace};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn lab() -> Workplace {
    Workplace::new("Lab")
}

pub fn nodal() -> Workplace {
    Workplace::new("Nodal")
}

/// Engineer A: works at Lab, 10-12 shifts, unavailable on day 5 shift 2.
pub fn create_engineer_a() -> Engineer {
    Engineer::new("A", vec![lab()])
        .with_quota(10, 12)
        .with_limitation(5, Shift::Second)
}

pub fn create_engineer_b() -> Engineer {
    Engineer::new("B", vec![lab(), nodal()]).with_quota(10, 30)
}

pub fn create_config() -> AppConfig {
    AppConfig {
        workplaces: vec![lab(), nodal()],
        ..AppConfig::default()
    }
}

/// Creates a session over an in-memory store and loads its roster.
pub async fn create_session(engineers: Vec<Engineer>) -> (Session<InMemoryApi>, InMemoryApi) {
    let api: InMemoryApi = InMemoryApi::with_engineers(engineers);
    let mut session: Session<InMemoryApi> = Session::new(api.clone(), create_config()).unwrap();
    session.refresh_engineers().await.unwrap();
    (session, api)
}

/// Creates a session with Farvardin 1403 open.
pub async fn create_open_session(
    engineers: Vec<Engineer>,
) -> (Session<InMemoryApi>, InMemoryApi) {
    let (mut session, api) = create_session(engineers).await;
    session.open_period(1403, 1).await.unwrap();
    session.take_notices();
    (session, api)
}

pub fn has_notice(notices: &[Notice], level: NoticeLevel, text: &str) -> bool {
    notices
        .iter()
        .any(|n| n.level == level && n.message.contains(text))
}

pub fn value(session: &Session<InMemoryApi>, workplace: &Workplace, day: u8, shift: Shift) -> Option<String> {
    session
        .grid()
        .unwrap()
        .value(workplace, day, shift)
        .map(str::to_string)
}

/// An in-memory store whose schedule endpoints can be switched to fail.
#[derive(Debug, Clone)]
pub struct FailingApi {
    inner: InMemoryApi,
    failing: Arc<AtomicBool>,
}

impl FailingApi {
    pub fn new(inner: InMemoryApi) -> Self {
        Self {
            inner,
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, endpoint: &str) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 500,
                message: String::from("backend unavailable"),
            });
        }
        Ok(())
    }
}

impl ScheduleApi for FailingApi {
    async fn list_engineers(&self) -> Result<Vec<Engineer>, ApiError> {
        self.inner.list_engineers().await
    }

    async fn upsert_engineer(&self, engineer: &Engineer) -> Result<(), ApiError> {
        self.inner.upsert_engineer(engineer).await
    }

    async fn delete_engineer(&self, name: &str) -> Result<(), ApiError> {
        self.inner.delete_engineer(name).await
    }

    async fn load_schedule(&self, period: Period) -> Result<Schedule, ApiError> {
        self.check("load_schedule")?;
        self.inner.load_schedule(period).await
    }

    async fn save_schedule(&self, period: Period, schedule: &Schedule) -> Result<(), ApiError> {
        self.check("save_schedule")?;
        self.inner.save_schedule(period, schedule).await
    }

    async fn generate_excel(&self, period: Period) -> Result<Vec<String>, ApiError> {
        self.inner.generate_excel(period).await
    }

    async fn download(&self, file: &str) -> Result<Vec<u8>, ApiError> {
        self.inner.download(file).await
    }

    async fn upload_pattern(&self, file_name: &str, contents: Vec<u8>) -> Result<Pattern, ApiError> {
        self.inner.upload_pattern(file_name, contents).await
    }
}
