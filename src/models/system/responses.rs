use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub system_name: String,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: bool,
}

/// 进程启动时间，用于计算运行时长
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        chrono::Utc::now()
            .signed_duration_since(self.start_datetime)
            .num_seconds()
            .max(0) as u64
    }
}
