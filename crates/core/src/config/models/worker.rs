use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub enabled: bool,
    /// 为空时使用主机名
    #[serde(default)]
    pub worker_id: String,
    pub poll_interval_seconds: u64,
    /// 每次轮询最多取出的任务数
    pub batch_size: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            worker_id: String::new(),
            poll_interval_seconds: 5,
            batch_size: 20,
        }
    }
}

impl WorkerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_seconds == 0 {
            return Err(anyhow::anyhow!("任务轮询间隔必须大于0"));
        }

        if self.batch_size == 0 {
            return Err(anyhow::anyhow!("批量大小必须大于0"));
        }

        Ok(())
    }
}
