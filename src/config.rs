/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的批次数量
    pub max_concurrent_batches: usize,
    /// 行为积分 API 基础地址
    pub api_base_url: String,
    /// API 访问令牌
    pub api_token: String,
    /// 执行加分操作的教师ID（0 表示未登录）
    pub teacher_id: i64,
    /// 批次 TOML 文件存放目录
    pub batch_folder: String,
    /// 是否使用批量提交接口（单次 HTTP 调用提交整批）
    pub use_batch_endpoint: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 频率限制时的最大重试次数
    pub max_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_batches: 4,
            api_base_url: "https://behavior-api.school.example.cn".to_string(),
            api_token: String::new(),
            teacher_id: 0,
            batch_folder: "batches".to_string(),
            use_batch_endpoint: false,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            max_retries: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_batches: std::env::var("MAX_CONCURRENT_BATCHES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_batches),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            api_token: std::env::var("API_TOKEN").unwrap_or(default.api_token),
            teacher_id: std::env::var("TEACHER_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(default.teacher_id),
            batch_folder: std::env::var("BATCH_FOLDER").unwrap_or(default.batch_folder),
            use_batch_endpoint: std::env::var("USE_BATCH_ENDPOINT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.use_batch_endpoint),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
        }
    }
}
