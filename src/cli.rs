//! 命令行入口
//!
//! 二进制本身不包含任何抓取逻辑，集成方构造 [`HandlerSet`] 后调用 [`run`]。

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use clerk_core::AppConfig;
use clerk_infrastructure::init_metrics;
use clerk_worker::HandlerSet;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::Application;
use crate::shutdown::{wait_for_signal, ShutdownManager};

/// 解析命令行参数、初始化日志和指标并运行引擎
pub async fn run(handlers: HandlerSet) -> Result<()> {
    // 解析命令行参数
    let matches = Command::new("clerk")
        .version("1.0.0")
        .about("账户轮询任务分发与失败计数引擎")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径，未指定时查找默认位置"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别，覆盖配置文件")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式")
                .value_parser(["json", "pretty"])
                .default_value("pretty"),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("处理一批任务后退出")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config");
    let log_format = matches
        .get_one::<String>("log-format")
        .map(String::as_str)
        .unwrap_or("pretty");
    let once = matches.get_flag("once");

    // 加载配置
    let config = AppConfig::load(config_path.map(String::as_str)).context("加载配置失败")?;

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&log_level, log_format)?;

    info!("启动账户轮询任务引擎");
    if let Some(path) = config_path {
        info!("配置文件: {path}");
    }

    if !config.worker.enabled {
        return Err(anyhow::anyhow!("Worker被禁用，请检查配置"));
    }

    if config.observability.metrics_enabled {
        init_metrics(&config.observability.metrics_bind_address)?;
    }

    let app = Application::new(&config, handlers).await?;

    if once {
        app.run_once().await?;
        return Ok(());
    }

    // 创建优雅关闭管理器
    let shutdown_manager = ShutdownManager::new();
    let shutdown_rx = shutdown_manager.subscribe();
    let mut app_handle = tokio::spawn(async move { app.run(shutdown_rx).await });

    tokio::select! {
        result = wait_for_signal() => {
            result.context("安装信号处理器失败")?;
            info!("收到关闭信号，开始优雅关闭...");
            shutdown_manager.shutdown();
        }
        result = &mut app_handle => {
            return match result {
                Ok(inner) => inner,
                Err(e) => Err(anyhow::anyhow!("Worker任务异常退出: {e}")),
            };
        }
    }

    // 等待当前批次处理完，设置超时
    match tokio::time::timeout(Duration::from_secs(30), app_handle).await {
        Ok(Ok(Ok(()))) => info!("应用已优雅关闭"),
        Ok(Ok(Err(e))) => error!("应用关闭时发生错误: {e}"),
        Ok(Err(e)) => error!("Worker任务异常退出: {e}"),
        Err(_) => warn!("应用关闭超时，强制退出"),
    }

    info!("账户轮询任务引擎已退出");
    Ok(())
}

/// 初始化日志系统
fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
        _ => {
            return Err(anyhow::anyhow!("不支持的日志格式: {log_format}"));
        }
    }

    Ok(())
}
