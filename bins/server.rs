use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    // LOG_FORMAT=json 时输出结构化日志，便于日志采集
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
}

/// Resolves on Ctrl+C; the server then stops accepting and drains.
async fn shutdown_signal(service_id: Uuid, pid: u32) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时保持运行，由进程管理器终止
        error!(service = "shift-api", event = "signal_listen_failed", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "shift-api", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, draining requests");
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();

    // Panic 钩子：记录到日志而不是只打印到 stderr
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "shift-api", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    // 配置无效时直接退出，避免以错误参数启动
    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "shift-api", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "shift-api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "shift-api",
        event = "start",
        %service_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        addr = %cfg.server.bind_addr(),
        "shift api starting"
    );

    match rt.block_on(server::run_with_config(cfg, shutdown_signal(service_id, pid))) {
        Ok(()) => {
            info!(service = "shift-api", event = "stop", %service_id, pid, "shift api stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "shift-api", event = "run_failed", %service_id, error = %e, "shift api exited with error");
            ExitCode::FAILURE
        }
    }
}
