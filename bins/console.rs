use std::io;

use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使 API_BASE_URL / RUST_LOG 生效
    dotenv().ok();
    common::utils::logging::init_logging_console();

    let cfg = match configs::AppConfig::load_client() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid client configuration: {e}");
            error!(service = "console", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let api = match console::ApiClient::new(&cfg) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    // 交互式菜单只需要单线程运行时
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "console", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "console", event = "start", base_url = %cfg.base_url, "console starting");
    let stdin = io::stdin();
    let mut console = console::Console::new(&api, stdin.lock(), io::stdout());
    match rt.block_on(console.run()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "console", event = "io_error", error = %e, "console terminated");
            std::process::ExitCode::FAILURE
        }
    }
}
