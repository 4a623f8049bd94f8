use bdea_client::core::session::{failure_hint, render_account_links};
use bdea_client::utils::logger;
use bdea_client::utils::validation::{validate_domain, validate_required_field, Validate};
use bdea_client::{
    join_dispatched, Action, CliConfig, CommandResult, Controls, DeaClient, DeaError, Dispatcher,
    OutputLog,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.log_format, config.verbose);

    tracing::info!("Starting bdea CLI");

    if config.action == Action::Links {
        for line in render_account_links() {
            println!("{}", line);
        }
        return Ok(());
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), DeaError> {
    let settings = config.resolve()?;
    settings.validate()?;

    let api_key = validate_required_field("api_key", &settings.api_key)?.clone();
    let Some(command) = config.action.to_command() else {
        return Ok(());
    };

    let domain = command.target_domain().unwrap_or_default();
    if let Action::Check { domain } = &config.action {
        validate_domain("domain", domain)?;
    }

    let controls = Controls::from_fields(api_key.as_str(), domain);
    if !controls.allows(&command) {
        return Err(DeaError::ValidationError {
            message: format!("{:?} needs an API key and a domain", command),
        });
    }

    let client = DeaClient::from_config(&settings)?;
    let (dispatcher, mut results) = Dispatcher::new(client);
    let task = dispatcher.dispatch(api_key, command);
    drop(dispatcher);

    let mut output = OutputLog::new();
    while let Some(result) = results.recv().await {
        // 傳輸或金鑰錯誤要反映在結束碼
        match result {
            CommandResult::Domain { outcome: Err(e), .. }
            | CommandResult::Status { outcome: Err(e), .. } => return Err(e),
            result => {
                if let Some(hint) = failure_hint(&result) {
                    eprintln!("💡 {}", hint);
                }
                output.apply(&result, chrono::Local::now().time());
            }
        }
    }
    join_dispatched(task).await?;

    for line in output.lines() {
        println!("{}", line);
    }

    Ok(())
}
