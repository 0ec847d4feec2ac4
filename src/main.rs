use clap::Parser;
use raffle_ledger::app::board;
use raffle_ledger::config::Command;
use raffle_ledger::core::ConfigProvider;
use raffle_ledger::core::export::write_csv_file;
use raffle_ledger::utils::error::{ErrorSeverity, LedgerError};
use raffle_ledger::utils::logger;
use raffle_ledger::{
    CliConfig, LocalStorage, ReservationApi, ReservationRequest, ReservationService, Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(&cli.command, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(command: &Command, settings: &Settings) -> Result<(), LedgerError> {
    let storage = LocalStorage::new(settings.data_dir().to_string());
    let service = ReservationService::from_config(storage, settings).await?;

    match command {
        Command::Info => print!("{}", board::render_info(&service.info().await)),
        Command::Slots { available } => {
            let slots = service.slots().await;
            if *available {
                print!("{}", board::render_available(&slots));
            } else {
                print!("{}", board::render_board(&slots));
            }
        }
        Command::Reserve { slot, name, phone } => {
            let reservation = service
                .reserve(ReservationRequest::new(slot.as_str(), name.as_str(), phone.as_str()))
                .await?;
            println!(
                "✅ Number {} reserved for {} ({})",
                reservation.slot, reservation.name, reservation.phone
            );
        }
        Command::Reservations => {
            print!("{}", board::render_reservations(&service.reservations().await))
        }
        Command::Export { path } => {
            let reservations = service.reservations().await;
            write_csv_file(path, &reservations).await?;
            tracing::info!("📁 Exported {} reservations to {}", reservations.len(), path);
            println!("📁 Exported {} reservations to {}", reservations.len(), path);
        }
    }

    Ok(())
}

fn exit_code(e: &LedgerError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
