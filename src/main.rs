use freightflow_rust::{AppError, Command, QuoteSession, Reply, CONFIG};
use log::{error, info};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Cargar .env si existe; CONFIG lo vuelve a intentar sin costo.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(CONFIG.log_filter.as_str())).init();

    let mut session = QuoteSession::new(&CONFIG)?;
    let mut stdout = io::stdout();
    stdout.write_all(format!("{}\n{}\n", freightflow_rust::quote_session::HELP, session.screen()).as_bytes())
          .await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let reply = match line.parse::<Command>() {
            Ok(cmd) => session.execute(cmd).await,
            Err(e) => Err(e),
        };
        let out = match reply {
            Ok(Reply::Screen(text)) => text,
            Ok(Reply::Submitted(req)) => {
                info!("quote requirement submitted");
                let json = serde_json::to_string_pretty(&req)?;
                stdout.write_all(format!("{json}\n").as_bytes()).await?;
                break;
            }
            Ok(Reply::Quit) => break,
            Err(e) => {
                error!("{e}");
                e.to_string()
            }
        };
        stdout.write_all(format!("{out}\n").as_bytes()).await?;
        stdout.flush().await?;
    }
    stdout.flush().await?;
    Ok(())
}
