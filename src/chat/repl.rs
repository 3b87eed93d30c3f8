use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use super::render::render_message;
use super::session::{ChatSession, SAMPLE_QUERIES, SendError};
use crate::gemini::GuideClient;

const PROMPT: &str = "> ";

/// Interactive loop over stdin; `/quit` or EOF ends the session.
pub async fn run<C: GuideClient>(session: &ChatSession<C>) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if session.messages().is_empty() {
        let mut intro = String::from("Start exploring. Try one of these or ask your own question:\n");
        for query in SAMPLE_QUERIES {
            intro.push_str(&format!("  - {query}\n"));
        }
        stdout.write_all(intro.as_bytes()).await?;
    }

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" => break,
            _ => {}
        }

        stdout.write_all(b"Searching...\n").await?;
        stdout.flush().await?;
        match session.send(&line).await {
            Ok(reply) => {
                stdout.write_all(render_message(&reply).as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Err(SendError::EmptyInput) => continue,
            Err(e) => stdout.write_all(format!("{e}\n").as_bytes()).await?,
        }
    }

    info!(messages = session.messages().len(), "chat ended");
    Ok(())
}
