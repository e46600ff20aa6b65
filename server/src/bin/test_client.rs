use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use shared::{ClientMessage, Direction, GameState, PaddleSide};
use std::time::Duration;
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Headless client for poking a running server: prints every broadcast it
/// receives and sends a scripted burst of paddle moves.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Server host to connect to
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,
    /// Server port
    #[clap(short, long, default_value = "8080")]
    port: u16,
    /// Which paddle to drive (1 or 2)
    #[clap(long, default_value = "1")]
    paddle: u8,
    /// Number of move commands to send
    #[clap(short, long, default_value = "20")]
    moves: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let paddle = PaddleSide::try_from(args.paddle)?;

    let url = format!("ws://{}:{}", args.host, args.port);
    println!("Connecting to {}", url);

    let (ws_stream, _) = connect_async(&url).await?;
    println!("Connected");

    let (mut sink, mut source) = ws_stream.split();

    // Print a line per broadcast so the server's tick output is visible.
    let reader = tokio::spawn(async move {
        while let Some(Ok(Message::Text(text))) = source.next().await {
            match serde_json::from_str::<GameState>(&text) {
                Ok(state) => println!(
                    "ball ({:.1}, {:.1}) paddles ({:.1}, {:.1}) score {} - {}",
                    state.ball_x,
                    state.ball_y,
                    state.paddle1_y,
                    state.paddle2_y,
                    state.score1,
                    state.score2
                ),
                Err(e) => println!("Unreadable state payload: {}", e),
            }
        }
    });

    // Alternate short runs of up and down so the paddle visibly wanders.
    for i in 0..args.moves {
        let direction = if (i / 5) % 2 == 0 {
            Direction::Up
        } else {
            Direction::Down
        };
        let command = ClientMessage::Move { paddle, direction };
        sink.send(Message::Text(serde_json::to_string(&command)?))
            .await?;
        sleep(Duration::from_millis(100)).await;
    }

    sink.send(Message::Close(None)).await?;
    reader.abort();
    println!("Done");

    Ok(())
}
