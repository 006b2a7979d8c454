//! Command-line lobby for the chat room service.

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use chat_lobby::client::{
    create_room, delete_room, AdmissionAttempt, AdmissionFlow, AdmissionOutcome, ConsoleUi,
    CreationOutcome, DeletionOutcome, HttpRoomApi, LobbyUi, PasswordCheck, RoomApi,
};
use chat_lobby::models::ChatType;
use chat_lobby::validation::{RoomCreationValidator, RoomDraft};

#[derive(Debug, Parser)]
#[command(name = "chat-lobby", about = "Browse, create and enter chat rooms")]
struct Cli {
    /// Room service base URL
    #[arg(long, env = "LOBBY_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List rooms, newest first
    List,
    /// Create a room
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        password: String,
        /// msgChat or rtcChat
        #[arg(long)]
        chat_type: Option<ChatType>,
        /// Maximum participants
        #[arg(long, default_value = "")]
        max_users: String,
        #[arg(long)]
        secret: bool,
    },
    /// Confirm the password, check capacity, then enter
    Enter {
        room_id: String,
        #[arg(long)]
        password: String,
    },
    /// Check a room password without entering
    CheckPassword {
        room_id: String,
        #[arg(long)]
        password: String,
    },
    /// Delete an empty room
    Delete { room_id: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let api = HttpRoomApi::new(&cli.base_url);
    let ui = ConsoleUi::new(api.base_url());

    if !run(cli.command, &api, &ui).await {
        std::process::exit(1);
    }
}

async fn run(command: Command, api: &HttpRoomApi, ui: &ConsoleUi) -> bool {
    match command {
        Command::List => match api.list_rooms().await {
            Ok(rooms) => {
                for room in rooms {
                    println!(
                        "{}  {:<24} {:<8} {}/{}{}",
                        room.room_id,
                        room.room_name,
                        room.chat_type,
                        room.user_count,
                        room.max_user_cnt,
                        if room.secret_chk { "  (secret)" } else { "" }
                    );
                }
                true
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                false
            }
        },
        Command::Create {
            name,
            password,
            chat_type,
            max_users,
            secret,
        } => {
            // Same view the room list page has: whatever is listed right now.
            let listed = match api.list_rooms().await {
                Ok(rooms) => rooms,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not load room list");
                    Vec::new()
                }
            };
            let draft = RoomDraft {
                name,
                password,
                chat_type,
                max_user_cnt: max_users,
                secret,
            };
            let outcome = create_room(
                api,
                ui,
                &RoomCreationValidator::default(),
                &draft,
                listed.iter().map(|room| room.room_name.as_str()),
            )
            .await;
            if let CreationOutcome::Created(room) = &outcome {
                println!("{}", room.room_id);
            }
            matches!(outcome, CreationOutcome::Created(_))
        }
        Command::Enter { room_id, password } => {
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });

            let outcome = AdmissionFlow::new(api, ui)
                .attempt_entry(&AdmissionAttempt::new(room_id, password), &cancel)
                .await;
            matches!(outcome, AdmissionOutcome::Entered { .. })
        }
        Command::CheckPassword { room_id, password } => {
            match AdmissionFlow::new(api, ui)
                .check_password(&room_id, &password)
                .await
            {
                Ok(PasswordCheck::Confirmed) => {
                    println!("Password confirmed");
                    true
                }
                Ok(PasswordCheck::Mismatch) => {
                    ui.alert("Incorrect password");
                    false
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            }
        }
        Command::Delete { room_id } => {
            matches!(delete_room(api, ui, &room_id).await, DeletionOutcome::Deleted)
        }
    }
}
