// Terminal runtime: picks the input source, owns the screen and drives the
// frame scheduler until someone quits.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use crossterm::{cursor, execute, terminal};
use futures::StreamExt;
use tracing::{info, warn};

use crate::domain::{Arena, InputSource};
use crate::frameworks::cli::Args;
use crate::frameworks::config;
use crate::frameworks::logging;
use crate::frameworks::settings::Settings;
use crate::interface_adapters::terminal::{is_quit, key_from_event};
use crate::interface_adapters::{LocalInput, NetworkInput, TerminalCanvas, Transport};
use crate::use_cases::{GameState, Recruit, TickClock, provision_players};

/// Raw mode and the alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

async fn open_input(
    args: &Args,
    settings: &Settings,
) -> io::Result<(Box<dyn InputSource>, Vec<Recruit>)> {
    if !args.network {
        let recruits = vec![settings.recruit_one(), settings.recruit_two()];
        return Ok((Box::new(LocalInput::new()), recruits));
    }

    let transport = Transport::connect(&settings.host, settings.port, config::net_timeout())
        .await
        .map_err(|e| {
            io::Error::other(format!(
                "failed to reach relay at {}:{}: {e:?}",
                settings.host, settings.port
            ))
        })?;

    let client_id = uuid::Uuid::new_v4().to_string();
    println!("Waiting for an opponent on {}:{}...", settings.host, settings.port);

    let (input, seats, slot) = NetworkInput::connect(
        transport,
        client_id,
        &settings.recruit_one(),
        config::bootstrap_timeout(),
    )
    .await
    .map_err(|e| io::Error::other(format!("pairing failed: {e:?}")))?;
    info!(client_id = %input.client_id(), slot, "starting network game");

    let recruits = seats.into_iter().map(|seat| seat.recruit).collect();
    Ok((Box::new(input), recruits))
}

fn build_arena() -> io::Result<Arena> {
    let (cols, rows) = terminal::size()?;
    Arena::from_terminal(rows, cols, config::arena_margin())
        .map_err(|e| io::Error::other(format!("terminal too small: {e:?}")))
}

async fn play(
    state: &mut GameState,
    input: &mut dyn InputSource,
    canvas: &mut TerminalCanvas<Stdout>,
    frame: Duration,
    clock: Option<TickClock>,
    debug: bool,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    canvas.draw_arena(&state.arena)?;
    canvas.draw_info(state, debug)?;
    canvas.flush()?;

    loop {
        // The keyboard poll timeout paces the frames.
        let key = tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted");
                return Ok(());
            }
            polled = tokio::time::timeout(frame, events.next()) => match polled {
                Err(_) => None,
                Ok(Some(Ok(Event::Key(event)))) => {
                    if is_quit(&event) {
                        info!("quit key pressed");
                        return Ok(());
                    }
                    key_from_event(&event)
                }
                Ok(Some(Ok(_))) => None,
                Ok(Some(Err(e))) => return Err(e),
                Ok(None) => return Ok(()),
            }
        };

        let presses = match input.exchange(key).await {
            Ok(presses) => presses,
            Err(e) => {
                warn!(error = ?e, "input source closed; ending game");
                return Ok(());
            }
        };

        // Network games run on the shared tick clock so reloads land on the
        // same tick for both clients.
        let now = clock.map_or_else(Instant::now, |clock| clock.at(state.tick));
        state.next_frame(&presses, now, canvas);
        canvas.draw_info(state, debug)?;
        canvas.flush()?;
    }
}

/// Runs one game and returns the closing score line.
pub async fn run(args: Args) -> io::Result<String> {
    let _ = dotenvy::dotenv();

    if args.logging || config::logging_enabled() {
        let path = logging::init_file_logging(&config::log_dir())?;
        info!(path = %path.display(), "logging to file");
    }

    let settings_path = config::settings_path();
    let mut settings = Settings::load(&settings_path).unwrap_or_else(|e| {
        warn!(error = ?e, path = %settings_path.display(), "unreadable settings; using defaults");
        Settings::default()
    });
    settings.apply(&args);

    let (mut input, recruits) = open_input(&args, &settings).await?;

    let arena = match build_arena() {
        Ok(arena) => arena,
        Err(e) => {
            input.close().await;
            return Err(e);
        }
    };
    let mut state = GameState::new(arena, provision_players(&arena, &recruits));
    let clock = args
        .network
        .then(|| TickClock::new(Instant::now(), config::frame_interval()));
    info!(?arena, players = state.players.len(), "game started");

    let outcome = match TerminalGuard::enter() {
        Ok(guard) => {
            let mut canvas = TerminalCanvas::new(io::stdout());
            let outcome = play(
                &mut state,
                &mut *input,
                &mut canvas,
                config::frame_interval(),
                clock,
                args.debug,
            )
            .await;
            drop(guard);
            outcome
        }
        Err(e) => Err(e),
    };
    input.close().await;
    outcome?;

    if let Err(e) = settings.save(&settings_path) {
        warn!(error = ?e, path = %settings_path.display(), "failed to save settings");
    }

    let summary = state.summary();
    info!(%summary, ticks = state.tick, "game closed");
    io::stdout().flush()?;
    Ok(summary)
}
